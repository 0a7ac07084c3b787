#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use film_story_generator::{CustomWords, FormParameters, Prompt, ProviderAdapter, ProviderError};

/// What a [`FakeProvider`] does when called.
pub enum Behavior {
    Reply(String),
    MissingCredential,
    Status(u16),
    Transport,
    /// Never resolves.
    Hang,
}

/// Shared record of (provider name, prompt text) for every `send` call.
pub type CallLog = Arc<Mutex<Vec<(String, String)>>>;

pub struct FakeProvider {
    name: String,
    behavior: Behavior,
    calls: CallLog,
}

impl FakeProvider {
    pub fn new(name: &str, behavior: Behavior, calls: &CallLog) -> Arc<dyn ProviderAdapter> {
        Arc::new(Self { name: name.to_string(), behavior, calls: calls.clone() })
    }
}

#[async_trait]
impl ProviderAdapter for FakeProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push((self.name.clone(), prompt.as_str().to_string()));
        match &self.behavior {
            Behavior::Reply(text) => Ok(text.clone()),
            Behavior::MissingCredential => Err(ProviderError::MissingCredential),
            Behavior::Status(code) => Err(ProviderError::HttpStatus {
                status: *code,
                status_text: String::new(),
            }),
            Behavior::Transport => Err(ProviderError::TransportFailure("connection refused".into())),
            Behavior::Hang => std::future::pending().await,
        }
    }
}

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn called(calls: &CallLog) -> Vec<String> {
    calls.lock().unwrap().iter().map(|(name, _)| name.clone()).collect()
}

pub fn form() -> FormParameters {
    FormParameters {
        film_title: "Cari Janda".into(),
        duration: "3".into(),
        genre: "Komedi".into(),
        language: "Indonesian".into(),
        target_audience: "Semua Umur".into(),
        primary_purpose: "Hiburan".into(),
        story_premise: "Tiga sahabat mencari cinta".into(),
        main_conflict: "Orang vs Orang".into(),
        mood_tone: "Lucu/Ringan".into(),
        custom_words: CustomWords::from(vec!["bro".to_string()]),
    }
}

/// A provider reply with chatter around the JSON, the way models tend to answer.
pub fn story_reply(title: &str) -> String {
    format!(
        "Tentu! Berikut ceritanya:\n```json\n{{\"film_title\": \"{title}\", \"total_scenes\": 8, \"scenes\": [{{\"scene_number\": 1, \"time_range\": \"0-8s\"}}]}}\n```\nSemoga membantu."
    )
}
