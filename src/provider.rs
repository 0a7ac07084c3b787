use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::error::ProviderError;
use crate::prompt::Prompt;

pub const TEMPERATURE: f64 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 6000;

/// Pointer to the reply text in a chat-completions envelope.
pub const CHAT_COMPLETION_POINTER: &str = "/choices/0/message/content";
/// Pointer to the reply text in a `generateContent` envelope.
pub const GENERATE_CONTENT_POINTER: &str = "/candidates/0/content/parts/0/text";

/// How the credential travels with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// Appended to the endpoint as `?<name>=<key>`.
    QueryParam(String),
}

/// Request body shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireFormat {
    ChatCompletion { model: String },
    GenerateContent,
}

impl WireFormat {
    pub fn request_body(&self, prompt: &str) -> Value {
        match self {
            WireFormat::ChatCompletion { model } => json!({
                "model": model,
                "messages": [{ "role": "user", "content": prompt }],
                "max_tokens": MAX_OUTPUT_TOKENS,
                "temperature": TEMPERATURE,
            }),
            WireFormat::GenerateContent => json!({
                "contents": [{ "parts": [{ "text": prompt }] }],
                "generationConfig": {
                    "temperature": TEMPERATURE,
                    "maxOutputTokens": MAX_OUTPUT_TOKENS,
                },
            }),
        }
    }

    pub fn default_response_pointer(&self) -> &'static str {
        match self {
            WireFormat::ChatCompletion { .. } => CHAT_COMPLETION_POINTER,
            WireFormat::GenerateContent => GENERATE_CONTENT_POINTER,
        }
    }
}

/// Everything that distinguishes one LLM backend from another.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSpec {
    pub name: String,
    pub endpoint: String,
    pub credential: Option<String>,
    pub auth: AuthScheme,
    pub extra_headers: Vec<(String, String)>,
    pub wire: WireFormat,
    pub response_pointer: String,
}

impl std::fmt::Debug for ProviderSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSpec")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("credential", &self.credential.as_ref().map(|_| "***"))
            .field("auth", &self.auth)
            .field("extra_headers", &self.extra_headers)
            .field("wire", &self.wire)
            .field("response_pointer", &self.response_pointer)
            .finish()
    }
}

impl ProviderSpec {
    pub fn gemini(base_url: &str, model: &str, credential: Option<String>) -> Self {
        let wire = WireFormat::GenerateContent;
        Self {
            name: "Gemini".into(),
            endpoint: format!("{}/models/{}:generateContent", base_url.trim_end_matches('/'), model),
            credential,
            auth: AuthScheme::QueryParam("key".into()),
            extra_headers: Vec::new(),
            response_pointer: wire.default_response_pointer().into(),
            wire,
        }
    }

    pub fn deepseek(base_url: &str, model: &str, credential: Option<String>) -> Self {
        let wire = WireFormat::ChatCompletion { model: model.into() };
        Self {
            name: "DeepSeek".into(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            credential,
            auth: AuthScheme::Bearer,
            extra_headers: Vec::new(),
            response_pointer: wire.default_response_pointer().into(),
            wire,
        }
    }

    pub fn openrouter(base_url: &str, model: &str, credential: Option<String>) -> Self {
        let wire = WireFormat::ChatCompletion { model: model.into() };
        Self {
            name: "OpenRouter".into(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            credential,
            auth: AuthScheme::Bearer,
            extra_headers: vec![
                ("HTTP-Referer".into(), "https://film-story-generator.com".into()),
                ("X-Title".into(), "Film Story Generator".into()),
            ],
            response_pointer: wire.default_response_pointer().into(),
            wire,
        }
    }

    /// The credential, unless it is unset or blank.
    fn usable_credential(&self) -> Option<&str> {
        self.credential.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// Walks `response_pointer` through an already-decoded envelope.
    pub fn reply_text<'a>(&self, envelope: &'a Value) -> Option<&'a str> {
        envelope
            .pointer(&self.response_pointer)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

/// One step of the fallback chain: sends a prompt, returns the raw reply text.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, prompt: &Prompt) -> Result<String, ProviderError>;
}

/// [`ProviderAdapter`] driven entirely by a [`ProviderSpec`].
pub struct HttpProvider {
    client: Client,
    spec: ProviderSpec,
}

impl HttpProvider {
    pub fn new(spec: ProviderSpec, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, spec })
    }
}

#[async_trait]
impl ProviderAdapter for HttpProvider {
    fn name(&self) -> &str { &self.spec.name }

    async fn send(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let spec = &self.spec;
        let key = spec.usable_credential().ok_or(ProviderError::MissingCredential)?;

        let mut request = match &spec.auth {
            AuthScheme::Bearer => self.client.post(&spec.endpoint).bearer_auth(key),
            AuthScheme::QueryParam(param) => self.client.post(&spec.endpoint).query(&[(param.as_str(), key)]),
        };
        for (name, value) in &spec.extra_headers {
            request = request.header(name.as_str(), value.as_str());
        }

        info!("🔗 [{}] POST {}", spec.name, spec.endpoint);

        let response = request
            .json(&spec.wire.request_body(prompt.as_str()))
            .send()
            .await
            .map_err(|e| ProviderError::TransportFailure(redact(&e.to_string(), key)))?;

        let status = response.status();
        info!("📥 [{}] response status: {}", spec.name, status);

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!("❌ [{}] API error response: {}", spec.name, redact(&error_body, key));
            return Err(ProviderError::HttpStatus {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ProviderError::TransportFailure(redact(&e.to_string(), key)))?;

        let envelope: Value = serde_json::from_str(&response_text)
            .map_err(|e| ProviderError::MalformedEnvelope(e.to_string()))?;

        let text = spec.reply_text(&envelope).ok_or(ProviderError::EmptyContent)?;
        info!("✅ [{}] received {} chars of content", spec.name, text.len());
        Ok(text.to_string())
    }
}

// Transport errors from reqwest include the full URL, query-string key and all,
// in its percent-encoded form.
fn redact(message: &str, key: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
    message.replace(key, "***").replace(&encoded, "***")
}
