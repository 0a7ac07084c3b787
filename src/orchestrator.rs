use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::{AllProvidersFailedError, Attempt, AttemptError, GenerateError};
use crate::extract::extract_story;
use crate::models::{FormParameters, StoryResult};
use crate::prompt::{build_prompt, Prompt};
use crate::provider::{HttpProvider, ProviderAdapter};

/// Tries each provider in order until one returns a parseable story.
pub struct FallbackOrchestrator {
    providers: Vec<Arc<dyn ProviderAdapter>>,
}

impl FallbackOrchestrator {
    pub fn new(providers: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        Self { providers }
    }

    /// Builds one [`HttpProvider`] per configured spec. Fails only if the HTTP
    /// client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let providers = config
            .providers
            .iter()
            .map(|spec| {
                let provider = HttpProvider::new(spec.clone(), config.provider_timeout)?;
                Ok(Arc::new(provider) as Arc<dyn ProviderAdapter>)
            })
            .collect::<Result<Vec<_>, reqwest::Error>>()?;
        Ok(Self::new(providers))
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn generate(&self, params: &FormParameters) -> Result<StoryResult, AllProvidersFailedError> {
        let generation_id = Uuid::new_v4();
        let span = info_span!("generate", %generation_id, title = %params.film_title);
        async {
            let prompt = build_prompt(params);
            info!("🎬 Built prompt ({} chars)", prompt.as_str().len());
            self.run_chain(&prompt).await
        }
        .instrument(span)
        .await
    }

    /// Like [`generate`](Self::generate), but the whole chain stops as soon as
    /// `cancel` fires, dropping any request still in flight.
    pub async fn generate_with_cancel(
        &self,
        params: &FormParameters,
        cancel: &CancellationToken,
    ) -> Result<StoryResult, GenerateError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("🛑 Generation cancelled");
                Err(GenerateError::Cancelled)
            }
            result = self.generate(params) => result.map_err(GenerateError::from),
        }
    }

    async fn run_chain(&self, prompt: &Prompt) -> Result<StoryResult, AllProvidersFailedError> {
        let mut attempts = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            let name = provider.name();
            info!("Attempting {} ...", name);

            let outcome = match provider.send(prompt).await {
                Ok(raw) => extract_story(&raw).map_err(AttemptError::from),
                Err(e) => Err(AttemptError::from(e)),
            };

            match outcome {
                Ok(story) => {
                    info!("✅ {} produced a story with {} scenes", name, story.scenes.len());
                    return Ok(story);
                }
                Err(e) => {
                    warn!("⚠️ {} failed: {}", name, e);
                    attempts.push(Attempt { provider: name.to_string(), error: e });
                }
            }
        }

        let err = AllProvidersFailedError { attempts };
        error!(attempts = ?err.attempts, "❌ {}", err);
        Err(err)
    }
}
