//! Film story generator: turns screenplay form parameters into a prompt, asks
//! a chain of LLM providers for a structured 8-scene story, and hands back the
//! first reply that parses.

pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod lenient;
pub mod models;
pub mod options;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod routes;

pub use config::AppConfig;
pub use error::{AllProvidersFailedError, Attempt, AttemptError, GenerateError, ParseError, ProviderError};
pub use extract::extract_story;
pub use models::{CustomWords, FormParameters, Scene, Story, StoryResult};
pub use orchestrator::FallbackOrchestrator;
pub use prompt::{build_prompt, build_prompt_at, Prompt};
pub use provider::{HttpProvider, ProviderAdapter, ProviderSpec};
