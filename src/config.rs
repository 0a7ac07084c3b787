use std::time::Duration;

use crate::provider::ProviderSpec;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
pub const DEFAULT_DEEPSEEK_API_BASE: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_OPENROUTER_API_BASE: &str = "https://openrouter.ai/api/v1";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek-chat";
pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-4o";

pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_PORT: u16 = 8080;

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub provider_timeout: Duration,
    /// In fallback order.
    pub providers: Vec<ProviderSpec>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str, default: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let secret = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let providers = vec![
            ProviderSpec::gemini(
                &var("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
                &var("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                secret("GEMINI_API_KEY"),
            ),
            ProviderSpec::deepseek(
                &var("DEEPSEEK_API_BASE", DEFAULT_DEEPSEEK_API_BASE),
                &var("DEEPSEEK_MODEL", DEFAULT_DEEPSEEK_MODEL),
                secret("DEEPSEEK_API_KEY"),
            ),
            ProviderSpec::openrouter(
                &var("OPENROUTER_API_BASE", DEFAULT_OPENROUTER_API_BASE),
                &var("OPENROUTER_MODEL", DEFAULT_OPENROUTER_MODEL),
                secret("OPENROUTER_API_KEY"),
            ),
        ];

        let timeout_secs = lookup("PROVIDER_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse().ok())
            .filter(|&secs: &u64| secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let port = lookup("PORT").and_then(|v| v.trim().parse().ok()).unwrap_or(DEFAULT_PORT);

        Self { port, provider_timeout: Duration::from_secs(timeout_secs), providers }
    }

    /// Names of providers that will actually be attempted.
    pub fn configured_providers(&self) -> Vec<&str> {
        self.providers
            .iter()
            .filter(|p| p.credential.is_some())
            .map(|p| p.name.as_str())
            .collect()
    }
}
