use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;
use thiserror::Error;

/// Failure of a single provider call, before any JSON extraction happens.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API key not configured")]
    MissingCredential,
    #[error("transport failure: {0}")]
    TransportFailure(String),
    #[error("HTTP {status} {status_text}")]
    HttpStatus { status: u16, status_text: String },
    #[error("no content in response")]
    EmptyContent,
    #[error("response envelope is not JSON: {0}")]
    MalformedEnvelope(String),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON found in response")]
    NoJsonFound,
    #[error("failed to parse response as JSON: {0}")]
    InvalidJson(String),
}

/// Why one link of the fallback chain failed.
#[derive(Debug, Error)]
pub enum AttemptError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug)]
pub struct Attempt {
    pub provider: String,
    pub error: AttemptError,
}

/// Terminal failure: every provider in the chain was tried and none produced a story.
#[derive(Debug, Error)]
#[error("All providers ({}) failed. Please check your API keys and try again.", join_names(.attempts))]
pub struct AllProvidersFailedError {
    pub attempts: Vec<Attempt>,
}

fn join_names(attempts: &[Attempt]) -> String {
    let names: Vec<&str> = attempts.iter().map(|a| a.provider.as_str()).collect();
    match names.as_slice() {
        [] => "none configured".to_string(),
        [one] => one.to_string(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    AllProvidersFailed(#[from] AllProvidersFailedError),
    #[error("generation cancelled")]
    Cancelled,
}

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("failed to serialize story: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingFields(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Generate(GenerateError::AllProvidersFailed(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Generate(GenerateError::Cancelled) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = match &self {
            ApiError::MissingFields(fields) => json!({ "error": self.to_string(), "fields": fields }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
