use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};

use crate::{
    error::ApiError,
    export::{export_filename, export_json},
    models::{FormParameters, StoryResult},
    options::FormOptions,
    orchestrator::FallbackOrchestrator,
};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<FallbackOrchestrator>,
    /// Cancelled on shutdown; every generation runs under a child token.
    pub shutdown: CancellationToken,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/story", post(generate_story))
        .route("/api/story/export", post(export_story))
        .route("/api/options", get(form_options))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

pub async fn generate_story(
    State(state): State<AppState>,
    Json(params): Json<FormParameters>,
) -> Result<Json<StoryResult>, ApiError> {
    let missing = params.missing_fields();
    if !missing.is_empty() {
        tracing::info!(?missing, "Rejecting incomplete story form");
        return Err(ApiError::MissingFields(missing));
    }

    tracing::info!("🚀 Generating story: {}", params.film_title);
    let cancel = state.shutdown.child_token();
    let story = state.orchestrator.generate_with_cancel(&params, &cancel).await?;
    Ok(Json(story))
}

pub async fn export_story(Json(story): Json<StoryResult>) -> Result<Response, ApiError> {
    let body = export_json(&story)?;
    let filename = export_filename(&story.film_title);

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    // The sanitized name is pure ASCII, so it is always a valid header value.
    if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename)) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    Ok((StatusCode::OK, headers, body).into_response())
}

pub async fn form_options() -> Json<FormOptions> {
    Json(FormOptions::default())
}
