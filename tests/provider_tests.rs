//! [`HttpProvider`] against a local axum server standing in for each backend.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use film_story_generator::{
    build_prompt, AppConfig, FallbackOrchestrator, FormParameters, HttpProvider, ProviderAdapter,
    ProviderError, ProviderSpec,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;

#[derive(Debug)]
struct Captured {
    headers: HeaderMap,
    query: HashMap<String, String>,
    body: Value,
}

type Capture = Arc<Mutex<Option<Captured>>>;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Serves `reply` (status + body) on every path, recording the request.
async fn fake_backend(status: StatusCode, reply: String) -> (String, Capture) {
    let capture: Capture = Arc::default();
    let handler = move |State(capture): State<Capture>,
                        Query(query): Query<HashMap<String, String>>,
                        headers: HeaderMap,
                        Json(body): Json<Value>| {
        let reply = reply.clone();
        async move {
            *capture.lock().unwrap() = Some(Captured { headers, query, body });
            (status, reply).into_response()
        }
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(handler.clone()))
        .route("/v1/models/:model", post(handler))
        .with_state(capture.clone());
    (spawn(app).await, capture)
}

fn chat_envelope(content: &str) -> String {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] }).to_string()
}

fn provider(spec: ProviderSpec) -> HttpProvider {
    HttpProvider::new(spec, Duration::from_secs(5)).unwrap()
}

fn prompt() -> film_story_generator::Prompt {
    build_prompt(&FormParameters { film_title: "Test".into(), ..Default::default() })
}

#[tokio::test]
async fn chat_completion_uses_bearer_auth_and_message_list() {
    let (base, capture) = fake_backend(StatusCode::OK, chat_envelope("the story")).await;
    let spec = ProviderSpec::deepseek(&format!("{base}/v1"), "deepseek-chat", Some("sk-test".into()));

    let text = provider(spec).send(&prompt()).await.unwrap();

    assert_eq!(text, "the story");
    let captured = capture.lock().unwrap().take().unwrap();
    assert_eq!(captured.headers["authorization"], "Bearer sk-test");
    assert_eq!(captured.body["model"], "deepseek-chat");
    assert_eq!(captured.body["messages"][0]["role"], "user");
    assert!(captured.body["messages"][0]["content"].as_str().unwrap().contains("Test"));
    assert_eq!(captured.body["max_tokens"], 6000);
    assert!(captured.query.is_empty());
}

#[tokio::test]
async fn openrouter_sends_referer_and_title() {
    let (base, capture) = fake_backend(StatusCode::OK, chat_envelope("ok")).await;
    let spec = ProviderSpec::openrouter(&format!("{base}/v1"), "openai/gpt-4o", Some("sk-or".into()));

    provider(spec).send(&prompt()).await.unwrap();

    let captured = capture.lock().unwrap().take().unwrap();
    assert_eq!(captured.headers["http-referer"], "https://film-story-generator.com");
    assert_eq!(captured.headers["x-title"], "Film Story Generator");
    assert_eq!(captured.body["model"], "openai/gpt-4o");
}

#[tokio::test]
async fn generate_content_puts_key_in_query() {
    let envelope = json!({ "candidates": [{ "content": { "parts": [{ "text": "gemini story" }] } }] });
    let (base, capture) = fake_backend(StatusCode::OK, envelope.to_string()).await;
    let spec = ProviderSpec::gemini(&format!("{base}/v1"), "gemini-1.5-flash", Some("g-key".into()));

    let text = provider(spec).send(&prompt()).await.unwrap();

    assert_eq!(text, "gemini story");
    let captured = capture.lock().unwrap().take().unwrap();
    assert_eq!(captured.query.get("key").map(String::as_str), Some("g-key"));
    assert!(captured.headers.get("authorization").is_none());
    assert!(captured.body["contents"][0]["parts"][0]["text"].as_str().unwrap().contains("Test"));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let (base, _) = fake_backend(StatusCode::SERVICE_UNAVAILABLE, "overloaded".into()).await;
    let spec = ProviderSpec::deepseek(&format!("{base}/v1"), "deepseek-chat", Some("sk".into()));

    let err = provider(spec).send(&prompt()).await.unwrap_err();

    match err {
        ProviderError::HttpStatus { status, status_text } => {
            assert_eq!(status, 503);
            assert_eq!(status_text, "Service Unavailable");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_content_is_empty_content() {
    let (base, _) = fake_backend(StatusCode::OK, json!({ "choices": [] }).to_string()).await;
    let spec = ProviderSpec::deepseek(&format!("{base}/v1"), "deepseek-chat", Some("sk".into()));

    let err = provider(spec).send(&prompt()).await.unwrap_err();
    assert!(matches!(err, ProviderError::EmptyContent));
}

#[tokio::test]
async fn non_json_envelope_is_malformed() {
    let (base, _) = fake_backend(StatusCode::OK, "<html>gateway</html>".into()).await;
    let spec = ProviderSpec::deepseek(&format!("{base}/v1"), "deepseek-chat", Some("sk".into()));

    let err = provider(spec).send(&prompt()).await.unwrap_err();
    assert!(matches!(err, ProviderError::MalformedEnvelope(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_failure_without_leaking_key() {
    // Nothing listens on the discard port.
    let spec = ProviderSpec::gemini("http://127.0.0.1:9/v1", "gemini-1.5-flash", Some("secret-key".into()));

    let err = provider(spec).send(&prompt()).await.unwrap_err();

    match err {
        ProviderError::TransportFailure(msg) => assert!(!msg.contains("secret-key")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn query_key_is_redacted_in_encoded_form_too() {
    let spec = ProviderSpec::gemini("http://127.0.0.1:9/v1", "gemini-1.5-flash", Some("sk+/=key".into()));

    let err = provider(spec).send(&prompt()).await.unwrap_err();

    match err {
        ProviderError::TransportFailure(msg) => {
            assert!(!msg.contains("sk+/=key"), "{msg}");
            assert!(!msg.contains("sk%2B%2F%3Dkey"), "{msg}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn silent_backend_times_out_as_transport_failure() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { std::future::pending::<StatusCode>().await }),
    );
    let base = spawn(app).await;
    let spec = ProviderSpec::deepseek(&format!("{base}/v1"), "deepseek-chat", Some("sk-test".into()));
    let provider = HttpProvider::new(spec, Duration::from_millis(300)).unwrap();

    let err = tokio::time::timeout(Duration::from_secs(10), provider.send(&prompt()))
        .await
        .expect("client timeout should fire first")
        .unwrap_err();

    assert!(matches!(err, ProviderError::TransportFailure(_)), "{err:?}");
}

#[tokio::test]
async fn configured_chain_skips_keyless_providers_end_to_end() {
    let reply = chat_envelope("Sure! {\"film_title\": \"Live\", \"total_scenes\": 8}");
    let (base, _) = fake_backend(StatusCode::OK, reply).await;
    let vars: HashMap<&str, String> = HashMap::from([
        ("GEMINI_API_BASE", format!("{base}/v1")),
        ("DEEPSEEK_API_BASE", format!("{base}/v1")),
        ("OPENROUTER_API_BASE", format!("{base}/v1")),
        ("OPENROUTER_API_KEY", "sk-or".to_string()),
    ]);
    let config = AppConfig::from_lookup(|name| vars.get(name).cloned());
    let orchestrator = FallbackOrchestrator::from_config(&config).unwrap();

    let story = orchestrator
        .generate(&FormParameters { film_title: "Live".into(), ..Default::default() })
        .await
        .unwrap();

    assert_eq!(story.film_title, "Live");
    assert_eq!(orchestrator.provider_names(), ["Gemini", "DeepSeek", "OpenRouter"]);
}
