//! Tests for the Gemini HTTP gateway against a local stand-in server.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::Json;
use serde_json::{json, Value};

use accessaudit::{
    ChatMessage, ChatSessionUseCase, GatewayConfig, GeminiGateway, ModelGateway, SiteAuditUseCase,
};

#[derive(Debug, Clone)]
struct Captured {
    path: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    reply: Value,
    delay: Duration,
    captured: Arc<Mutex<Vec<Captured>>>,
}

async fn fake_generate(
    State(state): State<FakeState>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.captured.lock().unwrap().push(Captured {
        path: uri.path().to_string(),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body,
    });
    tokio::time::sleep(state.delay).await;
    (state.status, Json(state.reply.clone()))
}

/// Start a stand-in server and return its base URL and the captured requests.
async fn spawn_fake(
    status: StatusCode,
    reply: Value,
    delay: Duration,
) -> (String, Arc<Mutex<Vec<Captured>>>) {
    let captured = Arc::new(Mutex::new(Vec::new()));
    let state = FakeState {
        status,
        reply,
        delay,
        captured: captured.clone(),
    };
    let app = axum::Router::new().fallback(fake_generate).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), captured)
}

fn text_reply(text: &str) -> Value {
    json!({
        "candidates": [
            { "content": { "role": "model", "parts": [ { "text": text } ] }, "finishReason": "STOP" }
        ]
    })
}

fn gateway(base_url: &str, timeout: Duration) -> Arc<GeminiGateway> {
    Arc::new(GeminiGateway::new(GatewayConfig {
        api_key: "test-key".to_string(),
        model: "gemini-test".to_string(),
        base_url: base_url.to_string(),
        timeout,
    }))
}

#[tokio::test]
async fn test_chat_request_reaches_generate_content_endpoint() {
    let (base_url, captured) =
        spawn_fake(StatusCode::OK, text_reply("Добрый день!"), Duration::ZERO).await;
    let use_case = ChatSessionUseCase::new(gateway(&base_url, Duration::from_secs(5)));

    let history = vec![ChatMessage::user("Привет"), ChatMessage::model("Здравствуйте")];
    let reply = use_case.send_message(&history, "Что такое POUR?").await;
    assert_eq!(reply, "Добрый день!");

    let captured = captured.lock().unwrap();
    assert_eq!(captured.len(), 1);
    let call = &captured[0];
    assert_eq!(call.path, "/v1beta/models/gemini-test:generateContent");
    assert_eq!(call.api_key.as_deref(), Some("test-key"));
    assert!(call.body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("WCAG 2.2"));
    let contents = call.body["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[1]["role"], "model");
    assert_eq!(contents[2]["parts"][0]["text"], "Что такое POUR?");
}

#[tokio::test]
async fn test_site_audit_round_trip_through_http_gateway() {
    let audit = r#"{"score": 82, "errors": [], "warnings": ["Мелкий шрифт"], "passes": ["Клавиатура"], "summary": "Хорошо"}"#;
    let (base_url, captured) = spawn_fake(StatusCode::OK, text_reply(audit), Duration::ZERO).await;
    let use_case = SiteAuditUseCase::new(gateway(&base_url, Duration::from_secs(5)));

    let result = use_case.analyze_site("example.kz").await;
    assert_eq!(result.score(), 82);
    assert_eq!(result.warnings(), ["Мелкий шрифт".to_string()]);

    let captured = captured.lock().unwrap();
    let body = &captured[0].body;
    assert!(body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("example.kz"));
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(
        body["generationConfig"]["responseSchema"]["required"],
        json!(["score", "errors", "warnings", "passes", "summary"])
    );
    assert_eq!(
        body["generationConfig"]["responseSchema"]["properties"]["errors"]["items"]["type"],
        "STRING"
    );
}

#[tokio::test]
async fn test_error_status_is_transport_error() {
    let (base_url, _) = spawn_fake(
        StatusCode::UNAUTHORIZED,
        json!({ "error": { "code": 401, "message": "API key not valid" } }),
        Duration::ZERO,
    )
    .await;
    let gateway = gateway(&base_url, Duration::from_secs(5));

    let request = accessaudit::GenerationRequest::new(gateway.model())
        .with_content(accessaudit::Content::user_text("hi"));
    let err = gateway.complete(request).await.unwrap_err();
    assert!(err.is_transport());

    let result = SiteAuditUseCase::new(gateway).analyze_site("example.kz").await;
    assert_eq!(result.score(), 0);
    assert_eq!(result.errors().len(), 1);
}

#[tokio::test]
async fn test_candidate_without_text_is_empty_response() {
    let (base_url, _) = spawn_fake(
        StatusCode::OK,
        json!({ "candidates": [ { "finishReason": "SAFETY" } ] }),
        Duration::ZERO,
    )
    .await;
    let gateway = gateway(&base_url, Duration::from_secs(5));

    let request = accessaudit::GenerationRequest::new(gateway.model())
        .with_content(accessaudit::Content::user_text("hi"));
    let err = gateway.complete(request).await.unwrap_err();
    assert!(err.is_empty_response());
}

#[tokio::test]
async fn test_slow_service_hits_timeout() {
    let (base_url, _) =
        spawn_fake(StatusCode::OK, text_reply("too late"), Duration::from_secs(3)).await;
    let use_case = ChatSessionUseCase::new(gateway(&base_url, Duration::from_millis(200)));

    let reply = use_case.send_message(&[], "Привет").await;
    assert_eq!(reply, accessaudit::application::CHAT_TRANSPORT_FALLBACK);
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = gateway(&format!("http://{addr}"), Duration::from_secs(2));
    let request = accessaudit::GenerationRequest::new(gateway.model())
        .with_content(accessaudit::Content::user_text("hi"));
    let err = gateway.complete(request).await.unwrap_err();
    assert!(err.is_transport());
}
