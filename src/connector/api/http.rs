use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::AnalysisResult;

use super::container::Container;
use super::controller::{to_history, HistoryEntry};

type ApiError = (StatusCode, String);

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    /// Bare base64 or a `data:` URL.
    pub image: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageResponse {
    pub analysis: String,
}

#[derive(Debug, Deserialize)]
pub struct SiteRequest {
    pub url: String,
}

/// JSON routes over the three adapters. Adapter failures are answered with
/// their fallback content and status 200; only blank input is a 400.
pub fn http_router(container: Arc<Container>) -> axum::Router {
    axum::Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/analyze/image", post(analyze_image))
        .route("/api/analyze/site", post(analyze_site))
        .with_state(container)
}

pub async fn serve(container: Arc<Container>, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("HTTP API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, http_router(container)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn chat(
    State(container): State<Arc<Container>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "message must not be empty".to_string()));
    }
    debug!("POST /api/chat with {} history turns", request.history.len());

    let history = to_history(request.history);
    let reply = container
        .chat_use_case()
        .send_message(&history, &request.message)
        .await;
    Ok(Json(ChatResponse { reply }))
}

async fn analyze_image(
    State(container): State<Arc<Container>>,
    Json(request): Json<ImageRequest>,
) -> Json<ImageResponse> {
    let analysis = container.image_use_case().analyze_base64(&request.image).await;
    Json(ImageResponse { analysis })
}

async fn analyze_site(
    State(container): State<Arc<Container>>,
    Json(request): Json<SiteRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    if request.url.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "url must not be empty".to_string()));
    }
    debug!("POST /api/analyze/site for {}", request.url);

    let result = container.site_audit_use_case().analyze_site(&request.url).await;
    Ok(Json(result))
}
