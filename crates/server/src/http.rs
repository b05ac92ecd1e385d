//! HTTP Endpoints
//!
//! REST API for the chat pipeline.

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Json, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use patio_pipeline::{ChatRequest, ChatResponse};

use crate::metrics::{metrics_handler, record_http_status};
use crate::state::AppState;
use crate::ServerError;

pub const WELCOME_TEXT: &str = "Welcome to the Patio Backend!";

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let config = state.get_config();
    let cors_layer = build_cors_layer(&config.server.cors_origins, config.server.cors_enabled);
    let body_limit = config.server.max_body_bytes;

    Router::new()
        .route("/", get(welcome))
        .route("/api/chat", post(chat))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configuration
///
/// - If cors_enabled is false, returns a permissive layer
/// - If cors_origins is empty, defaults to localhost:3000
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::debug!("CORS restrictions disabled - allowing all origins");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if parsed_origins.is_empty() {
        tracing::info!("No usable CORS origins configured, defaulting to localhost:3000");
        return layer.allow_origin(HeaderValue::from_static("http://localhost:3000"));
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    layer.allow_origin(parsed_origins)
}

async fn welcome() -> &'static str {
    WELCOME_TEXT
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Chat endpoint
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let response = match run_chat(&state, payload).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(err) => {
            match &err {
                ServerError::InvalidRequest(msg) | ServerError::PayloadTooLarge(msg) => {
                    tracing::warn!(error = %msg, "Rejected chat request")
                }
                other => tracing::error!(error = %other, "Chat request failed"),
            }
            err.into_response()
        }
    };

    record_http_status(response.status());
    response
}

async fn run_chat(
    state: &AppState,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<ChatResponse, ServerError> {
    let Json(request) = payload.map_err(|e| match e.status() {
        StatusCode::PAYLOAD_TOO_LARGE => ServerError::PayloadTooLarge(e.body_text()),
        _ => ServerError::InvalidRequest(e.body_text()),
    })?;
    let validated = request.validate()?;
    Ok(state.pipeline.process(validated).await?)
}

/// Health check
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "synthesizeAudio": state.pipeline.config().synthesize_audio,
    }))
}
