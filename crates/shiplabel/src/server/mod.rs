mod auth;
mod error;
mod generation;
mod labels;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get, post};
use axum::{Json, Router};
use tokio::sync::Mutex;
use tower_http::cors::{AllowOrigin, CorsLayer};

use shiplabel_core::orchestrator::GenerationOrchestrator;
use shiplabel_core::store::LabelStore;

// ==============================================================================
// Application State
// ==============================================================================

pub struct AppState {
    pub store: Arc<dyn LabelStore>,
    /// One request in flight per orchestrator instance; the mutex
    /// serializes submit/confirm/cancel against that single instance.
    pub orchestrator: Arc<Mutex<GenerationOrchestrator>>,
    pub api_token: String,
}

type SharedState = Arc<AppState>;

// ==============================================================================
// Router
// ==============================================================================

pub fn build_router(state: AppState, origin: &str) -> Router {
    // Only reflect the allowed origin when the request's Origin header
    // actually matches. Otherwise, omit the header entirely so browsers
    // get a clean CORS rejection instead of a mismatched origin value.
    let allowed: axum::http::HeaderValue = origin.parse().expect("valid origin header value");
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate({
            let allowed = allowed.clone();
            move |request_origin: &axum::http::HeaderValue, _| *request_origin == allowed
        }))
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::HeaderName::from_static("x-api-token"),
            axum::http::header::HeaderName::from_static("x-requester-id"),
            axum::http::header::HeaderName::from_static("x-organization"),
        ]);

    let shared = Arc::new(state);

    let public_api = Router::new().route("/api/v1/health", get(health));

    // Generation bodies are small; a tight limit keeps oversized spec
    // lists from tying up the writer.
    const GENERATION_BODY_LIMIT: usize = 256 * 1024;

    let generation_routes = Router::new()
        .route("/api/v1/generation", post(generation::submit_generation))
        .route(
            "/api/v1/generation/confirm",
            post(generation::confirm_generation),
        )
        .route(
            "/api/v1/generation/cancel",
            post(generation::cancel_generation),
        )
        .route(
            "/api/v1/generation/state",
            get(generation::generation_state),
        )
        .layer(DefaultBodyLimit::max(GENERATION_BODY_LIMIT));

    let protected_api = Router::new()
        .route("/api/v1/labels/{document}", get(labels::list_document_labels))
        .route("/api/v1/barcode/{access_key}", get(labels::get_barcode))
        .merge(generation_routes);

    Router::new()
        .merge(public_api)
        .merge(protected_api)
        .route("/api", any(api_not_found))
        .route("/api/{*path}", any(api_not_found))
        .fallback(api_not_found)
        .layer(cors)
        .with_state(shared)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn api_not_found() -> error::AppError {
    error::AppError::NotFound("API route not found".to_string())
}
