pub mod transfers;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::transfers::TransferService;

use crate::metrics;
use crate::openapi::ApiDoc;

/// Shared, read-only handler state.
#[derive(Clone)]
pub struct ServerState {
    pub transfers: Arc<TransferService>,
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK")))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics_handler() -> (StatusCode, String) {
    metrics::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        // Ambient routes (health, metrics, api docs)
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .route("/api-docs/openapi.json", get(openapi_json))
        // Transfer CRUD
        .route("/transfers", post(transfers::create))
        .route(
            "/transfers/:id",
            get(transfers::get_by_id).put(transfers::update).delete(transfers::delete),
        )
        .with_state(state)
        // Any origin, method and header; preflight answered here
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // One INFO span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                // Request arrived
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // Response sent, with status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and transport failures at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
