use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{CatalogProvider, Recommender},
};

pub mod recommendations;

/// Shared application state
pub struct AppState {
    pub recommender: Recommender,
    pub catalog: Arc<dyn CatalogProvider>,
    /// Limit applied when a request does not set one
    pub default_limit: usize,
    /// Largest limit a request may ask for
    pub max_limit: usize,
}

impl AppState {
    pub fn new(
        recommender: Recommender,
        catalog: Arc<dyn CatalogProvider>,
        default_limit: usize,
        max_limit: usize,
    ) -> Self {
        Self {
            recommender,
            catalog,
            default_limit,
            max_limit,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new().route("/recommendations", post(recommendations::recommend))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
