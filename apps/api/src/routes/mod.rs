pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

/// Resume uploads exceed axum's 2 MB default.
const UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/jobs/extract", post(handlers::handle_extract))
        // Individual path
        .route(
            "/api/v1/individual/generate",
            post(handlers::handle_individual_generate),
        )
        .route(
            "/api/v1/individual/send",
            post(handlers::handle_individual_send),
        )
        // Organization path
        .route(
            "/api/v1/organization/generate",
            post(handlers::handle_organization_generate),
        )
        .route(
            "/api/v1/organization/send",
            post(handlers::handle_organization_send),
        )
        .layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES))
        .with_state(state)
}
