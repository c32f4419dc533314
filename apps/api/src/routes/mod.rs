pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::dashboard::handlers as dashboard;
use crate::state::AppState;

/// Upper bound on any request body. Image size rules are enforced by
/// validation below this, so oversized images still get a typed error.
pub const MAX_REQUEST_BYTES: usize = 8 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Dashboard
        .route(
            "/",
            get(dashboard::handle_index).post(dashboard::handle_analyze),
        )
        .route("/download", post(dashboard::handle_download))
        // JSON API
        .route("/api/v1/analyze/text", post(analysis::handle_analyze_text))
        .route("/api/v1/analyze/image", post(analysis::handle_analyze_image))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(state)
}
