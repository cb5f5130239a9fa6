//! API route configuration.

use crate::api::handlers::{shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// REST API routes mounted under `/api/v1`.
///
/// # Endpoints
///
/// - `POST /links`               - Create a shortened URL
/// - `GET  /links/{code}/stats`  - Click statistics for a specific link
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/links", post(shorten_handler))
        .route("/links/{code}/stats", get(stats_handler))
}
