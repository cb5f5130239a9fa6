//! Handler for short link creation.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link from a long URL.
///
/// # Endpoint
///
/// `POST /api/v1/links`
///
/// Shortening an already-known URL returns the existing link rather than
/// creating a duplicate, so the endpoint is idempotent per normalized URL.
///
/// # Errors
///
/// Returns 400 Bad Request for an invalid URL or custom code.
/// Returns 409 Conflict if the custom code is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(request): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let link = state
        .link_service
        .create_short_link(request.long_url, request.custom_code)
        .await?;

    let response = ShortenResponse {
        short_url: format!("{}/{}", state.base_url.trim_end_matches('/'), link.code),
        short_code: link.code,
        long_url: link.long_url,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
