//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::Redirect,
};
use std::net::SocketAddr;

use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Click Tracking
///
/// After resolving the link, a click event is submitted to the bounded
/// analytics queue. The submission is fire-and-forget: a full or closed
/// queue drops the event and the redirect proceeds unaffected, keeping
/// redirect latency independent of analytics persistence.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Redirect, AppError> {
    let link = state.link_service.get_link_by_code(&code).await?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    let event = ClickEvent::now(link.id, user_agent, Some(addr.ip().to_string()));
    let _ = state.clicks.submit(event);

    Ok(Redirect::temporary(&link.long_url))
}
