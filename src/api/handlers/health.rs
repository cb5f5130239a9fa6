//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: Runs a link count query
/// 2. **Click Queue**: Reports capacity and total dropped events; degraded
///    once the queue has been closed
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let queue_check = check_click_queue(&state);

    let all_healthy = db_check.status == "ok" && queue_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            click_queue: queue_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks database connectivity by counting links.
async fn check_database(state: &AppState) -> CheckStatus {
    match state.stats_service.count_links().await {
        Ok(count) => CheckStatus {
            status: "ok".to_string(),
            message: format!("Connected, {} links", count),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: format!("Database error: {}", e),
        },
    }
}

/// Reports click queue capacity and drop count.
fn check_click_queue(state: &AppState) -> CheckStatus {
    if state.clicks.is_closed() {
        CheckStatus {
            status: "error".to_string(),
            message: "Queue closed".to_string(),
        }
    } else {
        CheckStatus {
            status: "ok".to_string(),
            message: format!(
                "Capacity: {}, dropped: {}",
                state.clicks.capacity(),
                state.clicks.dropped()
            ),
        }
    }
}
