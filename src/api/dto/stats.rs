//! Payloads for link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Response body for `GET /api/v1/links/{code}/stats`.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub long_url: String,
    pub total_clicks: i64,
    pub created_at: DateTime<Utc>,
}
