//! Payloads for link creation.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/v1/links`.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub long_url: String,
    /// Optional custom short code; validated server-side.
    #[serde(default)]
    pub custom_code: Option<String>,
}

/// Response body for a created (or deduplicated) short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub short_url: String,
    pub long_url: String,
}
