//! Request and response payloads.

pub mod health;
pub mod shorten;
pub mod stats;

pub use health::{CheckStatus, HealthChecks, HealthResponse};
pub use shorten::{ShortenRequest, ShortenResponse};
pub use stats::StatsResponse;
