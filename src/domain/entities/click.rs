//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// A click recorded when a shortened link is accessed.
///
/// Captures metadata about each redirect for analytics purposes. Rows are
/// written once by the ingestion workers and never mutated afterwards.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

/// Input data for recording a new click.
///
/// Built by an ingestion worker from a
/// [`crate::domain::click_event::ClickEvent`]. The `link_id` must reference
/// an existing link; the id is assigned by storage.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}
