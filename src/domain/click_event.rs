//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

/// An in-memory representation of a click event for async processing.
///
/// Used to pass click information from HTTP handlers to the background
/// workers via a bounded queue. This decouples the HTTP response from
/// database writes, allowing fast redirects without blocking.
///
/// Events are consumed exactly once by exactly one worker, or dropped when
/// the queue is full; they are never persisted directly and never retried.
///
/// # Design
///
/// - `occurred_at` is stamped by the producer at enqueue time; a worker
///   assigns its own timestamp only when it is absent
/// - Client metadata is optional to handle missing headers gracefully
/// - Cloneable for sending across async boundaries
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub link_id: i64,
    pub occurred_at: Option<DateTime<Utc>>,
    pub user_agent: Option<String>,
    pub ip: Option<String>,
}

impl ClickEvent {
    /// Creates a click event stamped with the current time.
    ///
    /// This is the constructor used on the redirect path.
    pub fn now(link_id: i64, user_agent: Option<&str>, ip: Option<String>) -> Self {
        Self {
            link_id,
            occurred_at: Some(Utc::now()),
            user_agent: user_agent.map(|s| s.to_string()),
            ip,
        }
    }
}
