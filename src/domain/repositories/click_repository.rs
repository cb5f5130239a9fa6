//! Repository trait for click data access.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recording and counting clicks.
///
/// `create` is the storage collaborator of the ingestion workers: called once
/// per dequeued event, best-effort, never retried by the caller.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Inserts a new click record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Counts the total number of clicks recorded for a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_by_link(&self, link_id: i64) -> Result<i64, AppError>;
}
