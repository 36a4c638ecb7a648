//! Repository trait for visit records.

use crate::domain::entities::{NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for append-only visit records.
///
/// Visits need no cross-request coordination: concurrent resolutions of the
/// same short id simply append independent rows.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Appends one visit record for a link.
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, AppError>;

    /// Returns the visits of a link inside a half-open time range
    /// (`from` inclusive, `to` exclusive), oldest first.
    async fn find_by_link_in_range(
        &self,
        link_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Visit>, AppError>;
}
