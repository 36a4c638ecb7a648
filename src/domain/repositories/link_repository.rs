//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkUpdate, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing shortened links.
///
/// The short id starts out NULL and is filled in exactly once via
/// [`LinkRepository::set_short_id`] right after the numeric id has been
/// assigned; afterwards lookups by short id are a single indexed query.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new link with a NULL short id and returns it with the
    /// store-assigned numeric id.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Persists the derived short identifier for a freshly created link.
    async fn set_short_id(&self, id: i64, short_id: &str) -> Result<Link, AppError>;

    /// Finds a link by its numeric id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a link by its short identifier.
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>, AppError>;

    /// Lists the links owned by an account, newest first.
    async fn list_by_account(&self, account_id: i64) -> Result<Vec<Link>, AppError>;

    /// Overwrites the destination set of an existing link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no link matches `id`.
    async fn update(&self, id: i64, update: LinkUpdate) -> Result<Link, AppError>;

    /// Deletes a link and its visit records.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;
}
