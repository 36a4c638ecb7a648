//! Repository trait for the per-account session store.

use crate::domain::entities::Session;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the single-active-session store.
///
/// One record per account id. Issuance is expressed as delete-then-insert;
/// rotation is a single conditional overwrite so two racing refresh calls
/// cannot both keep a valid pair.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds the session record for an account, if any.
    async fn find_by_account_id(&self, account_id: i64) -> Result<Option<Session>, AppError>;

    /// Inserts a new session record. Any prior record for the account must
    /// have been deleted first.
    async fn insert(&self, session: Session) -> Result<(), AppError>;

    /// Atomically overwrites the session record in place, conditional on the
    /// stored refresh token still being `current_refresh_token`.
    ///
    /// Returns `false` when no row matched, i.e. the token was already
    /// rotated away or the session is gone. The caller must treat that as a
    /// rejected refresh; no partial state is committed.
    async fn rotate(
        &self,
        current_refresh_token: &str,
        next: Session,
    ) -> Result<bool, AppError>;

    /// Deletes the session record for an account. Not an error when none
    /// exists.
    async fn delete_by_account_id(&self, account_id: i64) -> Result<(), AppError>;
}
