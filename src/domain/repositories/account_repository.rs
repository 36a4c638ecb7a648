//! Repository trait for account data access.

use crate::domain::entities::{Account, NewAccount, Role};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for account storage.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccountRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EmailAlreadyTaken`] when the email is on file.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError>;

    /// Finds an account by its numeric id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError>;

    /// Finds an account by its email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    /// Checks whether an account with the given email exists.
    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;

    /// Replaces an account's password credential.
    async fn set_password(&self, id: i64, password: &str) -> Result<(), AppError>;

    /// Replaces an account's role.
    async fn set_role(&self, id: i64, role: Role) -> Result<(), AppError>;
}
