//! Account administration service.

use std::sync::Arc;

use crate::domain::entities::Role;
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;

/// Service for account-level administration.
///
/// Role checks themselves are pure functions over [`Role`]; callers gate
/// admin-only operations before invoking this service.
pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
}

impl AccountService {
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self { accounts }
    }

    /// Assigns a role to an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the account does not exist.
    pub async fn set_role(&self, account_id: i64, role: Role) -> Result<(), AppError> {
        if self.accounts.find_by_id(account_id).await?.is_none() {
            return Err(AppError::not_found("account"));
        }
        self.accounts.set_role(account_id, role).await
    }
}
