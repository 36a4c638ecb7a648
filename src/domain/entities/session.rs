//! Session entity holding the single active token pair for an account.

/// The persisted (access, refresh) pair currently valid for an account.
///
/// Keyed uniquely by account id: creating a new session destroys any prior
/// one, so at most one live session exists per account at all times.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Session {
    pub account_id: i64,
    pub access_token: String,
    pub refresh_token: String,
}

impl Session {
    pub fn new(account_id: i64, access_token: String, refresh_token: String) -> Self {
        Self {
            account_id,
            access_token,
            refresh_token,
        }
    }
}
