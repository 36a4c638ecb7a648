//! Account entity and role model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access level of an account.
///
/// Plain enumerated value; permission checks are pure functions over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Premium,
    Standard,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Premium => "premium",
            Role::Standard => "standard",
        }
    }

    /// Whether this role may administer other accounts.
    pub fn can_manage_accounts(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "admin" => Ok(Role::Admin),
            "premium" => Ok(Role::Premium),
            "standard" => Ok(Role::Standard),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// A registered account owning shortened links.
///
/// The password is an opaque credential compared byte-for-byte on sign-in.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub password: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub role: Role,
}
