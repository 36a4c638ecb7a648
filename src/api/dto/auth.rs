//! DTOs for authentication and session endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::application::services::AuthTokens;

/// Compiled regex for email validation.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+$").unwrap());

/// Request to register a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(regex(path = "*EMAIL_REGEX", message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Request to open a session with existing credentials.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Request to rotate a session with a refresh token.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request to change the account password.
#[derive(Debug, Deserialize, Validate)]
pub struct PasswordChangeRequest {
    pub old_password: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// A freshly issued access/refresh token pair.
///
/// `registration` is true only when the pair was minted by signup.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub registration: bool,
}

impl From<AuthTokens> for TokenResponse {
    fn from(tokens: AuthTokens) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            registration: tokens.registration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_validation() {
        let ok = SignUpRequest {
            email: "user@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = SignUpRequest {
            email: "not an email".to_string(),
            password: "password123".to_string(),
        };
        assert!(bad_email.validate().is_err());

        let short_password = SignUpRequest {
            email: "user@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_plus_addressing_accepted() {
        let req = SignUpRequest {
            email: "user+tag@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(req.validate().is_ok());
    }
}
