//! Application error taxonomy and HTTP response mapping.
//!
//! Every business-rule violation is raised as a typed [`AppError`] at the
//! point of detection and translated to a response here. Errors are never
//! retried; internal failures are logged and surfaced without detail.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: &'static str,
}

/// Closed set of application failures, each mapped to one HTTP status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("email already taken")]
    EmailAlreadyTaken,
    #[error("invalid password")]
    InvalidPassword,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("access denied")]
    AccessDenied,
    #[error("invalid request data")]
    NotValidData,
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::EmailAlreadyTaken
            | AppError::InvalidPassword
            | AppError::InvalidRefreshToken
            | AppError::NotValidData => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AccessDenied => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::EmailAlreadyTaken => "email_already_taken",
            AppError::InvalidPassword => "invalid_password",
            AppError::InvalidRefreshToken => "invalid_refresh_token",
            AppError::NotFound(_) => "not_found",
            AppError::AccessDenied => "access_denied",
            AppError::NotValidData => "not_valid_data",
            AppError::Internal(_) => "internal_error",
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            AppError::EmailAlreadyTaken => "Email already taken",
            AppError::InvalidPassword => "Invalid password",
            AppError::InvalidRefreshToken => "Invalid refresh token",
            AppError::NotFound(_) => "Not found",
            AppError::AccessDenied => "Access denied",
            AppError::NotValidData => "Request data failed validation",
            AppError::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal(detail) => tracing::error!("internal error: {detail}"),
            other => tracing::info!("request failed: {other}"),
        }

        let body = ErrorBody {
            error: ErrorInfo {
                code: self.code(),
                message: self.public_message(),
            },
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(_: validator::ValidationErrors) -> Self {
        AppError::NotValidData
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            // The only user-triggerable unique constraint is the account
            // email; short ids are derived from the assigned id and cannot
            // collide.
            if db.constraint() == Some("accounts_email_key") {
                return AppError::EmailAlreadyTaken;
            }
        }

        AppError::internal(format!("database error: {e}"))
    }
}
