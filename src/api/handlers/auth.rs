//! Handlers for authentication and session endpoints.

use axum::{Json, extract::State, http::StatusCode};
use axum::extract::Extension;
use validator::Validate;

use crate::api::dto::auth::{
    PasswordChangeRequest, RefreshRequest, SignInRequest, SignUpRequest, TokenResponse,
};
use crate::application::services::AuthIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account and opens its first session.
///
/// # Endpoint
///
/// `POST /api/v1/auth/signup`
///
/// # Errors
///
/// Returns 409 Conflict when the email is taken or validation fails.
pub async fn sign_up_handler(
    State(state): State<AppState>,
    Json(payload): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    payload.validate()?;

    let tokens = state
        .auth_service
        .sign_up(payload.email, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(TokenResponse::from(tokens))))
}

/// Opens a session with existing credentials, replacing any prior session
/// for the account.
///
/// # Endpoint
///
/// `POST /api/v1/auth/signin`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown email, 409 Conflict on a wrong
/// password.
pub async fn sign_in_handler(
    State(state): State<AppState>,
    Json(payload): Json<SignInRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let tokens = state
        .auth_service
        .sign_in(payload.email, payload.password)
        .await?;

    Ok(Json(TokenResponse::from(tokens)))
}

/// Rotates a session: exchanges a valid refresh token for a new pair.
///
/// # Endpoint
///
/// `POST /api/v1/auth/refresh`
///
/// # Errors
///
/// Returns 409 Conflict when the token is invalid, expired, already rotated
/// away, or loses a concurrent rotation race.
pub async fn refresh_handler(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let tokens = state.auth_service.refresh(&payload.refresh_token).await?;

    Ok(Json(TokenResponse::from(tokens)))
}

/// Closes the caller's session.
///
/// # Endpoint
///
/// `POST /api/v1/auth/signout`
pub async fn sign_out_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
) -> Result<StatusCode, AppError> {
    state.auth_service.sign_out(identity.account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Changes the caller's password. The current session stays valid.
///
/// # Endpoint
///
/// `POST /api/v1/auth/password`
///
/// # Errors
///
/// Returns 409 Conflict when the old password does not match or the new one
/// fails validation.
pub async fn password_change_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    Json(payload): Json<PasswordChangeRequest>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;

    state
        .auth_service
        .set_password(
            identity.account_id,
            &payload.old_password,
            &payload.new_password,
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
