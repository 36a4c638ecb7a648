//! Handlers for account administration endpoints.

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
};

use crate::api::dto::account::SetRoleRequest;
use crate::application::services::AuthIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Changes an account's role.
///
/// # Endpoint
///
/// `POST /api/v1/users/{id}/role`
///
/// # Errors
///
/// Returns 403 Forbidden unless the caller holds the admin role, and
/// 404 Not Found for an unknown target account.
pub async fn set_role_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    Path(account_id): Path<i64>,
    Json(payload): Json<SetRoleRequest>,
) -> Result<StatusCode, AppError> {
    if !identity.role.can_manage_accounts() {
        return Err(AppError::AccessDenied);
    }

    state
        .account_service
        .set_role(account_id, payload.role)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
