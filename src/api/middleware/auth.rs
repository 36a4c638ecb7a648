//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <access token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Validate signature and expiry against the access key
/// 3. Check the session store holds this exact token for the subject account
/// 4. Insert the resolved [`AuthIdentity`] into request extensions
/// 5. Continue to next middleware/handler
///
/// A token that passes signature checks but was rotated away or signed out
/// is rejected at step 3.
///
/// # Errors
///
/// Returns 403 Forbidden if the header is missing or any check fails.
///
/// [`AuthIdentity`]: crate::application::services::AuthIdentity
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| AppError::AccessDenied)?;

    let identity = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
