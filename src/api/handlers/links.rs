//! Handlers for link management and statistics endpoints.

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{
    CreateLinkRequest, LinkListResponse, LinkResponse, UpdateLinkRequest,
};
use crate::api::dto::stats::{StatsQuery, StatsResponse, VisitResponse};
use crate::application::services::AuthIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened link owned by the caller.
///
/// # Endpoint
///
/// `POST /api/v1/links`
///
/// The short identifier in the response is derived from the store-assigned
/// numeric id and is stable for the lifetime of the link.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.into_new_link(identity.account_id))
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/v1/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state
        .link_service
        .list_account_links(identity.account_id)
        .await?;

    Ok(Json(LinkListResponse {
        links: links.into_iter().map(LinkResponse::from).collect(),
    }))
}

/// Lists a user's links by user id.
///
/// # Endpoint
///
/// `GET /api/v1/users/{id}/links`
///
/// `{id}` is either the literal `self` or the caller's own numeric id;
/// anyone else's links are off limits.
pub async fn user_links_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    Path(user_id): Path<String>,
) -> Result<Json<LinkListResponse>, AppError> {
    if user_id != "self" && user_id.parse::<i64>() != Ok(identity.account_id) {
        return Err(AppError::AccessDenied);
    }

    let links = state
        .link_service
        .list_account_links(identity.account_id)
        .await?;

    Ok(Json(LinkListResponse {
        links: links.into_iter().map(LinkResponse::from).collect(),
    }))
}

/// Retrieves one of the caller's links.
///
/// # Endpoint
///
/// `GET /api/v1/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found for an unknown link, 403 Forbidden for a link
/// owned by another account.
pub async fn get_link_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    Path(link_id): Path<i64>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state
        .link_service
        .get_link(identity.account_id, link_id)
        .await?;

    Ok(Json(link.into()))
}

/// Replaces the destination set of one of the caller's links.
///
/// # Endpoint
///
/// `PUT /api/v1/links/{id}`
pub async fn update_link_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    Path(link_id): Path<i64>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .update_link(identity.account_id, link_id, payload.into())
        .await?;

    Ok(Json(link.into()))
}

/// Deletes one of the caller's links together with its visit records.
///
/// # Endpoint
///
/// `DELETE /api/v1/links/{id}`
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    Path(link_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state
        .link_service
        .delete_link(identity.account_id, link_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns classified visit records for one of the caller's links over an
/// inclusive calendar-date range.
///
/// # Endpoint
///
/// `GET /api/v1/links/{id}/statistics?start_date=2026-03-01&end_date=2026-03-10`
pub async fn link_statistics_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<AuthIdentity>,
    Path(link_id): Path<i64>,
    Query(range): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let visits = state
        .link_service
        .get_statistics(
            identity.account_id,
            link_id,
            range.start_date,
            range.end_date,
        )
        .await?;

    Ok(Json(StatsResponse {
        total: visits.len(),
        visits: visits.into_iter().map(VisitResponse::from).collect(),
    }))
}
