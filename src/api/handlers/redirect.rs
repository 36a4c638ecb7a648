//! Handler for short link redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, Uri, header},
    response::IntoResponse,
};
use std::net::SocketAddr;

use crate::application::services::RequestMeta;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short identifier to its destination URL.
///
/// # Endpoint
///
/// `GET /{short_id}`
///
/// # Request Flow
///
/// 1. Look up the link by short identifier
/// 2. Classify the visitor (device, language, client IP, traffic source)
/// 3. Record exactly one visit
/// 4. Pick the destination for the device class
/// 5. Return 302 Found with a `Location` header
///
/// # Errors
///
/// Returns 404 Not Found if the short identifier doesn't exist. No visit
/// is recorded in that case.
pub async fn redirect_handler(
    Path(short_id): Path<String>,
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let meta = RequestMeta {
        peer_addr: addr.ip().to_string(),
        forwarded_for: header_str(&headers, "x-forwarded-for"),
        user_agent: header_str(&headers, header::USER_AGENT.as_str()),
        accept_language: header_str(&headers, header::ACCEPT_LANGUAGE.as_str()),
        referer: header_str(&headers, header::REFERER.as_str()),
        query: uri.query().map(str::to_string),
    };

    let destination = state.link_service.resolve(&short_id, &meta).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, destination)]))
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
