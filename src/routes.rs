//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{short_id}`  - Short link redirect (public)
//! - `GET  /health`      - Health check (public)
//! - `/api/v1/*`         - REST API (Bearer token required except for
//!   signup/signin/refresh)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer access token resolved against the session store
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let api_router = api::routes::public_routes().merge(protected);

    let router = Router::new()
        .route("/{short_id}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api/v1", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
