//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, service wiring, and Axum server lifecycle.

use crate::application::services::{AccountService, AuthService, LinkService};
use crate::application::token_manager::TokenManager;
use crate::config::Config;
use crate::infrastructure::persistence::{
    PgAccountRepository, PgLinkRepository, PgSessionRepository, PgVisitRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Repositories and services
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations applied");

    let pool = Arc::new(pool);
    let accounts = Arc::new(PgAccountRepository::new(pool.clone()));
    let links = Arc::new(PgLinkRepository::new(pool.clone()));
    let visits = Arc::new(PgVisitRepository::new(pool.clone()));
    let sessions = Arc::new(PgSessionRepository::new(pool.clone()));

    let tokens = Arc::new(TokenManager::new(
        &config.jwt_access_secret,
        &config.jwt_refresh_secret,
    ));

    let state = AppState::new(
        Arc::new(AuthService::new(accounts.clone(), sessions, tokens)),
        Arc::new(LinkService::new(links, accounts.clone(), visits)),
        Arc::new(AccountService::new(accounts)),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
