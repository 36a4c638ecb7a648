//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkUpdate, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, account_id, ios_url, android_url, desktop_url, \
                            default_url, description, short_id, created_at";

/// PostgreSQL repository for shortened links.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            r#"
            INSERT INTO links (account_id, ios_url, android_url, desktop_url, default_url, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {LINK_COLUMNS}
            "#,
        ))
        .bind(new_link.account_id)
        .bind(&new_link.ios_url)
        .bind(&new_link.android_url)
        .bind(&new_link.desktop_url)
        .bind(&new_link.default_url)
        .bind(&new_link.description)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn set_short_id(&self, id: i64, short_id: &str) -> Result<Link, AppError> {
        sqlx::query_as::<_, Link>(&format!(
            "UPDATE links SET short_id = $2 WHERE id = $1 RETURNING {LINK_COLUMNS}",
        ))
        .bind(id)
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found("link"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>, AppError> {
        let link = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE short_id = $1",
        ))
        .bind(short_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn list_by_account(&self, account_id: i64) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE account_id = $1 ORDER BY id DESC",
        ))
        .bind(account_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn update(&self, id: i64, update: LinkUpdate) -> Result<Link, AppError> {
        sqlx::query_as::<_, Link>(&format!(
            r#"
            UPDATE links
            SET ios_url = $2, android_url = $3, desktop_url = $4,
                default_url = $5, description = $6
            WHERE id = $1
            RETURNING {LINK_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&update.ios_url)
        .bind(&update.android_url)
        .bind(&update.desktop_url)
        .bind(&update.default_url)
        .bind(&update.description)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found("link"))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        // Visit rows go with the link via ON DELETE CASCADE.
        sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
