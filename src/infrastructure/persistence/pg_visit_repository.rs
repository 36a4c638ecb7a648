//! PostgreSQL implementation of the visit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewVisit, Visit};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

/// PostgreSQL repository for append-only visit records.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let visit = sqlx::query_as::<_, Visit>(
            r#"
            INSERT INTO link_visits (link_id, ip_address, language, device_type, referer)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, link_id, ip_address, language, device_type, referer, created_at
            "#,
        )
        .bind(new_visit.link_id)
        .bind(&new_visit.ip_address)
        .bind(&new_visit.language)
        .bind(&new_visit.device_type)
        .bind(&new_visit.referer)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(visit)
    }

    async fn find_by_link_in_range(
        &self,
        link_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Visit>, AppError> {
        let visits = sqlx::query_as::<_, Visit>(
            r#"
            SELECT id, link_id, ip_address, language, device_type, referer, created_at
            FROM link_visits
            WHERE link_id = $1
              AND created_at >= $2
              AND created_at < $3
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(link_id)
        .bind(from)
        .bind(to)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(visits)
    }
}
