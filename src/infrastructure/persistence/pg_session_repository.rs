//! PostgreSQL implementation of the session repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Session;
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;

/// PostgreSQL repository for the single-active-session store.
///
/// Rotation is a conditional UPDATE keyed on the stored refresh token, so
/// two racing refresh calls for one account cannot both keep a valid pair:
/// the second conditional write matches zero rows.
pub struct PgSessionRepository {
    pool: Arc<PgPool>,
}

impl PgSessionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn find_by_account_id(&self, account_id: i64) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT account_id, access_token, refresh_token
            FROM sessions
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(session)
    }

    async fn insert(&self, session: Session) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO sessions (account_id, access_token, refresh_token)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(session.account_id)
        .bind(&session.access_token)
        .bind(&session.refresh_token)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn rotate(
        &self,
        current_refresh_token: &str,
        next: Session,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET access_token = $3, refresh_token = $4
            WHERE account_id = $1
              AND refresh_token = $2
            "#,
        )
        .bind(next.account_id)
        .bind(current_refresh_token)
        .bind(&next.access_token)
        .bind(&next.refresh_token)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete_by_account_id(&self, account_id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE account_id = $1")
            .bind(account_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
