//! PostgreSQL implementation of the account repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Account, NewAccount, Role};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;

/// PostgreSQL repository for account storage.
pub struct PgAccountRepository {
    pool: Arc<PgPool>,
}

impl PgAccountRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (email, password, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, password, role, created_at
            "#,
        )
        .bind(&new_account.email)
        .bind(&new_account.password)
        .bind(new_account.role.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(account)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password, role, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, email, password, role, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(account)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn set_password(&self, id: i64, password: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE accounts SET password = $2 WHERE id = $1")
            .bind(id)
            .bind(password)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn set_role(&self, id: i64, role: Role) -> Result<(), AppError> {
        sqlx::query("UPDATE accounts SET role = $2 WHERE id = $1")
            .bind(id)
            .bind(role.as_str())
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
