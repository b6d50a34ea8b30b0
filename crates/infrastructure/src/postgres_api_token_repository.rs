//! PostgreSQL-backed API token repository.

use async_trait::async_trait;
use sqlx::PgPool;

use applitrack_application::{ApiTokenRecord, ApiTokenRepository};
use applitrack_core::{AppError, AppResult, UserId};

/// PostgreSQL implementation of the API token repository port.
#[derive(Clone)]
pub struct PostgresApiTokenRepository {
    pool: PgPool,
}

impl PostgresApiTokenRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ApiTokenRow {
    id: uuid::Uuid,
    user_id: uuid::Uuid,
    token_hash: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ApiTokenRow> for ApiTokenRecord {
    fn from(row: ApiTokenRow) -> Self {
        Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            token_hash: row.token_hash,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ApiTokenRepository for PostgresApiTokenRepository {
    async fn insert(&self, user_id: UserId, token_hash: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO api_tokens (id, user_id, token_hash)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(uuid::Uuid::new_v4())
        .bind(user_id.as_uuid())
        .bind(token_hash)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to store api token: {error}")))?;

        Ok(())
    }

    async fn find_by_hash(&self, token_hash: &str) -> AppResult<Option<ApiTokenRecord>> {
        let row = sqlx::query_as::<_, ApiTokenRow>(
            r#"
            SELECT id, user_id, token_hash, created_at
            FROM api_tokens
            WHERE token_hash = $1
            LIMIT 1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to look up api token: {error}")))?;

        Ok(row.map(ApiTokenRecord::from))
    }

    async fn delete_by_hash(&self, token_hash: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM api_tokens WHERE token_hash = $1")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to revoke api token: {error}")))?;

        Ok(())
    }
}
