//! PostgreSQL-backed position repository.
//!
//! Every query joins the owning user so results come back already enriched
//! with the `{id, name}` owner projection; list queries apply the resolved
//! scope as a `WHERE` clause and order newest first.

use async_trait::async_trait;
use sqlx::PgPool;

use applitrack_application::{
    OwnerSummary, PositionRecord, PositionRepository, PositionWithOwner,
};
use applitrack_core::{AppError, AppResult, UserId};
use applitrack_domain::{ListScope, PositionFields, PositionId, PositionStatus};

/// PostgreSQL implementation of the position repository port.
#[derive(Clone)]
pub struct PostgresPositionRepository {
    pool: PgPool,
}

impl PostgresPositionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one(&self, position_id: PositionId) -> AppResult<PositionWithOwner> {
        self.find_by_id(position_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "position {position_id} vanished during a write"
                ))
            })
    }
}

const SELECT_POSITION: &str = r#"
    SELECT p.id, p.user_id, p.company, p.recruiter_company, p.title,
           p.description, p.status, p.location, p.salary, p.url, p.notes,
           p.applied_at, p.created_at, p.updated_at,
           u.name AS owner_name
    FROM positions p
    JOIN users u ON u.id = p.user_id
"#;

#[derive(Debug, sqlx::FromRow)]
struct PositionRow {
    id: uuid::Uuid,
    user_id: uuid::Uuid,
    company: Option<String>,
    recruiter_company: Option<String>,
    title: String,
    description: Option<String>,
    status: String,
    location: Option<String>,
    salary: Option<String>,
    url: Option<String>,
    notes: Option<String>,
    applied_at: Option<chrono::NaiveDate>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
    owner_name: String,
}

impl TryFrom<PositionRow> for PositionWithOwner {
    type Error = AppError;

    fn try_from(row: PositionRow) -> Result<Self, Self::Error> {
        let status = PositionStatus::parse(&row.status).ok_or_else(|| {
            AppError::Internal(format!("unknown status '{}' in storage", row.status))
        })?;
        let owner_id = UserId::from_uuid(row.user_id);

        Ok(Self {
            position: PositionRecord {
                id: PositionId::from_uuid(row.id),
                owner_id,
                company: row.company,
                recruiter_company: row.recruiter_company,
                title: row.title,
                description: row.description,
                status,
                location: row.location,
                salary: row.salary,
                url: row.url,
                notes: row.notes,
                applied_at: row.applied_at,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            owner: OwnerSummary {
                id: owner_id,
                name: row.owner_name,
            },
        })
    }
}

#[async_trait]
impl PositionRepository for PostgresPositionRepository {
    async fn list(&self, scope: ListScope) -> AppResult<Vec<PositionWithOwner>> {
        let rows = match scope {
            ListScope::All => {
                sqlx::query_as::<_, PositionRow>(&format!(
                    "{SELECT_POSITION} ORDER BY p.created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await
            }
            ListScope::OwnedBy(owner_id) => {
                sqlx::query_as::<_, PositionRow>(&format!(
                    "{SELECT_POSITION} WHERE p.user_id = $1 ORDER BY p.created_at DESC"
                ))
                .bind(owner_id.as_uuid())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|error| AppError::Internal(format!("failed to list positions: {error}")))?;

        rows.into_iter().map(PositionWithOwner::try_from).collect()
    }

    async fn find_by_id(&self, position_id: PositionId) -> AppResult<Option<PositionWithOwner>> {
        let row = sqlx::query_as::<_, PositionRow>(&format!(
            "{SELECT_POSITION} WHERE p.id = $1 LIMIT 1"
        ))
        .bind(position_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find position: {error}")))?;

        row.map(PositionWithOwner::try_from).transpose()
    }

    async fn insert(
        &self,
        owner_id: UserId,
        fields: &PositionFields,
    ) -> AppResult<PositionWithOwner> {
        let position_id = PositionId::new();

        sqlx::query(
            r#"
            INSERT INTO positions
                (id, user_id, company, recruiter_company, title, description,
                 status, location, salary, url, notes, applied_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(position_id.as_uuid())
        .bind(owner_id.as_uuid())
        .bind(&fields.company)
        .bind(&fields.recruiter_company)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.status.as_str())
        .bind(&fields.location)
        .bind(&fields.salary)
        .bind(&fields.url)
        .bind(&fields.notes)
        .bind(fields.applied_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to insert position: {error}")))?;

        self.fetch_one(position_id).await
    }

    async fn update(
        &self,
        position_id: PositionId,
        fields: &PositionFields,
    ) -> AppResult<PositionWithOwner> {
        let result = sqlx::query(
            r#"
            UPDATE positions
            SET company = $2,
                recruiter_company = $3,
                title = $4,
                description = $5,
                status = $6,
                location = $7,
                salary = $8,
                url = $9,
                notes = $10,
                applied_at = $11,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(position_id.as_uuid())
        .bind(&fields.company)
        .bind(&fields.recruiter_company)
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(fields.status.as_str())
        .bind(&fields.location)
        .bind(&fields.salary)
        .bind(&fields.url)
        .bind(&fields.notes)
        .bind(fields.applied_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update position: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("position not found".to_owned()));
        }

        self.fetch_one(position_id).await
    }

    async fn delete(&self, position_id: PositionId) -> AppResult<()> {
        sqlx::query("DELETE FROM positions WHERE id = $1")
            .bind(position_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete position: {error}")))?;

        Ok(())
    }
}
