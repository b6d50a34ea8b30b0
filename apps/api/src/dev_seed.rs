//! Idempotent seed for the initial administrator account.

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use applitrack_application::PasswordHasher;
use applitrack_core::{AppError, AppResult};
use applitrack_infrastructure::Argon2PasswordHasher;

const SEED_ADMIN_NAME: &str = "Admin";
const SEED_ADMIN_EMAIL: &str = "admin@example.com";
const SEED_ADMIN_PASSWORD: &str = "password";

/// Creates the seed admin account if it does not already exist.
pub async fn run(pool: &PgPool) -> AppResult<()> {
    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE LOWER(email) = LOWER($1) LIMIT 1")
            .bind(SEED_ADMIN_EMAIL)
            .fetch_optional(pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to look up seed admin: {error}"))
            })?;

    if existing.is_some() {
        info!("seed admin user already exists");
        return Ok(());
    }

    let password_hash = Argon2PasswordHasher::new().hash_password(SEED_ADMIN_PASSWORD)?;

    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, is_admin, password_hash)
        VALUES ($1, $2, $3, TRUE, $4)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(SEED_ADMIN_NAME)
    .bind(SEED_ADMIN_EMAIL)
    .bind(&password_hash)
    .execute(pool)
    .await
    .map_err(|error| AppError::Internal(format!("failed to create seed admin: {error}")))?;

    info!(email = SEED_ADMIN_EMAIL, "seed admin user created");
    warn!("seed admin password is the default; change it before exposing this instance");
    Ok(())
}
