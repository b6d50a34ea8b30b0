//! Applitrack API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod auth;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;

use applitrack_application::{ApiTokenService, PositionService, UserService};
use applitrack_core::AppError;
use applitrack_infrastructure::{
    Argon2PasswordHasher, PostgresApiTokenRepository, PostgresPositionRepository,
    PostgresUserRepository,
};

use crate::api_config::{ApiConfig, RunMode};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    match config.run_mode {
        RunMode::Migrate => {
            info!("database migrations applied successfully");
            return Ok(());
        }
        RunMode::Seed => {
            dev_seed::run(&pool).await?;
            return Ok(());
        }
        RunMode::Serve => {}
    }

    let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
    let position_repository = Arc::new(PostgresPositionRepository::new(pool.clone()));
    let api_token_repository = Arc::new(PostgresApiTokenRepository::new(pool.clone()));
    let password_hasher = Arc::new(Argon2PasswordHasher::new());

    let app_state = AppState {
        position_service: PositionService::new(position_repository, user_repository.clone()),
        user_service: UserService::new(user_repository.clone(), password_hasher),
        api_token_service: ApiTokenService::new(api_token_repository, user_repository),
    };

    let app = api_router::build_router(app_state, &config.frontend_url)?;

    let host = IpAddr::from_str(&config.api_host).map_err(|error| {
        AppError::Internal(format!("invalid API_HOST '{}': {error}", config.api_host))
    })?;
    let address = SocketAddr::from((host, config.api_port));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "applitrack-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
