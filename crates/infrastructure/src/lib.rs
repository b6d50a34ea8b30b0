//! PostgreSQL repositories and cryptographic adapters for Applitrack.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod postgres_api_token_repository;
mod postgres_position_repository;
mod postgres_user_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use postgres_api_token_repository::PostgresApiTokenRepository;
pub use postgres_position_repository::PostgresPositionRepository;
pub use postgres_user_repository::PostgresUserRepository;
