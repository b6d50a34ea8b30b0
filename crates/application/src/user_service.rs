//! User ports and application service.
//!
//! Covers credential exchange and the admin-only user directory. Login
//! failures are generic and the password is hashed even for unknown emails,
//! so response content and timing do not reveal which accounts exist.

use std::sync::Arc;

use async_trait::async_trait;

use applitrack_core::{Actor, AppError, AppResult, UserId};

/// User record returned by repository queries.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Canonical email address.
    pub email: String,
    /// Whether the account holds the admin capability.
    pub is_admin: bool,
    /// Argon2id password hash.
    pub password_hash: String,
}

impl UserRecord {
    /// Builds the request actor for this user.
    #[must_use]
    pub fn to_actor(&self) -> Actor {
        Actor::new(self.id, self.name.clone(), self.email.clone(), self.is_admin)
    }
}

/// Directory entry exposed to administrators. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Whether the account holds the admin capability.
    pub is_admin: bool,
}

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;

    /// Finds a user by their unique identifier.
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>>;

    /// Lists every user ordered by display name.
    async fn list(&self) -> AppResult<Vec<UserSummary>>;
}

/// Port for password hashing operations. Keeps the application layer free
/// of direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// Application service for authentication and the user directory.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
        }
    }

    /// Exchanges email and password for the matching user record.
    ///
    /// Any failure — unknown email or wrong password — produces the same
    /// generic unauthorized error, and the password is hashed either way to
    /// keep response timing uniform.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<UserRecord> {
        let user = self.user_repository.find_by_email(email).await?;

        let Some(user) = user else {
            let _ = self.password_hasher.hash_password(password);
            return Err(AppError::Unauthorized(
                "invalid email or password".to_owned(),
            ));
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;

        if !password_valid {
            return Err(AppError::Unauthorized(
                "invalid email or password".to_owned(),
            ));
        }

        Ok(user)
    }

    /// Lists every user, ordered by name. Admin only.
    pub async fn list_users(&self, actor: &Actor) -> AppResult<Vec<UserSummary>> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden(
                "administrator access required".to_owned(),
            ));
        }

        self.user_repository.list().await
    }
}
