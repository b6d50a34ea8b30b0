//! Bearer-token issuance and validation.
//!
//! Login produces a personal access token: 32 cryptographically random
//! bytes, hex-encoded for the client, stored server-side only as a SHA-256
//! hash. Every authenticated request hashes the presented token and resolves
//! it to an actor; logout deletes the row.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use applitrack_core::{Actor, AppError, AppResult, UserId};

use crate::UserRepository;

/// Token row as persisted. Only the hash of the token is ever stored.
#[derive(Debug, Clone)]
pub struct ApiTokenRecord {
    /// Token identifier.
    pub id: uuid::Uuid,
    /// The user the token authenticates.
    pub user_id: UserId,
    /// SHA-256 hash of the raw token, hex-encoded.
    pub token_hash: String,
    /// Issuance timestamp.
    pub created_at: DateTime<Utc>,
}

/// Repository port for token persistence.
#[async_trait]
pub trait ApiTokenRepository: Send + Sync {
    /// Stores a new token hash for a user.
    async fn insert(&self, user_id: UserId, token_hash: &str) -> AppResult<()>;

    /// Finds a token row by its hash.
    async fn find_by_hash(&self, token_hash: &str) -> AppResult<Option<ApiTokenRecord>>;

    /// Removes a token row by its hash. Removing an unknown hash is a no-op.
    async fn delete_by_hash(&self, token_hash: &str) -> AppResult<()>;
}

/// Application service for issuing and validating bearer tokens.
#[derive(Clone)]
pub struct ApiTokenService {
    token_repository: Arc<dyn ApiTokenRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl ApiTokenService {
    /// Creates a new token service.
    #[must_use]
    pub fn new(
        token_repository: Arc<dyn ApiTokenRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            token_repository,
            user_repository,
        }
    }

    /// Issues a fresh token for the user and returns the raw value.
    ///
    /// The raw token is shown exactly once; only its hash is persisted.
    pub async fn issue(&self, user_id: UserId) -> AppResult<String> {
        let (raw_token, token_hash) = generate_token()?;
        self.token_repository.insert(user_id, &token_hash).await?;
        Ok(raw_token)
    }

    /// Resolves a presented bearer token to the authenticated actor.
    pub async fn authenticate(&self, raw_token: &str) -> AppResult<Actor> {
        let token = self
            .token_repository
            .find_by_hash(&hash_token(raw_token))
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid authentication token".to_owned()))?;

        let user = self
            .user_repository
            .find_by_id(token.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid authentication token".to_owned()))?;

        Ok(user.to_actor())
    }

    /// Revokes the presented token. Revoking an unknown token succeeds.
    pub async fn revoke(&self, raw_token: &str) -> AppResult<()> {
        self.token_repository
            .delete_by_hash(&hash_token(raw_token))
            .await
    }
}

/// Generates a cryptographically random token and its storage hash.
///
/// Returns `(raw_token_hex, sha256_hash_hex)`.
fn generate_token() -> AppResult<(String, String)> {
    let mut bytes = [0u8; 32];
    getrandom::fill(&mut bytes)
        .map_err(|error| AppError::Internal(format!("failed to generate api token: {error}")))?;

    let raw_token = hex_encode(&bytes);
    let hash = hash_token(&raw_token);
    Ok((raw_token, hash))
}

/// Computes the SHA-256 hash of a token string for storage and lookup.
fn hash_token(raw_token: &str) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(raw_token.as_bytes());
    hex_encode(&hasher.finalize())
}

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes.iter().fold(
        String::with_capacity(bytes.len() * 2),
        |mut acc, byte| {
            let _ = write!(acc, "{byte:02x}");
            acc
        },
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use applitrack_core::{AppError, AppResult, UserId};

    use super::{
        ApiTokenRecord, ApiTokenRepository, ApiTokenService, generate_token, hash_token,
    };
    use crate::{UserRecord, UserRepository, UserSummary};

    #[derive(Default)]
    struct InMemoryTokens {
        rows: Mutex<Vec<ApiTokenRecord>>,
    }

    #[async_trait]
    impl ApiTokenRepository for InMemoryTokens {
        async fn insert(&self, user_id: UserId, token_hash: &str) -> AppResult<()> {
            self.rows
                .lock()
                .map_err(|error| AppError::Internal(format!("failed to lock rows: {error}")))?
                .push(ApiTokenRecord {
                    id: uuid::Uuid::new_v4(),
                    user_id,
                    token_hash: token_hash.to_owned(),
                    created_at: Utc::now(),
                });
            Ok(())
        }

        async fn find_by_hash(&self, token_hash: &str) -> AppResult<Option<ApiTokenRecord>> {
            Ok(self
                .rows
                .lock()
                .map_err(|error| AppError::Internal(format!("failed to lock rows: {error}")))?
                .iter()
                .find(|row| row.token_hash == token_hash)
                .cloned())
        }

        async fn delete_by_hash(&self, token_hash: &str) -> AppResult<()> {
            self.rows
                .lock()
                .map_err(|error| AppError::Internal(format!("failed to lock rows: {error}")))?
                .retain(|row| row.token_hash != token_hash);
            Ok(())
        }
    }

    struct SingleUser {
        user: UserRecord,
    }

    #[async_trait]
    impl UserRepository for SingleUser {
        async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
            Ok((self.user.email == email).then(|| self.user.clone()))
        }

        async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
            Ok((self.user.id == user_id).then(|| self.user.clone()))
        }

        async fn list(&self) -> AppResult<Vec<UserSummary>> {
            Ok(Vec::new())
        }
    }

    fn service() -> (ApiTokenService, UserId) {
        let user = UserRecord {
            id: UserId::new(),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            is_admin: false,
            password_hash: "hash".to_owned(),
        };
        let user_id = user.id;
        let service = ApiTokenService::new(
            Arc::new(InMemoryTokens::default()),
            Arc::new(SingleUser { user }),
        );
        (service, user_id)
    }

    #[test]
    fn generated_tokens_are_unique_hex() {
        let (first, first_hash) = generate_token().unwrap_or_else(|_| panic!("test"));
        let (second, _) = generate_token().unwrap_or_else(|_| panic!("test"));

        assert_eq!(first.len(), 64);
        assert_ne!(first, second);
        assert_eq!(first_hash, hash_token(&first));
        assert_ne!(first_hash, first);
    }

    #[tokio::test]
    async fn issued_token_authenticates_its_user() {
        let (service, user_id) = service();

        let raw = service
            .issue(user_id)
            .await
            .unwrap_or_else(|error| panic!("issue failed: {error}"));
        let actor = service
            .authenticate(&raw)
            .await
            .unwrap_or_else(|error| panic!("authenticate failed: {error}"));

        assert_eq!(actor.id(), user_id);
        assert!(!actor.is_admin());
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorized() {
        let (service, _) = service();

        let error = service.authenticate("deadbeef").await.err();
        assert!(matches!(error, Some(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn revoked_token_no_longer_authenticates() {
        let (service, user_id) = service();

        let raw = service
            .issue(user_id)
            .await
            .unwrap_or_else(|error| panic!("issue failed: {error}"));
        service
            .revoke(&raw)
            .await
            .unwrap_or_else(|error| panic!("revoke failed: {error}"));

        assert!(service.authenticate(&raw).await.is_err());
    }
}
