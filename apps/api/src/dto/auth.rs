use serde::{Deserialize, Serialize};

use super::UserResponse;

/// Credential exchange request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Credential exchange response. The token is shown exactly once.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
    pub message: String,
}
