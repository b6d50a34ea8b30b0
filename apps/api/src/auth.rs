//! Credential exchange and session-token handlers.

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::HeaderMap;

use applitrack_core::Actor;

use crate::dto::{GenericMessageResponse, LoginRequest, LoginResponse, UserResponse};
use crate::error::ApiResult;
use crate::middleware::bearer_token;
use crate::state::AppState;

/// Exchanges email and password for a bearer token.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state
        .user_service
        .login(&payload.email, &payload.password)
        .await?;
    let token = state.api_token_service.issue(user.id).await?;

    Ok(Json(LoginResponse {
        user: UserResponse::from(&user),
        token,
        message: "Login successful.".to_owned(),
    }))
}

/// Revokes the token presented on this request.
pub async fn logout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<GenericMessageResponse>> {
    let token = bearer_token(&headers)?;
    state.api_token_service.revoke(token).await?;

    Ok(Json(GenericMessageResponse {
        message: "Logged out.".to_owned(),
    }))
}

/// Returns the authenticated user.
pub async fn me_handler(Extension(actor): Extension<Actor>) -> ApiResult<Json<UserResponse>> {
    Ok(Json(UserResponse::from(&actor)))
}
