use axum::Json;
use axum::extract::{Extension, Path, State};
use uuid::Uuid;

use applitrack_core::{Actor, UserId};

use crate::dto::{PositionResponse, UserResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state
        .user_service
        .list_users(&actor)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn user_positions_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<Vec<PositionResponse>>> {
    let positions = state
        .position_service
        .list_for_user(&actor, UserId::from_uuid(user_id))
        .await?
        .into_iter()
        .map(PositionResponse::from)
        .collect();

    Ok(Json(positions))
}
