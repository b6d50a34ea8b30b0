use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use applitrack_core::Actor;
use applitrack_domain::{PositionDraft, PositionId};

use crate::dto::{CreatePositionRequest, ListPositionsQuery, PositionResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_positions_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<ListPositionsQuery>,
) -> ApiResult<Json<Vec<PositionResponse>>> {
    let positions = state
        .position_service
        .list(&actor, query.to_list_query())
        .await?
        .into_iter()
        .map(PositionResponse::from)
        .collect();

    Ok(Json(positions))
}

pub async fn create_position_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreatePositionRequest>,
) -> ApiResult<(StatusCode, Json<PositionResponse>)> {
    let created = state
        .position_service
        .create(&actor, payload.requested_owner(), &payload.fields)
        .await?;

    Ok((StatusCode::CREATED, Json(PositionResponse::from(created))))
}

pub async fn show_position_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(position_id): Path<Uuid>,
) -> ApiResult<Json<PositionResponse>> {
    let position = state
        .position_service
        .show(&actor, PositionId::from_uuid(position_id))
        .await?;

    Ok(Json(PositionResponse::from(position)))
}

pub async fn update_position_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(position_id): Path<Uuid>,
    Json(payload): Json<PositionDraft>,
) -> ApiResult<Json<PositionResponse>> {
    let updated = state
        .position_service
        .update(&actor, PositionId::from_uuid(position_id), &payload)
        .await?;

    Ok(Json(PositionResponse::from(updated)))
}

pub async fn delete_position_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(position_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .position_service
        .delete(&actor, PositionId::from_uuid(position_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
