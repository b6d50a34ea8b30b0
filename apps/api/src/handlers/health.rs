use axum::Json;

use crate::dto::PingResponse;

/// Unauthenticated readiness probe.
pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse {
        message: "ready",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
