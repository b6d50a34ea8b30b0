use serde::Serialize;

/// Readiness probe payload.
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: &'static str,
    pub timestamp: String,
}

/// Generic message response for auth flows.
#[derive(Debug, Serialize)]
pub struct GenericMessageResponse {
    pub message: String,
}
