//! Request and response payloads for the HTTP API.

mod auth;
mod common;
mod positions;
mod users;

pub use auth::{LoginRequest, LoginResponse};
pub use common::{GenericMessageResponse, PingResponse};
pub use positions::{
    CreatePositionRequest, ListPositionsQuery, OwnerResponse, PositionResponse,
};
pub use users::UserResponse;
