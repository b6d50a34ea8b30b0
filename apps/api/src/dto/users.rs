use serde::Serialize;
use uuid::Uuid;

use applitrack_application::{UserRecord, UserSummary};
use applitrack_core::Actor;

/// API representation of a user. Never carries credential data.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<UserSummary> for UserResponse {
    fn from(summary: UserSummary) -> Self {
        Self {
            id: summary.id.as_uuid(),
            name: summary.name,
            email: summary.email,
            is_admin: summary.is_admin,
        }
    }
}

impl From<&UserRecord> for UserResponse {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id.as_uuid(),
            name: record.name.clone(),
            email: record.email.clone(),
            is_admin: record.is_admin,
        }
    }
}

impl From<&Actor> for UserResponse {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id().as_uuid(),
            name: actor.name().to_owned(),
            email: actor.email().to_owned(),
            is_admin: actor.is_admin(),
        }
    }
}
