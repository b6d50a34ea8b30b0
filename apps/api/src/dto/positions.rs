use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use applitrack_application::{ListQuery, PositionWithOwner};
use applitrack_core::UserId;
use applitrack_domain::PositionDraft;

/// Create request: the position fields plus the admin-only explicit owner.
///
/// The update request is a bare [`PositionDraft`] — the owner of an existing
/// position is never reassigned through the API.
#[derive(Debug, Deserialize)]
pub struct CreatePositionRequest {
    /// Explicit owner; permitted only for administrators.
    pub user_id: Option<Uuid>,
    /// Position fields.
    #[serde(flatten)]
    pub fields: PositionDraft,
}

impl CreatePositionRequest {
    /// Returns the requested owner as a typed id, if supplied.
    #[must_use]
    pub fn requested_owner(&self) -> Option<UserId> {
        self.user_id.map(UserId::from_uuid)
    }
}

/// Query parameters for the list endpoint.
///
/// `all_users` arrives as a string so the endpoint honors the usual HTML
/// form truthy spellings. Both parameters are ignored for non-admins.
#[derive(Debug, Default, Deserialize)]
pub struct ListPositionsQuery {
    pub all_users: Option<String>,
    pub user_id: Option<Uuid>,
}

impl ListPositionsQuery {
    /// Converts wire parameters into the typed list query.
    #[must_use]
    pub fn to_list_query(&self) -> ListQuery {
        ListQuery {
            all_users: self.all_users.as_deref().is_some_and(is_truthy),
            user_id: self.user_id.map(UserId::from_uuid),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "on" | "yes"
    )
}

/// Minimal owner projection shipped with each position.
#[derive(Debug, Serialize)]
pub struct OwnerResponse {
    pub id: Uuid,
    pub name: String,
}

/// API representation of a position with its owner projection.
#[derive(Debug, Serialize)]
pub struct PositionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user: OwnerResponse,
    pub company: Option<String>,
    pub recruiter_company: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub applied_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PositionWithOwner> for PositionResponse {
    fn from(record: PositionWithOwner) -> Self {
        let position = record.position;
        Self {
            id: position.id.as_uuid(),
            user_id: position.owner_id.as_uuid(),
            user: OwnerResponse {
                id: record.owner.id.as_uuid(),
                name: record.owner.name,
            },
            company: position.company,
            recruiter_company: position.recruiter_company,
            title: position.title,
            description: position.description,
            status: position.status.as_str().to_owned(),
            location: position.location,
            salary: position.salary,
            url: position.url,
            notes: position.notes,
            applied_at: position.applied_at,
            created_at: position.created_at,
            updated_at: position.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ListPositionsQuery;

    #[test]
    fn truthy_spellings_enable_all_users() {
        for spelling in ["true", "TRUE", "1", "on", "yes"] {
            let query = ListPositionsQuery {
                all_users: Some(spelling.to_owned()),
                user_id: None,
            };
            assert!(query.to_list_query().all_users, "{spelling} should be truthy");
        }
    }

    #[test]
    fn other_values_do_not_enable_all_users() {
        for spelling in ["false", "0", "", "maybe"] {
            let query = ListPositionsQuery {
                all_users: Some(spelling.to_owned()),
                user_id: None,
            };
            assert!(!query.to_list_query().all_users, "{spelling} should be falsy");
        }
    }

    #[test]
    fn absent_parameter_is_falsy() {
        assert!(!ListPositionsQuery::default().to_list_query().all_users);
    }
}
