use serde::{Deserialize, Serialize};

use crate::UserId;

/// The authenticated identity behind a request.
///
/// Resolved by the bearer-token middleware before any handler runs and
/// attached to the request as an extension. The `is_admin` flag is the only
/// capability bit in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    id: UserId,
    name: String,
    email: String,
    is_admin: bool,
}

impl Actor {
    /// Creates an actor from a resolved user record.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>, is_admin: bool) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            is_admin,
        }
    }

    /// Returns the stable user identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the email address the account was registered with.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns whether the actor holds the admin capability.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}
