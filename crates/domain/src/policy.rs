//! Access policy for position records.
//!
//! Three pure decision functions cover every operation:
//! scope resolution for lists, the owner-or-admin predicate shared by
//! show/update/delete, and owner resolution for create. Handlers and
//! services never re-derive these rules inline.

use applitrack_core::{Actor, AppError, AppResult, UserId};

/// Filter predicate a list query must apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// No owner filter: every position is visible.
    All,
    /// Only positions owned by the given user.
    OwnedBy(UserId),
}

/// Resolves the list scope for an actor and its query parameters.
///
/// Precedence is fixed: `all_users` beats `user_id` beats default-self.
/// Non-admin actors always fall back to their own positions; their query
/// parameters are silently ignored rather than rejected. An admin-supplied
/// `user_id` need not exist — the resulting scope simply matches nothing.
#[must_use]
pub fn resolve_list_scope(actor: &Actor, all_users: bool, user_id: Option<UserId>) -> ListScope {
    if actor.is_admin() {
        if all_users {
            return ListScope::All;
        }
        if let Some(owner_id) = user_id {
            return ListScope::OwnedBy(owner_id);
        }
    }

    ListScope::OwnedBy(actor.id())
}

/// Whether the actor may view, update, or delete a position owned by `owner_id`.
#[must_use]
pub fn is_owner_or_admin(actor: &Actor, owner_id: UserId) -> bool {
    actor.is_admin() || actor.id() == owner_id
}

/// Resolves the owner of a position being created.
///
/// Only admins may name an explicit owner; a non-admin supplying one gets a
/// validation error on `user_id` rather than a silent override. Omitting the
/// field always means "the actor themselves". Whether an admin-supplied
/// owner actually exists is checked by the caller against the user store.
pub fn resolve_create_owner(actor: &Actor, requested: Option<UserId>) -> AppResult<UserId> {
    match requested {
        Some(owner_id) if actor.is_admin() => Ok(owner_id),
        Some(_) => Err(AppError::invalid_field(
            "user_id",
            "user_id may only be set by an administrator",
        )),
        None => Ok(actor.id()),
    }
}
