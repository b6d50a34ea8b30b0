//! Position ports and application service.
//!
//! The service is a thin orchestration of the domain access policy over a
//! CRUD repository: resolve or check the policy decision, validate fields,
//! persist, and return the record enriched with its owner projection.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use applitrack_core::{Actor, AppError, AppResult, UserId, ValidationErrors};
use applitrack_domain::{
    ListScope, PositionDraft, PositionFields, PositionId, PositionStatus, is_owner_or_admin,
    resolve_create_owner, resolve_list_scope,
};

use crate::UserRepository;

/// Position record as persisted.
#[derive(Debug, Clone)]
pub struct PositionRecord {
    /// Unique position identifier.
    pub id: PositionId,
    /// Owning user, fixed at creation.
    pub owner_id: UserId,
    /// Hiring company name.
    pub company: Option<String>,
    /// Recruiting agency name.
    pub recruiter_company: Option<String>,
    /// Job title.
    pub title: String,
    /// Free-form role description.
    pub description: Option<String>,
    /// Application status.
    pub status: PositionStatus,
    /// Role location.
    pub location: Option<String>,
    /// Advertised salary, free text.
    pub salary: Option<String>,
    /// Link to the posting.
    pub url: Option<String>,
    /// Private notes.
    pub notes: Option<String>,
    /// Date the application was submitted.
    pub applied_at: Option<NaiveDate>,
    /// Creation timestamp, system-assigned.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp, system-assigned.
    pub updated_at: DateTime<Utc>,
}

/// Minimal owner projection shipped with each position.
/// Deliberately excludes email and credential data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSummary {
    /// Owner's user identifier.
    pub id: UserId,
    /// Owner's display name.
    pub name: String,
}

/// A position together with its owner projection.
#[derive(Debug, Clone)]
pub struct PositionWithOwner {
    /// The position record.
    pub position: PositionRecord,
    /// The owning user, id and name only.
    pub owner: OwnerSummary,
}

/// Raw list query parameters as they arrive on the wire.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListQuery {
    /// Admin request for every user's positions.
    pub all_users: bool,
    /// Admin request for one specific user's positions.
    pub user_id: Option<UserId>,
}

/// Repository port for position persistence.
///
/// List results are ordered by creation time descending (newest first).
#[async_trait]
pub trait PositionRepository: Send + Sync {
    /// Lists positions within the given scope, newest first.
    async fn list(&self, scope: ListScope) -> AppResult<Vec<PositionWithOwner>>;

    /// Finds a position by its identifier.
    async fn find_by_id(&self, position_id: PositionId) -> AppResult<Option<PositionWithOwner>>;

    /// Inserts a new position owned by `owner_id`.
    async fn insert(
        &self,
        owner_id: UserId,
        fields: &PositionFields,
    ) -> AppResult<PositionWithOwner>;

    /// Replaces the mutable fields of an existing position.
    /// The owner is never touched.
    async fn update(
        &self,
        position_id: PositionId,
        fields: &PositionFields,
    ) -> AppResult<PositionWithOwner>;

    /// Permanently removes a position.
    async fn delete(&self, position_id: PositionId) -> AppResult<()>;
}

/// Application service applying the access policy atop position CRUD.
#[derive(Clone)]
pub struct PositionService {
    position_repository: Arc<dyn PositionRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl PositionService {
    /// Creates a new position service.
    #[must_use]
    pub fn new(
        position_repository: Arc<dyn PositionRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            position_repository,
            user_repository,
        }
    }

    /// Lists positions visible to the actor under the resolved scope.
    ///
    /// Non-admin query parameters are ignored; an admin-supplied unknown
    /// `user_id` yields an empty list rather than an error.
    pub async fn list(&self, actor: &Actor, query: ListQuery) -> AppResult<Vec<PositionWithOwner>> {
        let scope = resolve_list_scope(actor, query.all_users, query.user_id);
        self.position_repository.list(scope).await
    }

    /// Lists one user's positions on behalf of an administrator.
    ///
    /// Unlike the list endpoint's `user_id` parameter, the user is named in
    /// the path here, so an unknown id is a 404 rather than an empty list.
    pub async fn list_for_user(
        &self,
        actor: &Actor,
        user_id: UserId,
    ) -> AppResult<Vec<PositionWithOwner>> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden(
                "administrator access required".to_owned(),
            ));
        }

        if self.user_repository.find_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound("user not found".to_owned()));
        }

        self.position_repository
            .list(ListScope::OwnedBy(user_id))
            .await
    }

    /// Creates a position owned by the resolved owner.
    ///
    /// Owner resolution runs before field validation: a non-admin supplying
    /// `user_id` fails on that field without a record being created, and an
    /// admin-supplied owner must exist.
    pub async fn create(
        &self,
        actor: &Actor,
        requested_owner: Option<UserId>,
        draft: &PositionDraft,
    ) -> AppResult<PositionWithOwner> {
        let owner_id = resolve_create_owner(actor, requested_owner)?;

        if requested_owner.is_some()
            && self.user_repository.find_by_id(owner_id).await?.is_none()
        {
            return Err(ValidationErrors::single(
                "user_id",
                "no user exists with the supplied user_id",
            )
            .into());
        }

        let fields = draft.validate()?;
        self.position_repository.insert(owner_id, &fields).await
    }

    /// Returns a single position, if the actor may see it.
    pub async fn show(&self, actor: &Actor, position_id: PositionId) -> AppResult<PositionWithOwner> {
        self.authorize(actor, position_id).await
    }

    /// Updates a position's fields. Ownership is never reassigned.
    pub async fn update(
        &self,
        actor: &Actor,
        position_id: PositionId,
        draft: &PositionDraft,
    ) -> AppResult<PositionWithOwner> {
        self.authorize(actor, position_id).await?;
        let fields = draft.validate()?;
        self.position_repository.update(position_id, &fields).await
    }

    /// Permanently deletes a position.
    pub async fn delete(&self, actor: &Actor, position_id: PositionId) -> AppResult<()> {
        self.authorize(actor, position_id).await?;
        self.position_repository.delete(position_id).await
    }

    /// Shared single-record authorization: absent is 404, present but
    /// foreign-owned (and not admin) is 403. Existence is not hidden from a
    /// denied actor.
    async fn authorize(
        &self,
        actor: &Actor,
        position_id: PositionId,
    ) -> AppResult<PositionWithOwner> {
        let record = self
            .position_repository
            .find_by_id(position_id)
            .await?
            .ok_or_else(|| AppError::NotFound("position not found".to_owned()))?;

        if !is_owner_or_admin(actor, record.position.owner_id) {
            return Err(AppError::Forbidden(
                "you do not have permission to access this position".to_owned(),
            ));
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests;
