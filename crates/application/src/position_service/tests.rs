use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use applitrack_core::{Actor, AppError, AppResult, UserId};
use applitrack_domain::{ListScope, PositionDraft, PositionFields, PositionId, PositionStatus};

use super::{
    ListQuery, OwnerSummary, PositionRepository, PositionService, PositionWithOwner,
};
use crate::{UserRecord, UserRepository, UserSummary};

struct FakeUsers {
    users: Vec<UserRecord>,
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        Ok(self
            .users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self.users.iter().find(|user| user.id == user_id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<UserSummary>> {
        Ok(Vec::new())
    }
}

struct InMemoryPositions {
    records: Mutex<Vec<PositionWithOwner>>,
    owner_names: HashMap<UserId, String>,
}

impl InMemoryPositions {
    fn owner_name(&self, owner_id: UserId) -> String {
        self.owner_names
            .get(&owner_id)
            .cloned()
            .unwrap_or_else(|| "Unknown".to_owned())
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, Vec<PositionWithOwner>>> {
        self.records
            .lock()
            .map_err(|error| AppError::Internal(format!("failed to lock repo state: {error}")))
    }
}

#[async_trait]
impl PositionRepository for InMemoryPositions {
    async fn list(&self, scope: ListScope) -> AppResult<Vec<PositionWithOwner>> {
        let mut matching: Vec<PositionWithOwner> = self
            .lock()?
            .iter()
            .filter(|record| match scope {
                ListScope::All => true,
                ListScope::OwnedBy(owner_id) => record.position.owner_id == owner_id,
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.position.created_at.cmp(&a.position.created_at));
        Ok(matching)
    }

    async fn find_by_id(&self, position_id: PositionId) -> AppResult<Option<PositionWithOwner>> {
        Ok(self
            .lock()?
            .iter()
            .find(|record| record.position.id == position_id)
            .cloned())
    }

    async fn insert(
        &self,
        owner_id: UserId,
        fields: &PositionFields,
    ) -> AppResult<PositionWithOwner> {
        let now = Utc::now();
        let record = PositionWithOwner {
            position: super::PositionRecord {
                id: PositionId::new(),
                owner_id,
                company: fields.company.clone(),
                recruiter_company: fields.recruiter_company.clone(),
                title: fields.title.clone(),
                description: fields.description.clone(),
                status: fields.status,
                location: fields.location.clone(),
                salary: fields.salary.clone(),
                url: fields.url.clone(),
                notes: fields.notes.clone(),
                applied_at: fields.applied_at,
                created_at: now,
                updated_at: now,
            },
            owner: OwnerSummary {
                id: owner_id,
                name: self.owner_name(owner_id),
            },
        };

        self.lock()?.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        position_id: PositionId,
        fields: &PositionFields,
    ) -> AppResult<PositionWithOwner> {
        let mut records = self.lock()?;
        let record = records
            .iter_mut()
            .find(|record| record.position.id == position_id)
            .ok_or_else(|| AppError::NotFound("position not found".to_owned()))?;

        record.position.company = fields.company.clone();
        record.position.recruiter_company = fields.recruiter_company.clone();
        record.position.title = fields.title.clone();
        record.position.description = fields.description.clone();
        record.position.status = fields.status;
        record.position.location = fields.location.clone();
        record.position.salary = fields.salary.clone();
        record.position.url = fields.url.clone();
        record.position.notes = fields.notes.clone();
        record.position.applied_at = fields.applied_at;
        record.position.updated_at = Utc::now();

        Ok(record.clone())
    }

    async fn delete(&self, position_id: PositionId) -> AppResult<()> {
        self.lock()?
            .retain(|record| record.position.id != position_id);
        Ok(())
    }
}

struct Harness {
    service: PositionService,
    positions: Arc<InMemoryPositions>,
}

fn user_record(id: UserId, name: &str, is_admin: bool) -> UserRecord {
    UserRecord {
        id,
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
        is_admin,
        password_hash: "hash".to_owned(),
    }
}

fn harness(users: &[UserRecord]) -> Harness {
    let owner_names = users
        .iter()
        .map(|user| (user.id, user.name.clone()))
        .collect();
    let positions = Arc::new(InMemoryPositions {
        records: Mutex::new(Vec::new()),
        owner_names,
    });
    let user_repository = Arc::new(FakeUsers {
        users: users.to_vec(),
    });

    Harness {
        service: PositionService::new(positions.clone(), user_repository),
        positions,
    }
}

fn actor_for(user: &UserRecord) -> Actor {
    user.to_actor()
}

fn draft(company: &str, title: &str) -> PositionDraft {
    PositionDraft {
        company: Some(company.to_owned()),
        title: Some(title.to_owned()),
        ..PositionDraft::default()
    }
}

async fn seed_position(
    harness: &Harness,
    owner: &UserRecord,
    company: &str,
    title: &str,
) -> PositionWithOwner {
    harness
        .service
        .create(&actor_for(owner), None, &draft(company, title))
        .await
        .unwrap_or_else(|error| panic!("seed create failed: {error}"))
}

fn stored_count(harness: &Harness) -> usize {
    harness
        .positions
        .records
        .lock()
        .map(|records| records.len())
        .unwrap_or(usize::MAX)
}

#[tokio::test]
async fn create_then_show_round_trips_fields() {
    let alice = user_record(UserId::new(), "Alice", false);
    let harness = harness(&[alice.clone()]);

    let mut submitted = draft("Acme", "Backend Engineer");
    submitted.location = Some("London".to_owned());
    submitted.salary = Some("£70,000".to_owned());
    submitted.status = Some("applied".to_owned());
    submitted.applied_at = Some("2026-08-14".to_owned());

    let created = harness
        .service
        .create(&actor_for(&alice), None, &submitted)
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));

    assert_eq!(created.position.owner_id, alice.id);
    assert_eq!(created.owner.name, "Alice");

    let fetched = harness
        .service
        .show(&actor_for(&alice), created.position.id)
        .await
        .unwrap_or_else(|error| panic!("show failed: {error}"));

    assert_eq!(fetched.position.title, "Backend Engineer");
    assert_eq!(fetched.position.company.as_deref(), Some("Acme"));
    assert_eq!(fetched.position.location.as_deref(), Some("London"));
    assert_eq!(fetched.position.salary.as_deref(), Some("£70,000"));
    assert_eq!(fetched.position.status, PositionStatus::Applied);
    assert!(fetched.position.applied_at.is_some());
}

#[tokio::test]
async fn default_status_is_saved() {
    let alice = user_record(UserId::new(), "Alice", false);
    let harness = harness(&[alice.clone()]);

    let created = seed_position(&harness, &alice, "Acme", "Backend Engineer").await;
    assert_eq!(created.position.status, PositionStatus::Saved);
}

#[tokio::test]
async fn non_admin_list_never_contains_foreign_positions() {
    let alice = user_record(UserId::new(), "Alice", false);
    let bob = user_record(UserId::new(), "Bob", false);
    let harness = harness(&[alice.clone(), bob.clone()]);

    seed_position(&harness, &alice, "Acme", "Backend Engineer").await;
    seed_position(&harness, &bob, "Globex", "Data Engineer").await;
    seed_position(&harness, &bob, "Initech", "SRE").await;

    let listed = harness
        .service
        .list(&actor_for(&alice), ListQuery::default())
        .await
        .unwrap_or_default();

    assert_eq!(listed.len(), 1);
    assert!(listed
        .iter()
        .all(|record| record.position.owner_id == alice.id));
}

#[tokio::test]
async fn non_admin_query_parameters_have_no_effect() {
    let alice = user_record(UserId::new(), "Alice", false);
    let bob = user_record(UserId::new(), "Bob", false);
    let harness = harness(&[alice.clone(), bob.clone()]);

    seed_position(&harness, &alice, "Acme", "Backend Engineer").await;
    seed_position(&harness, &bob, "Globex", "Data Engineer").await;

    let widened = harness
        .service
        .list(
            &actor_for(&alice),
            ListQuery {
                all_users: true,
                user_id: Some(bob.id),
            },
        )
        .await
        .unwrap_or_default();

    assert_eq!(widened.len(), 1);
    assert_eq!(widened[0].position.owner_id, alice.id);
}

#[tokio::test]
async fn admin_all_users_returns_everything_regardless_of_user_id() {
    let alice = user_record(UserId::new(), "Alice", false);
    let bob = user_record(UserId::new(), "Bob", false);
    let root = user_record(UserId::new(), "Root", true);
    let harness = harness(&[alice.clone(), bob.clone(), root.clone()]);

    seed_position(&harness, &alice, "Acme", "Backend Engineer").await;
    seed_position(&harness, &bob, "Globex", "Data Engineer").await;

    let all = harness
        .service
        .list(
            &actor_for(&root),
            ListQuery {
                all_users: true,
                user_id: Some(alice.id),
            },
        )
        .await
        .unwrap_or_default();

    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn admin_user_id_scopes_to_one_user() {
    let alice = user_record(UserId::new(), "Alice", false);
    let bob = user_record(UserId::new(), "Bob", false);
    let root = user_record(UserId::new(), "Root", true);
    let harness = harness(&[alice.clone(), bob.clone(), root.clone()]);

    seed_position(&harness, &alice, "Acme", "Backend Engineer").await;
    seed_position(&harness, &bob, "Globex", "Data Engineer").await;

    let scoped = harness
        .service
        .list(
            &actor_for(&root),
            ListQuery {
                all_users: false,
                user_id: Some(bob.id),
            },
        )
        .await
        .unwrap_or_default();

    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].position.owner_id, bob.id);
}

#[tokio::test]
async fn admin_unknown_user_id_yields_empty_list_not_error() {
    let root = user_record(UserId::new(), "Root", true);
    let harness = harness(&[root.clone()]);

    seed_position(&harness, &root, "Acme", "Backend Engineer").await;

    let listed = harness
        .service
        .list(
            &actor_for(&root),
            ListQuery {
                all_users: false,
                user_id: Some(UserId::new()),
            },
        )
        .await;

    assert!(matches!(listed, Ok(ref records) if records.is_empty()));
}

#[tokio::test]
async fn list_is_newest_first() {
    let alice = user_record(UserId::new(), "Alice", false);
    let harness = harness(&[alice.clone()]);

    seed_position(&harness, &alice, "Acme", "First").await;
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    seed_position(&harness, &alice, "Acme", "Second").await;

    let listed = harness
        .service
        .list(&actor_for(&alice), ListQuery::default())
        .await
        .unwrap_or_default();

    assert_eq!(listed[0].position.title, "Second");
    assert_eq!(listed[1].position.title, "First");
}

#[tokio::test]
async fn invalid_draft_creates_nothing() {
    let alice = user_record(UserId::new(), "Alice", false);
    let harness = harness(&[alice.clone()]);

    let empty = PositionDraft {
        title: Some("Backend Engineer".to_owned()),
        ..PositionDraft::default()
    };

    let result = harness.service.create(&actor_for(&alice), None, &empty).await;

    let Err(AppError::Validation(errors)) = result else {
        panic!("expected validation failure");
    };
    assert!(errors.get("company").is_some());
    assert!(errors.get("recruiter_company").is_some());
    assert_eq!(stored_count(&harness), 0);
}

#[tokio::test]
async fn non_admin_supplying_owner_fails_and_persists_nothing() {
    let alice = user_record(UserId::new(), "Alice", false);
    let bob = user_record(UserId::new(), "Bob", false);
    let harness = harness(&[alice.clone(), bob.clone()]);

    let result = harness
        .service
        .create(&actor_for(&alice), Some(bob.id), &draft("Acme", "Backend Engineer"))
        .await;

    let Err(AppError::Validation(errors)) = result else {
        panic!("expected validation failure");
    };
    assert!(errors.get("user_id").is_some());
    assert_eq!(stored_count(&harness), 0);
}

#[tokio::test]
async fn admin_supplied_owner_becomes_record_owner() {
    let alice = user_record(UserId::new(), "Alice", false);
    let root = user_record(UserId::new(), "Root", true);
    let harness = harness(&[alice.clone(), root.clone()]);

    let created = harness
        .service
        .create(&actor_for(&root), Some(alice.id), &draft("Acme", "Backend Engineer"))
        .await
        .unwrap_or_else(|error| panic!("create failed: {error}"));

    assert_eq!(created.position.owner_id, alice.id);
    assert_eq!(created.owner.name, "Alice");
}

#[tokio::test]
async fn admin_supplied_unknown_owner_is_rejected_on_user_id() {
    let root = user_record(UserId::new(), "Root", true);
    let harness = harness(&[root.clone()]);

    let result = harness
        .service
        .create(
            &actor_for(&root),
            Some(UserId::new()),
            &draft("Acme", "Backend Engineer"),
        )
        .await;

    let Err(AppError::Validation(errors)) = result else {
        panic!("expected validation failure");
    };
    assert!(errors.get("user_id").is_some());
    assert_eq!(stored_count(&harness), 0);
}

#[tokio::test]
async fn foreign_show_is_forbidden_not_hidden() {
    let alice = user_record(UserId::new(), "Alice", false);
    let bob = user_record(UserId::new(), "Bob", false);
    let root = user_record(UserId::new(), "Root", true);
    let harness = harness(&[alice.clone(), bob.clone(), root.clone()]);

    let created = seed_position(&harness, &alice, "Acme", "Backend Engineer").await;

    let denied = harness
        .service
        .show(&actor_for(&bob), created.position.id)
        .await
        .err();
    assert!(matches!(denied, Some(AppError::Forbidden(_))));

    let admin_view = harness
        .service
        .show(&actor_for(&root), created.position.id)
        .await;
    assert!(admin_view.is_ok());
}

#[tokio::test]
async fn absent_position_is_not_found() {
    let alice = user_record(UserId::new(), "Alice", false);
    let harness = harness(&[alice.clone()]);

    let missing = harness
        .service
        .show(&actor_for(&alice), PositionId::new())
        .await
        .err();
    assert!(matches!(missing, Some(AppError::NotFound(_))));
}

#[tokio::test]
async fn foreign_update_is_forbidden_and_leaves_record_unchanged() {
    let alice = user_record(UserId::new(), "Alice", false);
    let bob = user_record(UserId::new(), "Bob", false);
    let harness = harness(&[alice.clone(), bob.clone()]);

    let created = seed_position(&harness, &alice, "Acme", "Backend Engineer").await;

    let denied = harness
        .service
        .update(
            &actor_for(&bob),
            created.position.id,
            &draft("Globex", "Hijacked"),
        )
        .await
        .err();
    assert!(matches!(denied, Some(AppError::Forbidden(_))));

    let unchanged = harness
        .service
        .show(&actor_for(&alice), created.position.id)
        .await
        .unwrap_or_else(|error| panic!("show failed: {error}"));
    assert_eq!(unchanged.position.title, "Backend Engineer");
    assert_eq!(unchanged.position.company.as_deref(), Some("Acme"));
}

#[tokio::test]
async fn foreign_delete_is_forbidden_and_record_survives() {
    let alice = user_record(UserId::new(), "Alice", false);
    let bob = user_record(UserId::new(), "Bob", false);
    let harness = harness(&[alice.clone(), bob.clone()]);

    let created = seed_position(&harness, &alice, "Acme", "Backend Engineer").await;

    let denied = harness
        .service
        .delete(&actor_for(&bob), created.position.id)
        .await
        .err();
    assert!(matches!(denied, Some(AppError::Forbidden(_))));
    assert_eq!(stored_count(&harness), 1);
}

#[tokio::test]
async fn admin_can_update_and_delete_any_position() {
    let alice = user_record(UserId::new(), "Alice", false);
    let root = user_record(UserId::new(), "Root", true);
    let harness = harness(&[alice.clone(), root.clone()]);

    let created = seed_position(&harness, &alice, "Acme", "Backend Engineer").await;

    let updated = harness
        .service
        .update(
            &actor_for(&root),
            created.position.id,
            &draft("Acme", "Staff Engineer"),
        )
        .await
        .unwrap_or_else(|error| panic!("admin update failed: {error}"));
    assert_eq!(updated.position.title, "Staff Engineer");
    // Ownership survives an admin edit.
    assert_eq!(updated.position.owner_id, alice.id);

    let deleted = harness
        .service
        .delete(&actor_for(&root), created.position.id)
        .await;
    assert!(deleted.is_ok());
    assert_eq!(stored_count(&harness), 0);
}

#[tokio::test]
async fn owner_update_revalidates_joint_constraint() {
    let alice = user_record(UserId::new(), "Alice", false);
    let harness = harness(&[alice.clone()]);

    let created = seed_position(&harness, &alice, "Acme", "Backend Engineer").await;

    let cleared = PositionDraft {
        title: Some("Backend Engineer".to_owned()),
        ..PositionDraft::default()
    };

    let result = harness
        .service
        .update(&actor_for(&alice), created.position.id, &cleared)
        .await;

    let Err(AppError::Validation(errors)) = result else {
        panic!("expected validation failure");
    };
    assert!(errors.get("company").is_some());
}

#[tokio::test]
async fn list_for_user_requires_admin() {
    let alice = user_record(UserId::new(), "Alice", false);
    let bob = user_record(UserId::new(), "Bob", false);
    let harness = harness(&[alice.clone(), bob.clone()]);

    let denied = harness
        .service
        .list_for_user(&actor_for(&alice), bob.id)
        .await
        .err();
    assert!(matches!(denied, Some(AppError::Forbidden(_))));
}

#[tokio::test]
async fn list_for_user_rejects_unknown_user_with_not_found() {
    let root = user_record(UserId::new(), "Root", true);
    let harness = harness(&[root.clone()]);

    let missing = harness
        .service
        .list_for_user(&actor_for(&root), UserId::new())
        .await
        .err();
    assert!(matches!(missing, Some(AppError::NotFound(_))));
}

#[tokio::test]
async fn list_for_user_returns_only_that_users_positions() {
    let alice = user_record(UserId::new(), "Alice", false);
    let bob = user_record(UserId::new(), "Bob", false);
    let root = user_record(UserId::new(), "Root", true);
    let harness = harness(&[alice.clone(), bob.clone(), root.clone()]);

    seed_position(&harness, &alice, "Acme", "Backend Engineer").await;
    seed_position(&harness, &bob, "Globex", "Data Engineer").await;

    let listed = harness
        .service
        .list_for_user(&actor_for(&root), bob.id)
        .await
        .unwrap_or_default();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].position.owner_id, bob.id);
    assert_eq!(listed[0].owner.name, "Bob");
}
