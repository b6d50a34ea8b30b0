//! Domain types and pure rules for Applitrack.
//!
//! Holds the position model, its field validation, and the access policy
//! deciding which positions an actor may see or mutate. Everything here is
//! synchronous and free of I/O so the rules stay independently testable.

#![forbid(unsafe_code)]

mod policy;
mod position;

pub use policy::{ListScope, is_owner_or_admin, resolve_create_owner, resolve_list_scope};
pub use position::{
    JOINT_COMPANY_MESSAGE, MAX_FIELD_LENGTH, PositionDraft, PositionFields, PositionId,
    PositionStatus,
};
