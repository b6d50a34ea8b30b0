//! Application services and persistence ports for Applitrack.
//!
//! Services orchestrate the domain access policy with plain CRUD
//! repositories. Repositories and the password hasher are ports
//! (`Arc<dyn Trait>`) so infrastructure stays swappable and the services
//! stay testable with in-memory fakes.

#![forbid(unsafe_code)]

mod api_token_service;
mod position_service;
mod user_service;

pub use api_token_service::{ApiTokenRecord, ApiTokenRepository, ApiTokenService};
pub use position_service::{
    ListQuery, OwnerSummary, PositionRecord, PositionRepository, PositionService,
    PositionWithOwner,
};
pub use user_service::{PasswordHasher, UserRecord, UserRepository, UserService, UserSummary};
