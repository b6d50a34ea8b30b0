use applitrack_application::{ApiTokenService, PositionService, UserService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub position_service: PositionService,
    pub user_service: UserService,
    pub api_token_service: ApiTokenService,
}
