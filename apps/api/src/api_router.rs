use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use applitrack_core::{AppError, ValidationErrors};

use crate::state::AppState;
use crate::{auth, handlers, middleware};

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/positions",
            get(handlers::positions::list_positions_handler)
                .post(handlers::positions::create_position_handler),
        )
        .route(
            "/api/positions/{position_id}",
            get(handlers::positions::show_position_handler)
                .put(handlers::positions::update_position_handler)
                .patch(handlers::positions::update_position_handler)
                .delete(handlers::positions::delete_position_handler),
        )
        .route("/api/users", get(handlers::users::list_users_handler))
        .route(
            "/api/users/{user_id}/positions",
            get(handlers::users::user_positions_handler),
        )
        .route("/api/user", get(auth::me_handler))
        .route("/api/logout", post(auth::logout_handler))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    let cors_layer = CorsLayer::new()
        .allow_origin(HeaderValue::from_str(frontend_url).map_err(|error| {
            AppError::Validation(ValidationErrors::single(
                "FRONTEND_URL",
                format!("invalid FRONTEND_URL: {error}"),
            ))
        })?)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Ok(Router::new()
        .route("/api/ping", get(handlers::health::ping_handler))
        .route("/api/login", post(auth::login_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
