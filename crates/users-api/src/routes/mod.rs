//! Route definitions
//!
//! The explicit routing table mapping (method, path) to handler.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{health, users};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(health::index))
        .merge(health_routes())
        .merge(user_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(users::create_user))
        .route("/api/users", get(users::list_users))
        .route("/api/users/:user_id", get(users::get_user))
        .route("/api/users/:user_id", put(users::update_user))
        .route("/api/users/:user_id", delete(users::delete_user))
}
