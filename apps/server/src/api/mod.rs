//! API endpoints.

pub mod users;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        // User endpoints
        .route("/api/users", get(users::list_users).post(users::create_user))
        .route(
            "/api/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}

/// Liveness message.
async fn root() -> Json<Value> {
    Json(json!({ "message": "User Management API is running" }))
}

/// Health check endpoint.
///
/// Reports 503 while the store cannot mirror its state to disk.
async fn health_check(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.store.is_degraded() {
        (StatusCode::SERVICE_UNAVAILABLE, "DEGRADED")
    } else {
        (StatusCode::OK, "OK")
    }
}
