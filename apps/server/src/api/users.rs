//! User directory API endpoints.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use entities::{NewUser, User, UserPatch};
use tracing::{debug, info};

use crate::error::{ServerError, ServerResult, REQUIRED_FIELDS};
use crate::state::AppState;

/// Parses a path identifier.
///
/// Anything other than a plain non-negative integer can never match a
/// stored user, so it is reported as not found.
fn parse_id(raw: &str) -> ServerResult<u64> {
    raw.parse().map_err(|_| {
        debug!(id = raw, "Unparseable user id");
        ServerError::user_not_found()
    })
}

/// Unwraps a JSON body, turning decode failures into a 400.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ServerResult<T> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            debug!(error = %rejection.body_text(), "Rejected request body");
            Err(ServerError::InvalidBody(rejection.body_text()))
        }
    }
}

/// Lists all users.
pub async fn list_users(State(state): State<AppState>) -> ServerResult<Json<Vec<User>>> {
    let users = state.store.list().await?;
    Ok(Json(users))
}

/// Gets a user by ID.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<User>> {
    let id = parse_id(&id)?;

    let user = state
        .store
        .get(id)
        .await?
        .ok_or_else(ServerError::user_not_found)?;

    Ok(Json(user))
}

/// Creates a user.
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> ServerResult<(StatusCode, Json<User>)> {
    let new = body(payload)?;

    if new.missing_required() {
        debug!("Create rejected, required fields missing");
        return Err(ServerError::Validation(REQUIRED_FIELDS));
    }

    let user = state.store.create(new).await?;

    info!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Updates a user, merging the fields present in the body.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> ServerResult<Json<User>> {
    let patch = body(payload)?;
    let id = parse_id(&id)?;

    let user = state
        .store
        .update(id, patch)
        .await?
        .ok_or_else(ServerError::user_not_found)?;

    info!(user_id = id, "User updated");

    Ok(Json(user))
}

/// Deletes a user.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<StatusCode> {
    let id = parse_id(&id)?;

    if !state.store.delete(id).await? {
        return Err(ServerError::user_not_found());
    }

    info!(user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
