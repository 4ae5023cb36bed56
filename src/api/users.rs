//! User management API endpoints
//!
//! Registration is open; every other operation requires a valid session.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::info;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{PublicUser, UserId};
use crate::infrastructure::auth::AuthOutcome;
use crate::infrastructure::user::{RegisterUserRequest, UpdateUserRequest};

/// Create the users router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(register_user))
        .route(
            "/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
}

/// Register a new user account
///
/// POST /users
///
/// Duplicate emails are rejected with the uniform credential outcome so the
/// endpoint does not double as an account oracle.
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<Response, ApiError> {
    let outcome = state.user_service.register(request).await?;

    match outcome.user.clone().filter(|_| outcome.success) {
        Some(user) => {
            info!(user_id = %user.id, "User registered");
            Ok((StatusCode::CREATED, Json(user)).into_response())
        }
        None => Ok((StatusCode::UNAUTHORIZED, Json(AuthOutcome::failure())).into_response()),
    }
}

/// List all users
///
/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
) -> Result<Json<Vec<PublicUser>>, ApiError> {
    let users = state.user_service.list().await?;

    Ok(Json(
        crate::infrastructure::user::service::to_public_list(users),
    ))
}

/// Get a user by ID
///
/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(id): Path<String>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = state
        .user_service
        .get(&UserId::new(id.as_str()))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User '{id}' not found")))?;

    Ok(Json(user.to_public()))
}

/// Update a user
///
/// PATCH /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = state
        .user_service
        .update(&UserId::new(id.as_str()), request)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User '{id}' not found")))?;

    info!(user_id = %id, "User updated");

    Ok(Json(user.to_public()))
}

/// Delete a user
///
/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(id): Path<String>,
) -> Result<Json<PublicUser>, ApiError> {
    let user = state
        .user_service
        .remove(&UserId::new(id.as_str()))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User '{id}' not found")))?;

    info!(user_id = %id, "User deleted");

    Ok(Json(user.to_public()))
}
