//! Admin-only user management endpoints: list, add, delete.

use crate::{
    aula::handlers::{require_admin, ApiError, UserSummary},
    aula::session::SharedSessions,
    store::{Role, SharedStore, User},
    validation::{password_strength, required_fields},
};
use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserCreate {
    username: String,
    password: String,
    role: String,
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All users in store order", body = [UserSummary], content_type = "application/json"),
        (status = 401, description = "No active session"),
        (status = 403, description = "Caller is not an admin"),
    ),
    tag = "users"
)]
#[instrument(skip_all)]
pub async fn list_users(
    headers: HeaderMap,
    store: Extension<SharedStore>,
    sessions: Extension<SharedSessions>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&headers, &store, &sessions)?;

    let users: Vec<UserSummary> = store
        .list()?
        .into_iter()
        .map(UserSummary::from)
        .collect();

    Ok((StatusCode::OK, Json(users)))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserCreate,
    responses(
        (status = 201, description = "User created"),
        (status = 400, description = "Validation failure or duplicate username"),
        (status = 401, description = "No active session"),
        (status = 403, description = "Caller is not an admin"),
    ),
    tag = "users"
)]
#[instrument(skip_all, fields(username = tracing::field::Empty))]
pub async fn create_user(
    headers: HeaderMap,
    store: Extension<SharedStore>,
    sessions: Extension<SharedSessions>,
    payload: Option<Json<UserCreate>>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&headers, &store, &sessions)?;

    let Some(Json(payload)) = payload else {
        return Err(ApiError::Validation("Missing payload"));
    };

    let username = payload.username.trim().to_string();
    tracing::Span::current().record("username", username.as_str());

    // Same rules as self-registration, plus an explicit role.
    required_fields(&username, &payload.password)?;
    password_strength(&payload.password)?;

    let role: Role = payload
        .role
        .trim()
        .parse()
        .map_err(|()| ApiError::Validation("Invalid role"))?;

    store.insert(User::new(username, payload.password, role))?;

    debug!("user created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully" })),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/users/{username}",
    params(
        ("username" = String, Path, description = "Username to delete")
    ),
    responses(
        (status = 200, description = "User deleted"),
        (status = 401, description = "No active session"),
        (status = 403, description = "Caller is not an admin, or the target is the protected account"),
        (status = 404, description = "User not found"),
    ),
    tag = "users"
)]
#[instrument(skip_all, fields(username = %username))]
pub async fn delete_user(
    Path(username): Path<String>,
    headers: HeaderMap,
    store: Extension<SharedStore>,
    sessions: Extension<SharedSessions>,
) -> Result<impl IntoResponse, ApiError> {
    require_admin(&headers, &store, &sessions)?;

    // ProtectedAccount and NotFound both surface from the store.
    store.delete(&username)?;

    // The deleted user may still hold a live session.
    sessions.revoke_user(&username);

    debug!("user deleted");

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "User deleted successfully" })),
    ))
}
