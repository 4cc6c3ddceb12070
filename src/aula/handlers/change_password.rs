use crate::{
    aula::handlers::{require_auth, ApiError},
    aula::session::SharedSessions,
    store::SharedStore,
    validation::password_strength,
};
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ChangePassword {
    #[serde(rename = "currentPassword")]
    current_password: String,
    #[serde(rename = "newPassword")]
    new_password: String,
}

#[utoipa::path(
    post,
    path = "/api/change-password",
    request_body = ChangePassword,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Wrong current password or weak new password"),
        (status = 401, description = "No active session"),
    ),
    tag = "auth"
)]
#[instrument(skip_all, fields(username = tracing::field::Empty))]
pub async fn change_password(
    headers: HeaderMap,
    store: Extension<SharedStore>,
    sessions: Extension<SharedSessions>,
    payload: Option<Json<ChangePassword>>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_auth(&headers, &store, &sessions)?;
    tracing::Span::current().record("username", user.username.as_str());

    let Some(Json(payload)) = payload else {
        return Err(ApiError::Validation("Missing payload"));
    };

    if payload.current_password != user.password {
        return Err(ApiError::Validation("Current password is incorrect"));
    }

    password_strength(&payload.new_password)?;

    store.update_password(&user.username, &payload.new_password)?;

    // The session only holds the username, so the next request already sees
    // the new password; nothing to invalidate.
    debug!("password changed");

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Password changed successfully" })),
    ))
}
