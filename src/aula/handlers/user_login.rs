use crate::{
    aula::handlers::{ApiError, UserSummary},
    aula::session::{clear_session_cookie, extract_session_token, session_cookie, SharedSessions},
    store::SharedStore,
    validation::required_fields,
};
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserLogin {
    username: String,
    password: String,
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = UserLogin,
    responses(
        (status = 200, description = "Login successful", body = UserSummary, content_type = "application/json"),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Invalid username or password"),
    ),
    tag = "auth"
)]
#[instrument(skip_all, fields(username = tracing::field::Empty))]
pub async fn login(
    store: Extension<SharedStore>,
    sessions: Extension<SharedSessions>,
    payload: Option<Json<UserLogin>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(Json(payload)) = payload else {
        return Err(ApiError::Validation("Missing payload"));
    };

    let username = payload.username.trim();
    tracing::Span::current().record("username", username);

    required_fields(username, &payload.password)?;

    let Some(user) = store.find_by_credentials(username, &payload.password)? else {
        debug!("credentials did not match");
        return Err(ApiError::InvalidCredentials);
    };

    let token = sessions.create(&user.username);

    let mut headers = HeaderMap::new();
    if let Ok(cookie) = session_cookie(&token) {
        headers.insert(SET_COOKIE, cookie);
    }

    debug!("login successful");

    Ok((StatusCode::OK, headers, Json(UserSummary::from(user))))
}

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Session cleared"),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn logout(headers: HeaderMap, sessions: Extension<SharedSessions>) -> impl IntoResponse {
    if let Some(token) = extract_session_token(&headers) {
        sessions.revoke(&token);
    }

    // Always clear the cookie, even when the session was already gone.
    let mut response_headers = HeaderMap::new();
    if let Ok(cookie) = clear_session_cookie() {
        response_headers.insert(SET_COOKIE, cookie);
    }

    (
        StatusCode::OK,
        response_headers,
        Json(json!({ "message": "Logged out successfully" })),
    )
}
