use crate::{
    aula::handlers::{require_auth, ApiError, UserSummary},
    aula::session::SharedSessions,
    store::SharedStore,
};
use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/current-user",
    responses(
        (status = 200, description = "The authenticated user", body = UserSummary, content_type = "application/json"),
        (status = 401, description = "No active session"),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn current_user(
    headers: HeaderMap,
    store: Extension<SharedStore>,
    sessions: Extension<SharedSessions>,
) -> Result<impl IntoResponse, ApiError> {
    // Re-derived from the store on every call rather than trusted from any
    // client-side copy.
    let user = require_auth(&headers, &store, &sessions)?;

    Ok((StatusCode::OK, Json(UserSummary::from(user))))
}
