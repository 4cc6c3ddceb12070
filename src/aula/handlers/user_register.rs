use crate::{
    aula::handlers::ApiError,
    store::{Role, SharedStore, User},
    validation::{password_strength, passwords_match, required_fields},
};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserRegister {
    username: String,
    password: String,
    /// Optional confirmation; when supplied it must equal `password`.
    #[serde(rename = "confirmPassword")]
    confirm_password: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = UserRegister,
    responses(
        (status = 201, description = "Registration successful"),
        (status = 400, description = "Validation failure or duplicate username"),
    ),
    tag = "auth"
)]
#[instrument(skip_all, fields(username = tracing::field::Empty))]
pub async fn register(
    store: Extension<SharedStore>,
    payload: Option<Json<UserRegister>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(Json(payload)) = payload else {
        return Err(ApiError::Validation("Missing payload"));
    };

    let username = payload.username.trim().to_string();
    tracing::Span::current().record("username", username.as_str());

    // Validate everything before touching the store.
    required_fields(&username, &payload.password)?;
    password_strength(&payload.password)?;
    if let Some(confirmation) = &payload.confirm_password {
        passwords_match(&payload.password, confirmation)?;
    }

    // Self-registration always creates a student; uniqueness is enforced by
    // the store at insert time.
    store.insert(User::new(username, payload.password, Role::Student))?;

    debug!("registration successful");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Registration successful" })),
    ))
}
