pub mod health;
pub use self::health::health;

pub mod user_login;
pub use self::user_login::{login, logout};

pub mod user_register;
pub use self::user_register::register;

pub mod current_user;
pub use self::current_user::current_user;

pub mod change_password;
pub use self::change_password::change_password;

pub mod users;
pub use self::users::{create_user, delete_user, list_users};

// common types and guards for the handlers
use crate::{
    aula::session::{extract_session_token, SharedSessions},
    store::{Role, SharedStore, StoreError, User},
    validation::ValidationError,
};
use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

/// The user shape the API exposes. Passwords never cross this boundary.
#[derive(ToSchema, Serialize, Debug, PartialEq, Eq)]
pub struct UserSummary {
    pub username: String,
    pub role: Role,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            role: user.role,
        }
    }
}

/// Every failure a handler can surface, mapped to a status code and a
/// `{"error": ...}` body. None of these are fatal to the process.
#[derive(Debug)]
pub enum ApiError {
    Validation(&'static str),
    DuplicateUsername,
    NotFound,
    ProtectedAccount,
    InvalidCredentials,
    Unauthorized,
    Forbidden,
    Store(StoreError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::DuplicateUsername => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::ProtectedAccount => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(message) => (*message).to_string(),
            Self::DuplicateUsername => StoreError::DuplicateUsername.to_string(),
            Self::NotFound => StoreError::NotFound.to_string(),
            Self::ProtectedAccount => StoreError::ProtectedAccount.to_string(),
            Self::InvalidCredentials => "Invalid username or password".to_string(),
            Self::Unauthorized => "Not authenticated".to_string(),
            Self::Forbidden => "Access denied: admin only".to_string(),
            Self::Store(_) => "Storage error".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Store(err) = &self {
            error!("Storage failure: {err}");
        }
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => Self::DuplicateUsername,
            StoreError::NotFound => Self::NotFound,
            StoreError::ProtectedAccount => Self::ProtectedAccount,
            StoreError::Persist(_) => Self::Store(err),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.message())
    }
}

/// Resolve the session credential into the live user record.
///
/// Fails `Unauthorized` for missing or stale sessions, including sessions
/// whose user has since been deleted. Callers must not run guarded logic when
/// this fails.
///
/// # Errors
/// Returns `ApiError::Unauthorized` or a storage failure.
pub fn require_auth(
    headers: &HeaderMap,
    store: &SharedStore,
    sessions: &SharedSessions,
) -> Result<User, ApiError> {
    let token = extract_session_token(headers).ok_or(ApiError::Unauthorized)?;
    let username = sessions.resolve(&token).ok_or(ApiError::Unauthorized)?;
    store
        .find_by_username(&username)?
        .ok_or(ApiError::Unauthorized)
}

/// `require_auth`, then gate on the admin role.
///
/// # Errors
/// Returns `ApiError::Unauthorized` for anonymous callers and
/// `ApiError::Forbidden` for authenticated non-admins.
pub fn require_admin(
    headers: &HeaderMap,
    store: &SharedStore,
    sessions: &SharedSessions,
) -> Result<User, ApiError> {
    let user = require_auth(headers, store, sessions)?;
    if !user.is_admin() {
        return Err(ApiError::Forbidden);
    }
    Ok(user)
}
