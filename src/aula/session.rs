//! Server-side session tracking and the cookie that carries the token.
//!
//! A session maps an opaque token to a username; nothing else is cached. The
//! current user is always re-resolved against the credential store, so a
//! deleted account or changed password takes effect on the next request.

use axum::http::{
    header::{InvalidHeaderValue, AUTHORIZATION, COOKIE},
    HeaderMap, HeaderValue,
};
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};
use ulid::Ulid;

pub const SESSION_COOKIE_NAME: &str = "aula_session";

/// All active sessions, keyed by token.
#[derive(Debug, Default)]
pub struct Sessions {
    inner: RwLock<HashMap<String, String>>,
}

/// Shared handle passed to the router and handlers.
pub type SharedSessions = Arc<Sessions>;

impl Sessions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `username` and return the token for the cookie.
    pub fn create(&self, username: &str) -> String {
        let token = Ulid::new().to_string();
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.clone(), username.to_string());
        token
    }

    /// The username behind a presented token, if the session is live.
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
    }

    /// End a session. Revoking an unknown token is a no-op.
    pub fn revoke(&self, token: &str) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }

    /// Drop every session belonging to `username`, used when the account is
    /// deleted by an admin.
    pub fn revoke_user(&self, username: &str) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|_, owner| owner != username);
    }
}

/// Build the `HttpOnly` cookie carrying the session token.
///
/// # Errors
/// Returns an error if the token produces an invalid header value.
pub fn session_cookie(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax"
    ))
}

/// Expire the session cookie on the client.
///
/// # Errors
/// Returns an error if the header value cannot be built.
pub fn clear_session_cookie() -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0"
    ))
}

/// Pull the session token from a bearer header or the session cookie.
#[must_use]
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(token);
    }
    let value = headers.get(COOKIE)?.to_str().ok()?;
    for pair in value.split(';') {
        if let Some((key, val)) = pair.trim().split_once('=') {
            if key.trim() == SESSION_COOKIE_NAME {
                return Some(val.trim().to_string());
            }
        }
    }
    None
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
