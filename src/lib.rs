//! # Aula (Classroom Portal Users)
//!
//! `aula` is a small user-authentication and user-management service: login,
//! registration, password change, and admin-only user administration, exposed
//! as a JSON HTTP API with cookie-based sessions.
//!
//! ## Credential Store
//!
//! The user list is the single source of truth, held behind the
//! [`store::UserStore`] trait. Two backends ship: an in-memory list and a
//! JSON file with write-through persistence. Passwords are stored in
//! cleartext by design in this demo system and are redacted at the API
//! boundary.
//!
//! ## Sessions & Guards
//!
//! A successful login creates a server-side session and hands the client an
//! opaque token in an `HttpOnly` cookie. Guarded endpoints re-resolve the
//! token against the store on every request, so deletions and password
//! changes take effect immediately. The `admin` account is protected: it is
//! seeded at bootstrap and can never be deleted.

pub mod aula;
pub mod cli;
pub mod store;
pub mod validation;

pub use aula::APP_USER_AGENT;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
