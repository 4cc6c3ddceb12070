//! The credential store: the authoritative collection of user records.
//!
//! The [`UserStore`] trait exposes the operations every backend must support;
//! callers never see the backing storage. Two backends exist: an in-memory
//! list ([`MemoryStore`]) and a JSON file with write-through persistence
//! ([`FileStore`]).

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr, sync::Arc};
use utoipa::ToSchema;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// The protected account: seeded at bootstrap and exempt from deletion.
pub const ADMIN_USERNAME: &str = "admin";

/// Seed password for the protected account, used unless overridden at startup.
pub const DEFAULT_ADMIN_PASSWORD: &str = "Admin@123";

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "student" => Ok(Self::Student),
            _ => Err(()),
        }
    }
}

/// A user record as kept by the store.
///
/// Passwords are cleartext by design in this system; they must never leave the
/// store layer through the API, see `UserSummary` in the handlers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl User {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum StoreError {
    /// Insert with a username that is already taken.
    DuplicateUsername,
    /// No record for the given username.
    NotFound,
    /// Attempt to delete the protected account.
    ProtectedAccount,
    /// The backing storage could not be read or written.
    Persist(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateUsername => f.write_str("Username already exists"),
            Self::NotFound => f.write_str("User not found"),
            Self::ProtectedAccount => f.write_str("Cannot delete admin user"),
            Self::Persist(err) => write!(f, "Storage error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Operations every credential store backend must support.
///
/// All lookups are exact and case-sensitive. Mutations assume a single logical
/// writer; backends only need enough locking to be safe to share across
/// request handlers.
pub trait UserStore: Send + Sync {
    /// Seed the store with the protected admin account.
    ///
    /// Idempotent: an existing collection is never overwritten, so the
    /// password argument only matters on the very first run.
    ///
    /// # Errors
    /// Returns `StoreError::Persist` if the backing storage fails.
    fn bootstrap(&self, admin_password: &str) -> Result<(), StoreError>;

    /// # Errors
    /// Returns `StoreError::Persist` if the backing storage fails.
    fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Exact-match credential lookup, case-sensitive on both fields.
    ///
    /// # Errors
    /// Returns `StoreError::Persist` if the backing storage fails.
    fn find_by_credentials(&self, username: &str, password: &str)
        -> Result<Option<User>, StoreError>;

    /// # Errors
    /// Returns `StoreError::DuplicateUsername` if the username is taken.
    fn insert(&self, user: User) -> Result<(), StoreError>;

    /// # Errors
    /// Returns `StoreError::NotFound` if no such user exists.
    fn update_password(&self, username: &str, new_password: &str) -> Result<(), StoreError>;

    /// Strict delete: removing an absent user is an error, not a no-op.
    ///
    /// # Errors
    /// Returns `StoreError::ProtectedAccount` for the admin account and
    /// `StoreError::NotFound` for unknown usernames.
    fn delete(&self, username: &str) -> Result<(), StoreError>;

    /// All users in insertion order.
    ///
    /// # Errors
    /// Returns `StoreError::Persist` if the backing storage fails.
    fn list(&self) -> Result<Vec<User>, StoreError>;
}

/// Shared handle passed to the router and handlers.
pub type SharedStore = Arc<dyn UserStore>;

/// The record seeded by [`UserStore::bootstrap`].
#[must_use]
pub fn seed_admin(password: &str) -> User {
    User::new(ADMIN_USERNAME, password, Role::Admin)
}
