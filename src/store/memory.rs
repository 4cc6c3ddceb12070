//! In-memory credential store, the default backend.

use super::{seed_admin, StoreError, User, UserStore, ADMIN_USERNAME};
use std::sync::RwLock;

/// Keeps the user list in an `RwLock`ed `Vec`, preserving insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<User>> {
        self.users.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<User>> {
        self.users.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl UserStore for MemoryStore {
    fn bootstrap(&self, admin_password: &str) -> Result<(), StoreError> {
        let mut users = self.write();
        if users.is_empty() {
            users.push(seed_admin(admin_password));
        }
        Ok(())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.read().iter().find(|u| u.username == username).cloned())
    }

    fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned())
    }

    fn insert(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.write();
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::DuplicateUsername);
        }
        users.push(user);
        Ok(())
    }

    fn update_password(&self, username: &str, new_password: &str) -> Result<(), StoreError> {
        let mut users = self.write();
        let user = users
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or(StoreError::NotFound)?;
        user.password = new_password.to_string();
        Ok(())
    }

    fn delete(&self, username: &str) -> Result<(), StoreError> {
        if username == ADMIN_USERNAME {
            return Err(StoreError::ProtectedAccount);
        }
        let mut users = self.write();
        let before = users.len();
        users.retain(|u| u.username != username);
        if users.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.read().clone())
    }
}
