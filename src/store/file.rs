//! JSON file-backed credential store.
//!
//! The whole user list is kept in memory and rewritten to disk after every
//! mutation, mirroring how the browser variant of this system rewrote its
//! localStorage document. Mutations build the new list first, persist it, and
//! only then commit it to memory, so a failed write leaves the in-memory view
//! matching the file.

use super::{seed_admin, StoreError, User, UserStore, ADMIN_USERNAME};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};
use tracing::debug;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    users: RwLock<Vec<User>>,
}

impl FileStore {
    /// Open the store, loading an existing user list from `path` if present.
    ///
    /// # Errors
    /// Returns `StoreError::Persist` if the file exists but cannot be read or
    /// parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let users = if path.exists() {
            let contents =
                fs::read_to_string(&path).map_err(|e| StoreError::Persist(e.to_string()))?;
            serde_json::from_str(&contents).map_err(|e| StoreError::Persist(e.to_string()))?
        } else {
            Vec::new()
        };

        debug!("loaded {} users from {}", users.len(), path.display());

        Ok(Self {
            path,
            users: RwLock::new(users),
        })
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<User>> {
        self.users.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<User>> {
        self.users.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn persist(&self, users: &[User]) -> Result<(), StoreError> {
        let contents =
            serde_json::to_string_pretty(users).map_err(|e| StoreError::Persist(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| StoreError::Persist(e.to_string()))
    }

    /// Persist-then-commit helper shared by all mutations.
    fn commit<F>(&self, mutate: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Vec<User>) -> Result<(), StoreError>,
    {
        let mut guard = self.write();
        let mut next = guard.clone();
        mutate(&mut next)?;
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }
}

impl UserStore for FileStore {
    fn bootstrap(&self, admin_password: &str) -> Result<(), StoreError> {
        let admin_password = admin_password.to_string();
        self.commit(move |users| {
            if users.is_empty() {
                users.push(seed_admin(&admin_password));
            }
            Ok(())
        })
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
        self.commit(move |users| {
            if users.iter().any(|u| u.username == user.username) {
                return Err(StoreError::DuplicateUsername);
            }
            users.push(user);
            Ok(())
        })
    }

    fn update_password(&self, username: &str, new_password: &str) -> Result<(), StoreError> {
        self.commit(move |users| {
            let user = users
                .iter_mut()
                .find(|u| u.username == username)
                .ok_or(StoreError::NotFound)?;
            user.password = new_password.to_string();
            Ok(())
        })
    }

    fn delete(&self, username: &str) -> Result<(), StoreError> {
        if username == ADMIN_USERNAME {
            return Err(StoreError::ProtectedAccount);
        }
        self.commit(move |users| {
            let before = users.len();
            users.retain(|u| u.username != username);
            if users.len() == before {
                return Err(StoreError::NotFound);
            }
            Ok(())
        })
    }

    fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.read().clone())
    }
}
