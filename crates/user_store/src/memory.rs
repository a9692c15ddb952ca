//! In-memory user store implementation for testing.

use async_trait::async_trait;
use chrono::Utc;
use entities::{NewUser, User, UserPatch};
use tokio::sync::RwLock;

use crate::{StoreError, StoreResult, UserStore, next_id};

/// In-memory user store for testing purposes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
}

impl MemoryStore {
    /// Creates a new, empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given users.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn get(&self, id: u64) -> StoreResult<Option<User>> {
        Ok(find(&self.users.read().await, id).cloned())
    }

    async fn create(&self, new: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        insert_new(&mut users, new)
    }

    async fn update(&self, id: u64, patch: UserPatch) -> StoreResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(patch_in_place(&mut users, id, patch))
    }

    async fn delete(&self, id: u64) -> StoreResult<bool> {
        let mut users = self.users.write().await;
        Ok(remove(&mut users, id))
    }
}

pub(crate) fn find(users: &[User], id: u64) -> Option<&User> {
    users.iter().find(|u| u.id == id)
}

/// Appends a new user with the next id and fresh timestamps.
pub(crate) fn insert_new(users: &mut Vec<User>, new: NewUser) -> StoreResult<User> {
    let id = next_id(users).ok_or(StoreError::IdSpaceExhausted)?;
    let user = User::from_new(id, new, Utc::now());
    users.push(user.clone());
    Ok(user)
}

/// Replaces the matching user with the patched version, keeping its position.
pub(crate) fn patch_in_place(users: &mut [User], id: u64, patch: UserPatch) -> Option<User> {
    let user = users.iter_mut().find(|u| u.id == id)?;
    user.apply(patch, Utc::now());
    Some(user.clone())
}

/// Removes the matching user. Later entries shift down to close the gap.
pub(crate) fn remove(users: &mut Vec<User>, id: u64) -> bool {
    match users.iter().position(|u| u.id == id) {
        Some(index) => {
            users.remove(index);
            true
        }
        None => false,
    }
}
