//! User store trait definitions.

use async_trait::async_trait;
use entities::{NewUser, User, UserPatch};

use crate::StoreResult;

/// Trait for user storage operations.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Lists all users in insertion order.
    async fn list(&self) -> StoreResult<Vec<User>>;

    /// Gets a user by ID.
    async fn get(&self, id: u64) -> StoreResult<Option<User>>;

    /// Creates a user, assigning its id and timestamps.
    async fn create(&self, new: NewUser) -> StoreResult<User>;

    /// Merges a patch onto an existing user.
    ///
    /// Returns `None` when no user has the given id.
    async fn update(&self, id: u64, patch: UserPatch) -> StoreResult<Option<User>>;

    /// Deletes a user.
    ///
    /// Returns `false` when no user has the given id.
    async fn delete(&self, id: u64) -> StoreResult<bool>;

    /// Returns true if stored state may not survive a restart.
    fn is_degraded(&self) -> bool {
        false
    }
}

/// Computes the identifier for the next created user.
///
/// This is one more than the largest id held, or 1 for an empty list.
/// Returns `None` if the largest id is already `u64::MAX`.
pub fn next_id(users: &[User]) -> Option<u64> {
    users
        .iter()
        .map(|u| u.id)
        .max()
        .map_or(Some(1), |max| max.checked_add(1))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn user(id: u64) -> User {
        User::from_new(id, NewUser::new("A", "B", "a@b.c"), Utc::now())
    }

    #[test]
    fn test_next_id_empty() {
        assert_eq!(next_id(&[]), Some(1));
    }

    #[test]
    fn test_next_id_uses_max_not_len() {
        assert_eq!(next_id(&[user(1), user(2)]), Some(3));
        assert_eq!(next_id(&[user(5), user(2)]), Some(6));
    }

    #[test]
    fn test_next_id_overflow() {
        assert_eq!(next_id(&[user(u64::MAX)]), None);
    }
}
