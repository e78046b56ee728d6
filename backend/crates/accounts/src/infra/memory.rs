//! In-memory Repository Implementation
//!
//! Same policy surface as the Postgres repository, backed by a mutex-held
//! map. Used by unit tests and runnable demos.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use crate::domain::entity::{NewUser, User};
use crate::domain::repository::{UserRepository, validate_username};
use crate::error::AccountResult;
use kernel::id::UserId;

/// In-memory account store
#[derive(Clone, Default)]
pub struct MemoryAccountStore {
    inner: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users (test helper)
    pub fn len(&self) -> usize {
        self.inner.lock().expect("account store poisoned").users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserRepository for MemoryAccountStore {
    async fn find_by_username(&self, username: &str) -> AccountResult<Option<User>> {
        validate_username(username)?;

        let state = self.inner.lock().expect("account store poisoned");
        Ok(state
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> AccountResult<bool> {
        let mut state = self.inner.lock().expect("account store poisoned");

        if state.users.values().any(|u| u.username == user.username) {
            return Ok(false);
        }

        state.next_id += 1;
        let user_id = state.next_id;
        state.users.insert(
            user_id,
            User {
                user_id: UserId::from_i64(user_id),
                username: user.username,
                password_hash: user.password_hash,
                password_salt: user.password_salt,
                first_name: user.first_name,
                last_name: user.last_name,
            },
        );

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccountError;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: vec![1, 2, 3],
            password_salt: vec![4, 5, 6],
            first_name: "Test".to_string(),
            last_name: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let store = MemoryAccountStore::new();
        assert!(store.create(new_user("alice")).await.unwrap());

        let found = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.username, "alice");
        assert_eq!(found.user_id.value(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_noop() {
        let store = MemoryAccountStore::new();
        assert!(store.create(new_user("alice")).await.unwrap());
        assert!(!store.create(new_user("alice")).await.unwrap());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_username_match_is_case_sensitive() {
        let store = MemoryAccountStore::new();
        assert!(store.create(new_user("Alice")).await.unwrap());

        assert!(store.find_by_username("alice").await.unwrap().is_none());
        assert!(store.find_by_username("Alice").await.unwrap().is_some());
        // Different case is a different username, so this must succeed
        assert!(store.create(new_user("alice")).await.unwrap());
    }

    #[tokio::test]
    async fn test_blank_username_is_argument_error() {
        let store = MemoryAccountStore::new();
        let err = store.find_by_username("  ").await.unwrap_err();
        assert!(matches!(err, AccountError::InvalidArgument(_)));
    }
}
