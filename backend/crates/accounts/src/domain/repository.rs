//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::{NewUser, User};
use crate::error::{AccountError, AccountResult};

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find a user by exact, case-sensitive username.
    ///
    /// Returns `Ok(None)` when no such user exists. A blank username is a
    /// caller bug and fails with an argument error instead.
    async fn find_by_username(&self, username: &str) -> AccountResult<Option<User>>;

    /// Persist a new user.
    ///
    /// Returns `false` (no-op) when the username is already taken. The
    /// existence check and the insert are atomic.
    async fn create(&self, user: NewUser) -> AccountResult<bool>;
}

/// Shared argument check for repository implementations.
pub(crate) fn validate_username(username: &str) -> AccountResult<()> {
    if username.trim().is_empty() {
        return Err(AccountError::InvalidArgument(
            "username cannot be null or blank".to_string(),
        ));
    }
    Ok(())
}
