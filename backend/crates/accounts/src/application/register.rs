//! Register User Use Case
//!
//! Hashes the password and creates the user account.

use std::sync::Arc;

use crate::domain::entity::NewUser;
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};
use platform::credential;

/// Registration input
pub struct RegisterUserInput {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: Option<String>,
}

/// Register user use case
pub struct RegisterUserUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
}

impl<R> RegisterUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }

    /// Register a user.
    ///
    /// Returns `false` when the username is already taken; missing input
    /// fields are argument errors.
    pub async fn execute(&self, input: RegisterUserInput) -> AccountResult<bool> {
        if input.username.trim().is_empty() {
            return Err(AccountError::InvalidArgument(
                "username cannot be null or blank".to_string(),
            ));
        }
        if input.first_name.trim().is_empty() {
            return Err(AccountError::InvalidArgument(
                "first name cannot be null or blank".to_string(),
            ));
        }

        // Rejects an empty password with an argument error
        let (salt, hash) = credential::generate_salt_and_hash(&input.password)?;

        let created = self
            .user_repo
            .create(NewUser {
                username: input.username.clone(),
                password_hash: hash,
                password_salt: salt,
                first_name: input.first_name,
                last_name: input.last_name,
            })
            .await?;

        if created {
            tracing::info!(username = %input.username, "User registered");
        } else {
            tracing::debug!(username = %input.username, "Registration skipped, username taken");
        }

        Ok(created)
    }
}
