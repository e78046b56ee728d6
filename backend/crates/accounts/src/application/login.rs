//! Verify Login Use Case
//!
//! Checks credentials and issues a bearer token.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::error::AccountResult;
use platform::credential;
use platform::token::{self, TokenConfig};

/// Login input
pub struct CredentialsInput {
    pub username: String,
    pub password: String,
}

/// Verify login use case
pub struct VerifyLoginUseCase<R>
where
    R: UserRepository,
{
    user_repo: Arc<R>,
    token_config: Arc<TokenConfig>,
}

impl<R> VerifyLoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: Arc<R>, token_config: Arc<TokenConfig>) -> Self {
        Self {
            user_repo,
            token_config,
        }
    }

    /// Verify credentials and return a signed token.
    ///
    /// Unknown usernames and wrong passwords both return `None`; the two
    /// cases are indistinguishable to the caller so usernames cannot be
    /// enumerated through this endpoint.
    pub async fn execute(&self, input: CredentialsInput) -> AccountResult<Option<String>> {
        let user = match self.user_repo.find_by_username(&input.username).await? {
            Some(user) => user,
            None => return Ok(None),
        };

        let password_valid =
            credential::compare_hash(&input.password, &user.password_hash, &user.password_salt);

        if !password_valid {
            tracing::warn!(username = %user.username, "Login rejected, wrong password");
            return Ok(None);
        }

        let token = token::issue_token(
            &self.token_config,
            &user.user_id.to_string(),
            &user.username,
        );

        tracing::info!(user_id = %user.user_id, "User logged in");

        Ok(Some(token))
    }
}
