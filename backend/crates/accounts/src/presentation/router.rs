//! Account Router

use axum::{Router, routing::post};
use std::sync::Arc;

use platform::token::TokenConfig;

use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AccountAppState};

/// Create the account router with the PostgreSQL repository
pub fn account_router(repo: PgAccountRepository, token_config: TokenConfig) -> Router {
    account_router_generic(repo, token_config)
}

/// Create a generic account router for any repository implementation
pub fn account_router_generic<R>(repo: R, token_config: TokenConfig) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AccountAppState {
        repo: Arc::new(repo),
        token_config: Arc::new(token_config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .with_state(state)
}
