//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::token::TokenConfig;

use crate::application::{
    CredentialsInput, RegisterUserInput, RegisterUserUseCase, VerifyLoginUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};
use crate::presentation::dto::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

/// Shared state for account handlers
#[derive(Clone)]
pub struct AccountAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub token_config: Arc<TokenConfig>,
}

/// POST /api/v1/users/register
pub async fn register<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AccountResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUserUseCase::new(state.repo.clone());

    let created = use_case
        .execute(RegisterUserInput {
            username: req.username,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        })
        .await?;

    // Duplicate username is an expected outcome, not a fault
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::CONFLICT
    };

    Ok((status, Json(RegisterResponse { created })))
}

/// POST /api/v1/users/login
pub async fn login<R>(
    State(state): State<AccountAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AccountResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = VerifyLoginUseCase::new(state.repo.clone(), state.token_config.clone());

    let token = use_case
        .execute(CredentialsInput {
            username: req.username,
            password: req.password,
        })
        .await?
        // Same outward signal for unknown user and wrong password
        .ok_or(AccountError::InvalidCredentials)?;

    Ok(Json(LoginResponse { token }))
}
