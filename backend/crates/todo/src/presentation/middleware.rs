//! Bearer Token Middleware
//!
//! Verifies the `Authorization: Bearer` token and resolves the caller's
//! user id before any todo handler runs. Routes behind this middleware
//! can rely on the [`AuthUser`] extension being present.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::TodoError;
use kernel::id::UserId;
use platform::token::{self, TokenConfig};

/// Authenticated caller, stored in request extensions
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
}

/// Middleware that requires a valid bearer token
pub async fn require_bearer_user(
    State(config): State<Arc<TokenConfig>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let user_id = match bearer_user_id(&config, &req) {
        Some(user_id) => user_id,
        None => return Err(TodoError::Unauthorized.into_response()),
    };

    req.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(req).await)
}

fn bearer_user_id(config: &TokenConfig, req: &Request<Body>) -> Option<UserId> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    let token = header_value.strip_prefix("Bearer ")?;

    let claims = match token::verify_token(config, token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Bearer token rejected");
            return None;
        }
    };

    // The user id claim is issued as a decimal string
    let user_id: i64 = claims.user_id.parse().ok()?;

    Some(UserId::from_i64(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::token::issue_token;

    fn request(auth_header: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/lists");
        if let Some(value) = auth_header {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_valid_token_resolves_user() {
        let config = TokenConfig::development();
        let token = issue_token(&config, "7", "alice");

        let user_id = bearer_user_id(&config, &request(Some(&format!("Bearer {token}"))));
        assert_eq!(user_id, Some(UserId::from_i64(7)));
    }

    #[test]
    fn test_missing_and_malformed_headers_are_rejected() {
        let config = TokenConfig::development();
        let token = issue_token(&config, "7", "alice");

        assert_eq!(bearer_user_id(&config, &request(None)), None);
        // Scheme must be Bearer
        assert_eq!(
            bearer_user_id(&config, &request(Some(&format!("Basic {token}")))),
            None
        );
        assert_eq!(
            bearer_user_id(&config, &request(Some("Bearer not.a.token"))),
            None
        );
    }

    #[test]
    fn test_non_numeric_user_claim_is_rejected() {
        let config = TokenConfig::development();
        let token = issue_token(&config, "alice", "alice");

        assert_eq!(
            bearer_user_id(&config, &request(Some(&format!("Bearer {token}")))),
            None
        );
    }
}
