//! Signed Bearer Tokens
//!
//! Compact JWS (HS256) tokens carrying the authenticated user id and
//! username. Issuance lives here next to the hashing code; verification
//! is only ever called by the transport boundary, never by core logic.
//!
//! The signing key and issuer are injected through [`TokenConfig`] at
//! construction time rather than read from process-wide state.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Claim key carrying the numeric user id
///
/// Shared constant: the boundary middleware resolves the authenticated
/// user from this claim, so issuance and verification must agree on it.
pub const USER_ID_CLAIM: &str = "userId";

/// Token configuration, injected wherever tokens are issued or verified
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Symmetric HMAC-SHA256 signing key
    pub signing_key: String,
    /// Issuer claim, checked on verification
    pub issuer: String,
    /// Token lifetime
    pub ttl: Duration,
}

impl TokenConfig {
    pub fn new(signing_key: impl Into<String>, issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            signing_key: signing_key.into(),
            issuer: issuer.into(),
            ttl,
        }
    }

    /// Config with a fixed key and a 1 hour TTL (for development and tests)
    pub fn development() -> Self {
        Self::new(
            "development-signing-key-not-for-production",
            "todo-api-dev",
            Duration::from_secs(3600),
        )
    }
}

/// Token errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Unsupported signing algorithm")]
    UnsupportedAlgorithm,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Unexpected token issuer")]
    WrongIssuer,

    #[error("Token has expired")]
    Expired,
}

#[derive(Serialize, Deserialize)]
struct TokenHeader {
    alg: String,
    typ: String,
}

/// Verified token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject user id, decimal string (see [`USER_ID_CLAIM`])
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Username, secondary claim for display/diagnostics
    pub name: String,
    pub iss: String,
    pub iat: u64,
    pub exp: u64,
}

/// Issue a signed, time-bound bearer token for a user
pub fn issue_token(config: &TokenConfig, user_id: &str, username: &str) -> String {
    let now = unix_now();

    let header = TokenHeader {
        alg: "HS256".to_string(),
        typ: "JWT".to_string(),
    };
    let claims = TokenClaims {
        user_id: user_id.to_string(),
        name: username.to_string(),
        iss: config.issuer.clone(),
        iat: now,
        exp: now + config.ttl.as_secs(),
    };

    let header_b64 =
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header).expect("header serializes"));
    let claims_b64 =
        URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).expect("claims serialize"));

    let signing_input = format!("{header_b64}.{claims_b64}");
    let signature = sign(config, signing_input.as_bytes());

    format!("{signing_input}.{}", URL_SAFE_NO_PAD.encode(signature))
}

/// Verify a bearer token and return its claims
///
/// Checks structure, algorithm, signature, issuer and expiry, in that
/// order. Signature comparison is constant-time.
pub fn verify_token(config: &TokenConfig, token: &str) -> Result<TokenClaims, TokenError> {
    let mut parts = token.split('.');
    let (header_b64, claims_b64, signature_b64) =
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(c), Some(s), None) => (h, c, s),
            _ => return Err(TokenError::Malformed),
        };

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header_b64)
        .map_err(|_| TokenError::Malformed)?;
    let header: TokenHeader =
        serde_json::from_slice(&header_bytes).map_err(|_| TokenError::Malformed)?;

    if header.alg != "HS256" {
        return Err(TokenError::UnsupportedAlgorithm);
    }

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| TokenError::Malformed)?;

    let signing_input = format!("{header_b64}.{claims_b64}");
    let mut mac = HmacSha256::new_from_slice(config.signing_key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(signing_input.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| TokenError::InvalidSignature)?;

    let claims_bytes = URL_SAFE_NO_PAD
        .decode(claims_b64)
        .map_err(|_| TokenError::Malformed)?;
    let claims: TokenClaims =
        serde_json::from_slice(&claims_bytes).map_err(|_| TokenError::Malformed)?;

    if claims.iss != config.issuer {
        return Err(TokenError::WrongIssuer);
    }

    if unix_now() >= claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(claims)
}

fn sign(config: &TokenConfig, data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(config.signing_key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before unix epoch")
        .as_secs()
}
