//! Accounts Backend Module
//!
//! User registration and credential verification.
//!
//! Clean Architecture structure:
//! - `domain/` - User entity and repository trait
//! - `application/` - Use cases (register, verify login)
//! - `infra/` - Postgres and in-memory repository implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Security Model
//! - Passwords hashed with a per-user random salt (HMAC-SHA512)
//! - Login failures and unknown usernames are indistinguishable from the
//!   outside (no user enumeration)
//! - Successful login issues an HMAC-SHA256 signed bearer token

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{AccountError, AccountResult};
pub use infra::memory::MemoryAccountStore;
pub use infra::postgres::PgAccountRepository;
pub use presentation::router::{account_router, account_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
