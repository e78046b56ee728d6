//! Application Layer
//!
//! Use cases composing the credential helper with the user repository.

pub mod login;
pub mod register;

// Re-exports
pub use login::{CredentialsInput, VerifyLoginUseCase};
pub use register::{RegisterUserInput, RegisterUserUseCase};
