//! Domain Layer
//!
//! Contains the user entity and repository trait.

pub mod entity;
pub mod repository;

// Re-exports
pub use entity::{NewUser, User};
pub use repository::UserRepository;
