//! Todo Backend Module
//!
//! Todo lists, items and labels, strictly scoped to their owning user.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, paging value objects, repository traits
//! - `application/` - Services mapping entities to transport DTOs
//! - `infra/` - Postgres and in-memory repository implementations
//! - `presentation/` - HTTP handlers, DTOs, router, bearer middleware
//!
//! ## Scoping Model
//! Every repository operation filters by the authenticated user id.
//! Data belonging to another user is reported as not-found, never as a
//! permission error, so resource existence does not leak across
//! accounts. Labels are value-like: their external identity is
//! `(parent, name)`, not the surrogate label id.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use error::{TodoError, TodoResult};
pub use infra::memory::MemoryTodoStore;
pub use infra::postgres::PgTodoRepository;
pub use presentation::router::{todo_router, todo_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
