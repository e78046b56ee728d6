//! Presentation Layer
//!
//! HTTP handlers, request DTOs, bearer-token middleware and router.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::TodoAppState;
pub use middleware::AuthUser;
pub use router::{todo_router, todo_router_generic};
