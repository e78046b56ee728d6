//! Domain Layer
//!
//! Entities, paging value objects, and repository traits.

pub mod entity;
pub mod paging;
pub mod repository;

// Re-exports
pub use entity::{Label, TodoItem, TodoList};
pub use paging::{PageRequest, PagedResult};
pub use repository::{TodoItemRepository, TodoListRepository};
