//! Application Layer
//!
//! Services wrapping the repositories and mapping entities into
//! transport DTOs. The repositories enforce scoping and validation;
//! the services own the entity-to-DTO shape.

pub mod dto;
pub mod items;
pub mod lists;

// Re-exports
pub use dto::{LabelDto, PagedResultDto, TodoItemDto, TodoListDto};
pub use items::TodoItemService;
pub use lists::TodoListService;
