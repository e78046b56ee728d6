//! Todo Entities
//!
//! The aggregate is owned by a single user: lists hold items and labels,
//! items hold labels. Children never outlive their parent; the
//! repositories enforce the cascades.

use chrono::{DateTime, Utc};
use kernel::id::{ItemId, LabelId, ListId, UserId};

/// Maximum list name length
pub const MAX_LIST_NAME_LEN: usize = 200;

/// Maximum label name length
pub const MAX_LABEL_NAME_LEN: usize = 100;

/// Label entity
///
/// Value-like: external identity is `(parent, name)`. The surrogate
/// `label_id` exists only for storage and is never part of the API
/// contract. A label is attached to exactly one of a list or an item.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub label_id: LabelId,
    /// Name, unique among siblings on the same parent
    pub name: String,
    pub last_modified: DateTime<Utc>,
}

/// Todo item entity
#[derive(Debug, Clone)]
pub struct TodoItem {
    pub item_id: ItemId,
    /// Parent list (exclusive)
    pub list_id: ListId,
    /// Owning user
    pub user_id: UserId,
    pub description: String,
    pub last_modified: DateTime<Utc>,
    pub labels: Vec<Label>,
}

/// Todo list entity
///
/// `items` and `labels` are loaded per operation: the paged listing only
/// loads labels, the single-list read loads the full aggregate.
#[derive(Debug, Clone)]
pub struct TodoList {
    pub list_id: ListId,
    /// Owning user (exclusive ownership)
    pub user_id: UserId,
    pub name: String,
    pub last_modified: DateTime<Utc>,
    pub items: Vec<TodoItem>,
    pub labels: Vec<Label>,
}
