//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.
//!
//! Sentinel convention: "not found" covers both genuinely missing rows
//! and rows owned by a different user, and is reported as `Ok(None)` /
//! `Ok(false)`. Ownership is enforced here, not at the display layer.

use crate::domain::entity::{
    Label, MAX_LABEL_NAME_LEN, MAX_LIST_NAME_LEN, TodoItem, TodoList,
};
use crate::domain::paging::{PageRequest, PagedResult};
use crate::error::{TodoError, TodoResult};
use kernel::id::{ItemId, ListId, UserId};

/// Todo list repository trait
#[trait_variant::make(TodoListRepository: Send)]
pub trait LocalTodoListRepository {
    /// Page through the user's lists.
    ///
    /// `None` when the user row itself is missing (distinct from an empty
    /// page). A non-blank search keeps lists whose name or any attached
    /// label name contains the term, case-insensitively. Labels are
    /// loaded; items are not.
    async fn get_lists(
        &self,
        user_id: UserId,
        paging: &PageRequest,
    ) -> TodoResult<Option<PagedResult<TodoList>>>;

    /// Load one list as a full aggregate: items, item labels, list labels.
    async fn get_list(&self, user_id: UserId, list_id: ListId) -> TodoResult<Option<TodoList>>;

    /// Create a list. `None` when the user is missing.
    async fn create_list(&self, user_id: UserId, name: &str) -> TodoResult<Option<TodoList>>;

    /// Replace a list's name. Whole-state update; callers merge partial
    /// input beforehand. Bumps `last_modified`.
    async fn update_list(
        &self,
        user_id: UserId,
        list_id: ListId,
        name: &str,
    ) -> TodoResult<Option<TodoList>>;

    /// Delete a list and everything under it. Two-phase: list-owned
    /// labels are removed explicitly, items and their labels cascade.
    async fn delete_list(&self, user_id: UserId, list_id: ListId) -> TodoResult<bool>;

    /// Labels attached directly to the list.
    async fn get_list_labels(
        &self,
        user_id: UserId,
        list_id: ListId,
    ) -> TodoResult<Option<Vec<Label>>>;

    /// Create-or-reuse a label on the list, keyed by `(list, name)`.
    async fn create_list_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        name: &str,
    ) -> TodoResult<Option<Label>>;

    /// Rename the label matching `current_name` exactly. Sibling names
    /// stay unique: renaming onto a name another label on the same list
    /// already carries is a conflict error.
    async fn update_list_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        current_name: &str,
        new_name: &str,
    ) -> TodoResult<Option<Label>>;

    /// Delete the label matching `name`.
    async fn delete_list_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        name: &str,
    ) -> TodoResult<bool>;
}

/// Todo item repository trait
///
/// Mirrors the list repository for items nested under a list; identical
/// policies, different parent type.
#[trait_variant::make(TodoItemRepository: Send)]
pub trait LocalTodoItemRepository {
    /// Load one item with its labels.
    async fn get_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
    ) -> TodoResult<Option<TodoItem>>;

    /// Create an item. `None` when the parent list is missing/not owned.
    async fn create_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        description: &str,
    ) -> TodoResult<Option<TodoItem>>;

    /// Replace an item's description. Bumps `last_modified`.
    async fn update_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
        description: &str,
    ) -> TodoResult<Option<TodoItem>>;

    /// Delete an item; its labels cascade.
    async fn delete_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
    ) -> TodoResult<bool>;

    /// Labels attached to the item.
    async fn get_item_labels(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
    ) -> TodoResult<Option<Vec<Label>>>;

    /// Create-or-reuse a label on the item, keyed by `(item, name)`.
    async fn create_item_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
        name: &str,
    ) -> TodoResult<Option<Label>>;

    /// Rename the label matching `current_name` exactly. Renaming onto a
    /// name another label on the same item carries is a conflict error.
    async fn update_item_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
        current_name: &str,
        new_name: &str,
    ) -> TodoResult<Option<Label>>;

    /// Delete the label matching `name`.
    async fn delete_item_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
        name: &str,
    ) -> TodoResult<bool>;
}

// ============================================================================
// Shared argument checks for repository implementations
// ============================================================================

pub(crate) fn validate_list_name(name: &str) -> TodoResult<()> {
    if name.trim().is_empty() {
        return Err(TodoError::InvalidArgument(
            "list name cannot be null or blank".to_string(),
        ));
    }
    if name.chars().count() > MAX_LIST_NAME_LEN {
        return Err(TodoError::InvalidArgument(format!(
            "list name cannot exceed {MAX_LIST_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub(crate) fn validate_label_name(name: &str) -> TodoResult<()> {
    if name.trim().is_empty() {
        return Err(TodoError::InvalidArgument(
            "label name cannot be null or blank".to_string(),
        ));
    }
    if name.chars().count() > MAX_LABEL_NAME_LEN {
        return Err(TodoError::InvalidArgument(format!(
            "label name cannot exceed {MAX_LABEL_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub(crate) fn validate_description(description: &str) -> TodoResult<()> {
    if description.trim().is_empty() {
        return Err(TodoError::InvalidArgument(
            "item description cannot be null or blank".to_string(),
        ));
    }
    Ok(())
}
