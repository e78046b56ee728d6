//! Response DTOs (Data Transfer Objects)
//!
//! The JSON shapes the API emits. Owner ids stay internal; clients only
//! ever see their own data, so echoing the user id back adds nothing.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entity::{Label, TodoItem, TodoList};
use crate::domain::paging::PagedResult;

/// Label as returned by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDto {
    pub id: i64,
    pub name: String,
    pub last_modified: DateTime<Utc>,
}

impl From<Label> for LabelDto {
    fn from(label: Label) -> Self {
        Self {
            id: label.label_id.value(),
            name: label.name,
            last_modified: label.last_modified,
        }
    }
}

/// Todo item as returned by the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemDto {
    pub id: i64,
    pub description: String,
    pub last_modified: DateTime<Utc>,
    pub labels: Vec<LabelDto>,
}

impl From<TodoItem> for TodoItemDto {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.item_id.value(),
            description: item.description,
            last_modified: item.last_modified,
            labels: item.labels.into_iter().map(LabelDto::from).collect(),
        }
    }
}

/// Todo list as returned by the API
///
/// `items` is empty in paged listings and populated on single-list reads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoListDto {
    pub id: i64,
    pub name: String,
    pub last_modified: DateTime<Utc>,
    pub items: Vec<TodoItemDto>,
    pub labels: Vec<LabelDto>,
}

impl From<TodoList> for TodoListDto {
    fn from(list: TodoList) -> Self {
        Self {
            id: list.list_id.value(),
            name: list.name,
            last_modified: list.last_modified,
            items: list.items.into_iter().map(TodoItemDto::from).collect(),
            labels: list.labels.into_iter().map(LabelDto::from).collect(),
        }
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResultDto<T> {
    pub page_content: Vec<T>,
    /// Offset this page starts at
    pub start_index: i64,
    /// Matches before paging
    pub total: i64,
}

impl<T, U: From<T>> From<PagedResult<T>> for PagedResultDto<U> {
    fn from(page: PagedResult<T>) -> Self {
        Self {
            page_content: page.page_content.into_iter().map(U::from).collect(),
            start_index: page.start_index,
            total: page.total,
        }
    }
}
