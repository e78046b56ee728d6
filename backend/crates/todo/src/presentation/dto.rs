//! Request DTOs (Data Transfer Objects)
//!
//! Update requests carry optional fields; the handlers merge them with
//! the current state before calling the service, so absent fields keep
//! their stored value.

use serde::Deserialize;

/// Create list request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoListRequest {
    pub name: String,
}

/// Update list request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoListRequest {
    pub name: Option<String>,
}

/// Create item request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoItemRequest {
    pub description: String,
}

/// Update item request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoItemRequest {
    pub description: Option<String>,
}

/// Create label request; reuses the existing label when the parent
/// already carries one with this name
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLabelRequest {
    pub name: String,
}

/// Rename label request; the label to rename is addressed by name in
/// the path
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLabelRequest {
    pub new_name: String,
}
