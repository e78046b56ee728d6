//! HTTP Handlers
//!
//! Boundary translation only: sentinels from the services become 404
//! responses here, update requests are merged with current state, and
//! everything else passes straight through.

use std::sync::Arc;

use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::application::dto::{LabelDto, PagedResultDto, TodoItemDto, TodoListDto};
use crate::application::{TodoItemService, TodoListService};
use crate::domain::paging::PageRequest;
use crate::domain::repository::{TodoItemRepository, TodoListRepository};
use crate::error::{TodoError, TodoResult};
use crate::presentation::dto::{
    CreateLabelRequest, CreateTodoItemRequest, CreateTodoListRequest, UpdateLabelRequest,
    UpdateTodoItemRequest, UpdateTodoListRequest,
};
use crate::presentation::middleware::AuthUser;
use kernel::id::{ItemId, ListId};

const LIST_NOT_FOUND: &str = "todo list not found";
const ITEM_NOT_FOUND: &str = "todo item not found";
const LABEL_NOT_FOUND: &str = "label not found";

/// Shared state for todo handlers
#[derive(Clone)]
pub struct TodoAppState<R>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> TodoAppState<R>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    fn lists(&self) -> TodoListService<R> {
        TodoListService::new(self.repo.clone())
    }

    fn items(&self) -> TodoItemService<R> {
        TodoItemService::new(self.repo.clone())
    }
}

// ============================================================================
// List handlers
// ============================================================================

/// GET /lists
pub async fn get_lists<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Query(paging): Query<PageRequest>,
) -> TodoResult<Json<PagedResultDto<TodoListDto>>>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let page = state
        .lists()
        .get_lists(auth.user_id, &paging)
        .await?
        .ok_or(TodoError::NotFound("user not found"))?;

    Ok(Json(page))
}

/// POST /lists
pub async fn create_list<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateTodoListRequest>,
) -> TodoResult<impl IntoResponse>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let list = state
        .lists()
        .create_list(auth.user_id, &req.name)
        .await?
        .ok_or(TodoError::NotFound("user not found"))?;

    Ok((StatusCode::CREATED, Json(list)))
}

/// GET /lists/{list_id}
pub async fn get_list<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(list_id): Path<i64>,
) -> TodoResult<Json<TodoListDto>>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let list = state
        .lists()
        .get_list(auth.user_id, ListId::from_i64(list_id))
        .await?
        .ok_or(TodoError::NotFound(LIST_NOT_FOUND))?;

    Ok(Json(list))
}

/// PUT /lists/{list_id}
pub async fn update_list<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(list_id): Path<i64>,
    Json(req): Json<UpdateTodoListRequest>,
) -> TodoResult<Json<TodoListDto>>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let list_id = ListId::from_i64(list_id);
    let service = state.lists();

    // Merge the partial request with current state before the
    // whole-state update
    let current = service
        .get_list(auth.user_id, list_id)
        .await?
        .ok_or(TodoError::NotFound(LIST_NOT_FOUND))?;
    let name = req.name.unwrap_or(current.name);

    let list = service
        .update_list(auth.user_id, list_id, &name)
        .await?
        .ok_or(TodoError::NotFound(LIST_NOT_FOUND))?;

    Ok(Json(list))
}

/// DELETE /lists/{list_id}
pub async fn delete_list<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(list_id): Path<i64>,
) -> TodoResult<StatusCode>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let deleted = state
        .lists()
        .delete_list(auth.user_id, ListId::from_i64(list_id))
        .await?;

    if !deleted {
        return Err(TodoError::NotFound(LIST_NOT_FOUND));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// List label handlers
// ============================================================================

/// GET /lists/{list_id}/labels
pub async fn get_list_labels<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(list_id): Path<i64>,
) -> TodoResult<Json<Vec<LabelDto>>>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let labels = state
        .lists()
        .get_labels(auth.user_id, ListId::from_i64(list_id))
        .await?
        .ok_or(TodoError::NotFound(LIST_NOT_FOUND))?;

    Ok(Json(labels))
}

/// POST /lists/{list_id}/labels
pub async fn create_list_label<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(list_id): Path<i64>,
    Json(req): Json<CreateLabelRequest>,
) -> TodoResult<impl IntoResponse>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let label = state
        .lists()
        .create_label(auth.user_id, ListId::from_i64(list_id), &req.name)
        .await?
        .ok_or(TodoError::NotFound(LIST_NOT_FOUND))?;

    Ok((StatusCode::CREATED, Json(label)))
}

/// PUT /lists/{list_id}/labels/{name}
pub async fn update_list_label<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path((list_id, name)): Path<(i64, String)>,
    Json(req): Json<UpdateLabelRequest>,
) -> TodoResult<Json<LabelDto>>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let label = state
        .lists()
        .update_label(
            auth.user_id,
            ListId::from_i64(list_id),
            &name,
            &req.new_name,
        )
        .await?
        .ok_or(TodoError::NotFound(LABEL_NOT_FOUND))?;

    Ok(Json(label))
}

/// DELETE /lists/{list_id}/labels/{name}
pub async fn delete_list_label<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path((list_id, name)): Path<(i64, String)>,
) -> TodoResult<StatusCode>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let deleted = state
        .lists()
        .delete_label(auth.user_id, ListId::from_i64(list_id), &name)
        .await?;

    if !deleted {
        return Err(TodoError::NotFound(LABEL_NOT_FOUND));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Item handlers
// ============================================================================

/// POST /lists/{list_id}/items
pub async fn create_item<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path(list_id): Path<i64>,
    Json(req): Json<CreateTodoItemRequest>,
) -> TodoResult<impl IntoResponse>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let item = state
        .items()
        .create_item(auth.user_id, ListId::from_i64(list_id), &req.description)
        .await?
        .ok_or(TodoError::NotFound(LIST_NOT_FOUND))?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// GET /lists/{list_id}/items/{item_id}
pub async fn get_item<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path((list_id, item_id)): Path<(i64, i64)>,
) -> TodoResult<Json<TodoItemDto>>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let item = state
        .items()
        .get_item(
            auth.user_id,
            ListId::from_i64(list_id),
            ItemId::from_i64(item_id),
        )
        .await?
        .ok_or(TodoError::NotFound(ITEM_NOT_FOUND))?;

    Ok(Json(item))
}

/// PUT /lists/{list_id}/items/{item_id}
pub async fn update_item<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path((list_id, item_id)): Path<(i64, i64)>,
    Json(req): Json<UpdateTodoItemRequest>,
) -> TodoResult<Json<TodoItemDto>>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let list_id = ListId::from_i64(list_id);
    let item_id = ItemId::from_i64(item_id);
    let service = state.items();

    let current = service
        .get_item(auth.user_id, list_id, item_id)
        .await?
        .ok_or(TodoError::NotFound(ITEM_NOT_FOUND))?;
    let description = req.description.unwrap_or(current.description);

    let item = service
        .update_item(auth.user_id, list_id, item_id, &description)
        .await?
        .ok_or(TodoError::NotFound(ITEM_NOT_FOUND))?;

    Ok(Json(item))
}

/// DELETE /lists/{list_id}/items/{item_id}
pub async fn delete_item<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path((list_id, item_id)): Path<(i64, i64)>,
) -> TodoResult<StatusCode>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let deleted = state
        .items()
        .delete_item(
            auth.user_id,
            ListId::from_i64(list_id),
            ItemId::from_i64(item_id),
        )
        .await?;

    if !deleted {
        return Err(TodoError::NotFound(ITEM_NOT_FOUND));
    }

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Item label handlers
// ============================================================================

/// GET /lists/{list_id}/items/{item_id}/labels
pub async fn get_item_labels<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path((list_id, item_id)): Path<(i64, i64)>,
) -> TodoResult<Json<Vec<LabelDto>>>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let labels = state
        .items()
        .get_labels(
            auth.user_id,
            ListId::from_i64(list_id),
            ItemId::from_i64(item_id),
        )
        .await?
        .ok_or(TodoError::NotFound(ITEM_NOT_FOUND))?;

    Ok(Json(labels))
}

/// POST /lists/{list_id}/items/{item_id}/labels
pub async fn create_item_label<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path((list_id, item_id)): Path<(i64, i64)>,
    Json(req): Json<CreateLabelRequest>,
) -> TodoResult<impl IntoResponse>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let label = state
        .items()
        .create_label(
            auth.user_id,
            ListId::from_i64(list_id),
            ItemId::from_i64(item_id),
            &req.name,
        )
        .await?
        .ok_or(TodoError::NotFound(ITEM_NOT_FOUND))?;

    Ok((StatusCode::CREATED, Json(label)))
}

/// PUT /lists/{list_id}/items/{item_id}/labels/{name}
pub async fn update_item_label<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path((list_id, item_id, name)): Path<(i64, i64, String)>,
    Json(req): Json<UpdateLabelRequest>,
) -> TodoResult<Json<LabelDto>>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let label = state
        .items()
        .update_label(
            auth.user_id,
            ListId::from_i64(list_id),
            ItemId::from_i64(item_id),
            &name,
            &req.new_name,
        )
        .await?
        .ok_or(TodoError::NotFound(LABEL_NOT_FOUND))?;

    Ok(Json(label))
}

/// DELETE /lists/{list_id}/items/{item_id}/labels/{name}
pub async fn delete_item_label<R>(
    State(state): State<TodoAppState<R>>,
    Extension(auth): Extension<AuthUser>,
    Path((list_id, item_id, name)): Path<(i64, i64, String)>,
) -> TodoResult<StatusCode>
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let deleted = state
        .items()
        .delete_label(
            auth.user_id,
            ListId::from_i64(list_id),
            ItemId::from_i64(item_id),
            &name,
        )
        .await?;

    if !deleted {
        return Err(TodoError::NotFound(LABEL_NOT_FOUND));
    }

    Ok(StatusCode::NO_CONTENT)
}
