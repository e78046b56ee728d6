//! Todo Router
//!
//! Every route sits behind the bearer-token middleware; unauthenticated
//! requests never reach a handler.

use axum::middleware::from_fn_with_state;
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use platform::token::TokenConfig;

use crate::domain::repository::{TodoItemRepository, TodoListRepository};
use crate::infra::postgres::PgTodoRepository;
use crate::presentation::handlers::{self, TodoAppState};
use crate::presentation::middleware::require_bearer_user;

/// Create the todo router with the PostgreSQL repository
pub fn todo_router(repo: PgTodoRepository, token_config: TokenConfig) -> Router {
    todo_router_generic(repo, token_config)
}

/// Create a generic todo router for any repository implementation
pub fn todo_router_generic<R>(repo: R, token_config: TokenConfig) -> Router
where
    R: TodoListRepository + TodoItemRepository + Clone + Send + Sync + 'static,
{
    let state = TodoAppState {
        repo: Arc::new(repo),
    };
    let token_config = Arc::new(token_config);

    Router::new()
        .route(
            "/lists",
            get(handlers::get_lists::<R>).post(handlers::create_list::<R>),
        )
        .route(
            "/lists/{list_id}",
            get(handlers::get_list::<R>)
                .put(handlers::update_list::<R>)
                .delete(handlers::delete_list::<R>),
        )
        .route(
            "/lists/{list_id}/labels",
            get(handlers::get_list_labels::<R>).post(handlers::create_list_label::<R>),
        )
        .route(
            "/lists/{list_id}/labels/{name}",
            put(handlers::update_list_label::<R>).delete(handlers::delete_list_label::<R>),
        )
        .route("/lists/{list_id}/items", post(handlers::create_item::<R>))
        .route(
            "/lists/{list_id}/items/{item_id}",
            get(handlers::get_item::<R>)
                .put(handlers::update_item::<R>)
                .delete(handlers::delete_item::<R>),
        )
        .route(
            "/lists/{list_id}/items/{item_id}/labels",
            get(handlers::get_item_labels::<R>).post(handlers::create_item_label::<R>),
        )
        .route(
            "/lists/{list_id}/items/{item_id}/labels/{name}",
            put(handlers::update_item_label::<R>).delete(handlers::delete_item_label::<R>),
        )
        .route_layer(from_fn_with_state(token_config, require_bearer_user))
        .with_state(state)
}
