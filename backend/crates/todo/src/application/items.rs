//! Todo Item Service
//!
//! Mirrors the list service for items nested under a list.

use std::sync::Arc;

use crate::application::dto::{LabelDto, TodoItemDto};
use crate::domain::repository::TodoItemRepository;
use crate::error::TodoResult;
use kernel::id::{ItemId, ListId, UserId};

/// Todo item service
pub struct TodoItemService<R>
where
    R: TodoItemRepository,
{
    repo: Arc<R>,
}

impl<R> TodoItemService<R>
where
    R: TodoItemRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
    ) -> TodoResult<Option<TodoItemDto>> {
        let item = self.repo.get_item(user_id, list_id, item_id).await?;
        Ok(item.map(TodoItemDto::from))
    }

    pub async fn create_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        description: &str,
    ) -> TodoResult<Option<TodoItemDto>> {
        let item = self.repo.create_item(user_id, list_id, description).await?;
        Ok(item.map(TodoItemDto::from))
    }

    /// Whole-state update; callers resolve partial input against the
    /// current item before calling.
    pub async fn update_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
        description: &str,
    ) -> TodoResult<Option<TodoItemDto>> {
        let item = self
            .repo
            .update_item(user_id, list_id, item_id, description)
            .await?;
        Ok(item.map(TodoItemDto::from))
    }

    pub async fn delete_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
    ) -> TodoResult<bool> {
        self.repo.delete_item(user_id, list_id, item_id).await
    }

    pub async fn get_labels(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
    ) -> TodoResult<Option<Vec<LabelDto>>> {
        let labels = self.repo.get_item_labels(user_id, list_id, item_id).await?;
        Ok(labels.map(|labels| labels.into_iter().map(LabelDto::from).collect()))
    }

    pub async fn create_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
        name: &str,
    ) -> TodoResult<Option<LabelDto>> {
        let label = self
            .repo
            .create_item_label(user_id, list_id, item_id, name)
            .await?;
        Ok(label.map(LabelDto::from))
    }

    pub async fn update_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
        current_name: &str,
        new_name: &str,
    ) -> TodoResult<Option<LabelDto>> {
        let label = self
            .repo
            .update_item_label(user_id, list_id, item_id, current_name, new_name)
            .await?;
        Ok(label.map(LabelDto::from))
    }

    pub async fn delete_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
        name: &str,
    ) -> TodoResult<bool> {
        self.repo
            .delete_item_label(user_id, list_id, item_id, name)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repository::TodoListRepository;
    use crate::infra::memory::MemoryTodoStore;

    #[tokio::test]
    async fn test_item_crud_through_service() {
        let store = Arc::new(MemoryTodoStore::new());
        let user = UserId::from_i64(1);
        store.add_user(user);
        let list = store.create_list(user, "Chores").await.unwrap().unwrap();

        let service = TodoItemService::new(store);

        let item = service
            .create_item(user, list.list_id, "vacuum")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(item.description, "vacuum");
        assert!(item.labels.is_empty());

        let item_id = ItemId::from_i64(item.id);
        service
            .create_label(user, list.list_id, item_id, "weekly")
            .await
            .unwrap()
            .unwrap();

        let fetched = service
            .get_item(user, list.list_id, item_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.labels.len(), 1);

        assert!(service.delete_item(user, list.list_id, item_id).await.unwrap());
        assert!(service
            .get_item(user, list.list_id, item_id)
            .await
            .unwrap()
            .is_none());
    }
}
