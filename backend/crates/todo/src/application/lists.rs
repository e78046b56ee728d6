//! Todo List Service
//!
//! Thin orchestration over the list repository: every call passes the
//! caller's user id straight through and maps the returned entities to
//! DTOs. Sentinels survive the mapping unchanged.

use std::sync::Arc;

use crate::application::dto::{LabelDto, PagedResultDto, TodoListDto};
use crate::domain::paging::PageRequest;
use crate::domain::repository::TodoListRepository;
use crate::error::TodoResult;
use kernel::id::{ListId, UserId};

/// Todo list service
pub struct TodoListService<R>
where
    R: TodoListRepository,
{
    repo: Arc<R>,
}

impl<R> TodoListService<R>
where
    R: TodoListRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get_lists(
        &self,
        user_id: UserId,
        paging: &PageRequest,
    ) -> TodoResult<Option<PagedResultDto<TodoListDto>>> {
        let page = self.repo.get_lists(user_id, paging).await?;
        Ok(page.map(PagedResultDto::from))
    }

    pub async fn get_list(
        &self,
        user_id: UserId,
        list_id: ListId,
    ) -> TodoResult<Option<TodoListDto>> {
        let list = self.repo.get_list(user_id, list_id).await?;
        Ok(list.map(TodoListDto::from))
    }

    pub async fn create_list(
        &self,
        user_id: UserId,
        name: &str,
    ) -> TodoResult<Option<TodoListDto>> {
        let list = self.repo.create_list(user_id, name).await?;
        Ok(list.map(TodoListDto::from))
    }

    /// Whole-state rename; callers resolve partial input against the
    /// current list before calling.
    pub async fn update_list(
        &self,
        user_id: UserId,
        list_id: ListId,
        name: &str,
    ) -> TodoResult<Option<TodoListDto>> {
        let list = self.repo.update_list(user_id, list_id, name).await?;
        Ok(list.map(TodoListDto::from))
    }

    pub async fn delete_list(&self, user_id: UserId, list_id: ListId) -> TodoResult<bool> {
        self.repo.delete_list(user_id, list_id).await
    }

    pub async fn get_labels(
        &self,
        user_id: UserId,
        list_id: ListId,
    ) -> TodoResult<Option<Vec<LabelDto>>> {
        let labels = self.repo.get_list_labels(user_id, list_id).await?;
        Ok(labels.map(|labels| labels.into_iter().map(LabelDto::from).collect()))
    }

    pub async fn create_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        name: &str,
    ) -> TodoResult<Option<LabelDto>> {
        let label = self.repo.create_list_label(user_id, list_id, name).await?;
        Ok(label.map(LabelDto::from))
    }

    pub async fn update_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        current_name: &str,
        new_name: &str,
    ) -> TodoResult<Option<LabelDto>> {
        let label = self
            .repo
            .update_list_label(user_id, list_id, current_name, new_name)
            .await?;
        Ok(label.map(LabelDto::from))
    }

    pub async fn delete_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        name: &str,
    ) -> TodoResult<bool> {
        self.repo.delete_list_label(user_id, list_id, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryTodoStore;

    fn service() -> (TodoListService<MemoryTodoStore>, UserId) {
        let store = Arc::new(MemoryTodoStore::new());
        let user = UserId::from_i64(1);
        store.add_user(user);
        (TodoListService::new(store), user)
    }

    #[tokio::test]
    async fn test_listing_maps_to_dtos() {
        let (service, user) = service();

        let created = service.create_list(user, "Chores").await.unwrap().unwrap();
        service
            .create_label(user, ListId::from_i64(created.id), "home")
            .await
            .unwrap()
            .unwrap();

        let page = service
            .get_lists(user, &PageRequest::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.page_content[0].name, "Chores");
        assert_eq!(page.page_content[0].labels[0].name, "home");
    }

    #[tokio::test]
    async fn test_sentinels_pass_through() {
        let (service, user) = service();

        let missing = ListId::from_i64(42);
        assert!(service.get_list(user, missing).await.unwrap().is_none());
        assert!(!service.delete_list(user, missing).await.unwrap());
        assert!(service.get_labels(user, missing).await.unwrap().is_none());
    }
}
