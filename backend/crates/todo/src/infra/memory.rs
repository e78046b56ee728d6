//! In-memory Repository Implementation
//!
//! Same policy surface as the Postgres repository, backed by mutex-held
//! maps. Used by unit tests and runnable demos. Ids ascend from a single
//! counter, so iteration order over the maps matches storage insertion
//! order.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::domain::entity::{Label, TodoItem, TodoList};
use crate::domain::paging::{PageRequest, PagedResult};
use crate::domain::repository::{
    TodoItemRepository, TodoListRepository, validate_description, validate_label_name,
    validate_list_name,
};
use crate::error::{TodoError, TodoResult};
use kernel::id::{ItemId, LabelId, ListId, UserId};

/// In-memory todo store
#[derive(Clone, Default)]
pub struct MemoryTodoStore {
    inner: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    next_id: i64,
    /// Known user ids; the store does not own accounts, callers seed this
    users: BTreeSet<i64>,
    lists: BTreeMap<i64, ListRecord>,
    items: BTreeMap<i64, ItemRecord>,
    labels: BTreeMap<i64, LabelRecord>,
}

struct ListRecord {
    user_id: i64,
    name: String,
    last_modified: DateTime<Utc>,
}

struct ItemRecord {
    list_id: i64,
    user_id: i64,
    description: String,
    last_modified: DateTime<Utc>,
}

struct LabelRecord {
    owner: LabelOwner,
    name: String,
    last_modified: DateTime<Utc>,
}

/// A label hangs off exactly one parent
#[derive(Clone, Copy, PartialEq)]
enum LabelOwner {
    List(i64),
    Item(i64),
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user id so scoped operations recognize it.
    pub fn add_user(&self, user_id: UserId) {
        self.lock().users.insert(user_id.value());
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.inner.lock().expect("todo store poisoned")
    }
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn owned_list(&self, user_id: UserId, list_id: ListId) -> Option<&ListRecord> {
        self.lists
            .get(&list_id.value())
            .filter(|l| l.user_id == user_id.value())
    }

    fn owned_item(&self, user_id: UserId, list_id: ListId, item_id: ItemId) -> Option<&ItemRecord> {
        self.items
            .get(&item_id.value())
            .filter(|i| i.user_id == user_id.value() && i.list_id == list_id.value())
    }

    fn labels_of(&self, owner: LabelOwner) -> Vec<Label> {
        self.labels
            .iter()
            .filter(|(_, l)| l.owner == owner)
            .map(|(id, l)| Label {
                label_id: LabelId::from_i64(*id),
                name: l.name.clone(),
                last_modified: l.last_modified,
            })
            .collect()
    }

    fn item_entity(&self, item_id: i64, record: &ItemRecord) -> TodoItem {
        TodoItem {
            item_id: ItemId::from_i64(item_id),
            list_id: ListId::from_i64(record.list_id),
            user_id: UserId::from_i64(record.user_id),
            description: record.description.clone(),
            last_modified: record.last_modified,
            labels: self.labels_of(LabelOwner::Item(item_id)),
        }
    }

    /// Assemble a list entity. `with_items` distinguishes the paged
    /// listing (labels only) from the single-list read.
    fn list_entity(&self, list_id: i64, record: &ListRecord, with_items: bool) -> TodoList {
        let items = if with_items {
            self.items
                .iter()
                .filter(|(_, i)| i.list_id == list_id)
                .map(|(id, i)| self.item_entity(*id, i))
                .collect()
        } else {
            Vec::new()
        };

        TodoList {
            list_id: ListId::from_i64(list_id),
            user_id: UserId::from_i64(record.user_id),
            name: record.name.clone(),
            last_modified: record.last_modified,
            items,
            labels: self.labels_of(LabelOwner::List(list_id)),
        }
    }

    fn matches_search(&self, list_id: i64, record: &ListRecord, term: &str) -> bool {
        let needle = term.to_lowercase();
        if record.name.to_lowercase().contains(&needle) {
            return true;
        }
        self.labels
            .values()
            .any(|l| l.owner == LabelOwner::List(list_id) && l.name.to_lowercase().contains(&needle))
    }

    /// Create-or-reuse, keyed by `(owner, name)`.
    fn upsert_label(&mut self, owner: LabelOwner, name: &str) -> Label {
        if let Some((id, l)) = self
            .labels
            .iter()
            .find(|(_, l)| l.owner == owner && l.name == name)
        {
            return Label {
                label_id: LabelId::from_i64(*id),
                name: l.name.clone(),
                last_modified: l.last_modified,
            };
        }

        let label_id = self.next_id();
        let now = Utc::now();
        self.labels.insert(
            label_id,
            LabelRecord {
                owner,
                name: name.to_string(),
                last_modified: now,
            },
        );
        Label {
            label_id: LabelId::from_i64(label_id),
            name: name.to_string(),
            last_modified: now,
        }
    }

    fn rename_label(
        &mut self,
        owner: LabelOwner,
        current_name: &str,
        new_name: &str,
    ) -> TodoResult<Option<Label>> {
        // Sibling names must stay unique on the parent
        if new_name != current_name
            && self
                .labels
                .values()
                .any(|l| l.owner == owner && l.name == new_name)
        {
            return Err(TodoError::Conflict("label name already in use"));
        }

        let Some((id, record)) = self
            .labels
            .iter_mut()
            .find(|(_, l)| l.owner == owner && l.name == current_name)
        else {
            return Ok(None);
        };
        record.name = new_name.to_string();
        record.last_modified = Utc::now();
        Ok(Some(Label {
            label_id: LabelId::from_i64(*id),
            name: record.name.clone(),
            last_modified: record.last_modified,
        }))
    }

    fn remove_label(&mut self, owner: LabelOwner, name: &str) -> bool {
        let id = self
            .labels
            .iter()
            .find(|(_, l)| l.owner == owner && l.name == name)
            .map(|(id, _)| *id);
        match id {
            Some(id) => self.labels.remove(&id).is_some(),
            None => false,
        }
    }
}

impl TodoListRepository for MemoryTodoStore {
    async fn get_lists(
        &self,
        user_id: UserId,
        paging: &PageRequest,
    ) -> TodoResult<Option<PagedResult<TodoList>>> {
        let state = self.lock();

        if !state.users.contains(&user_id.value()) {
            return Ok(None);
        }

        let matches: Vec<(i64, &ListRecord)> = state
            .lists
            .iter()
            .filter(|(id, l)| {
                l.user_id == user_id.value()
                    && paging
                        .search_term()
                        .is_none_or(|term| state.matches_search(**id, l, term))
            })
            .map(|(id, l)| (*id, l))
            .collect();

        let total = matches.len() as i64;
        let page_content = matches
            .into_iter()
            .skip(paging.skip() as usize)
            .take(paging.take() as usize)
            .map(|(id, l)| state.list_entity(id, l, false))
            .collect();

        Ok(Some(PagedResult {
            page_content,
            start_index: paging.skip(),
            total,
        }))
    }

    async fn get_list(&self, user_id: UserId, list_id: ListId) -> TodoResult<Option<TodoList>> {
        let state = self.lock();
        Ok(state
            .owned_list(user_id, list_id)
            .map(|l| state.list_entity(list_id.value(), l, true)))
    }

    async fn create_list(&self, user_id: UserId, name: &str) -> TodoResult<Option<TodoList>> {
        validate_list_name(name)?;

        let mut state = self.lock();
        if !state.users.contains(&user_id.value()) {
            return Ok(None);
        }

        let list_id = state.next_id();
        state.lists.insert(
            list_id,
            ListRecord {
                user_id: user_id.value(),
                name: name.to_string(),
                last_modified: Utc::now(),
            },
        );

        Ok(state
            .lists
            .get(&list_id)
            .map(|r| state.list_entity(list_id, r, false)))
    }

    async fn update_list(
        &self,
        user_id: UserId,
        list_id: ListId,
        name: &str,
    ) -> TodoResult<Option<TodoList>> {
        validate_list_name(name)?;

        let mut state = self.lock();
        match state.lists.get_mut(&list_id.value()) {
            Some(record) if record.user_id == user_id.value() => {
                record.name = name.to_string();
                record.last_modified = Utc::now();
            }
            _ => return Ok(None),
        }

        Ok(state
            .lists
            .get(&list_id.value())
            .map(|r| state.list_entity(list_id.value(), r, false)))
    }

    async fn delete_list(&self, user_id: UserId, list_id: ListId) -> TodoResult<bool> {
        let mut state = self.lock();
        if state.owned_list(user_id, list_id).is_none() {
            return Ok(false);
        }

        let item_ids: Vec<i64> = state
            .items
            .iter()
            .filter(|(_, i)| i.list_id == list_id.value())
            .map(|(id, _)| *id)
            .collect();

        state.labels.retain(|_, l| {
            l.owner != LabelOwner::List(list_id.value())
                && !matches!(l.owner, LabelOwner::Item(id) if item_ids.contains(&id))
        });
        state.items.retain(|_, i| i.list_id != list_id.value());
        state.lists.remove(&list_id.value());

        Ok(true)
    }

    async fn get_list_labels(
        &self,
        user_id: UserId,
        list_id: ListId,
    ) -> TodoResult<Option<Vec<Label>>> {
        let state = self.lock();
        if state.owned_list(user_id, list_id).is_none() {
            return Ok(None);
        }
        Ok(Some(state.labels_of(LabelOwner::List(list_id.value()))))
    }

    async fn create_list_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        name: &str,
    ) -> TodoResult<Option<Label>> {
        validate_label_name(name)?;

        let mut state = self.lock();
        if state.owned_list(user_id, list_id).is_none() {
            return Ok(None);
        }
        Ok(Some(state.upsert_label(LabelOwner::List(list_id.value()), name)))
    }

    async fn update_list_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        current_name: &str,
        new_name: &str,
    ) -> TodoResult<Option<Label>> {
        validate_label_name(new_name)?;

        let mut state = self.lock();
        if state.owned_list(user_id, list_id).is_none() {
            return Ok(None);
        }
        state.rename_label(LabelOwner::List(list_id.value()), current_name, new_name)
    }

    async fn delete_list_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        name: &str,
    ) -> TodoResult<bool> {
        let mut state = self.lock();
        if state.owned_list(user_id, list_id).is_none() {
            return Ok(false);
        }
        Ok(state.remove_label(LabelOwner::List(list_id.value()), name))
    }
}

impl TodoItemRepository for MemoryTodoStore {
    async fn get_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
    ) -> TodoResult<Option<TodoItem>> {
        let state = self.lock();
        Ok(state
            .owned_item(user_id, list_id, item_id)
            .map(|i| state.item_entity(item_id.value(), i)))
    }

    async fn create_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        description: &str,
    ) -> TodoResult<Option<TodoItem>> {
        validate_description(description)?;

        let mut state = self.lock();
        if state.owned_list(user_id, list_id).is_none() {
            return Ok(None);
        }

        let item_id = state.next_id();
        state.items.insert(
            item_id,
            ItemRecord {
                list_id: list_id.value(),
                user_id: user_id.value(),
                description: description.to_string(),
                last_modified: Utc::now(),
            },
        );

        Ok(state
            .items
            .get(&item_id)
            .map(|r| state.item_entity(item_id, r)))
    }

    async fn update_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
        description: &str,
    ) -> TodoResult<Option<TodoItem>> {
        validate_description(description)?;

        let mut state = self.lock();
        match state.items.get_mut(&item_id.value()) {
            Some(record)
                if record.user_id == user_id.value() && record.list_id == list_id.value() =>
            {
                record.description = description.to_string();
                record.last_modified = Utc::now();
            }
            _ => return Ok(None),
        }

        Ok(state
            .items
            .get(&item_id.value())
            .map(|r| state.item_entity(item_id.value(), r)))
    }

    async fn delete_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
    ) -> TodoResult<bool> {
        let mut state = self.lock();
        if state.owned_item(user_id, list_id, item_id).is_none() {
            return Ok(false);
        }

        state
            .labels
            .retain(|_, l| l.owner != LabelOwner::Item(item_id.value()));
        state.items.remove(&item_id.value());

        Ok(true)
    }

    async fn get_item_labels(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
    ) -> TodoResult<Option<Vec<Label>>> {
        let state = self.lock();
        if state.owned_item(user_id, list_id, item_id).is_none() {
            return Ok(None);
        }
        Ok(Some(state.labels_of(LabelOwner::Item(item_id.value()))))
    }

    async fn create_item_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
        name: &str,
    ) -> TodoResult<Option<Label>> {
        validate_label_name(name)?;

        let mut state = self.lock();
        if state.owned_item(user_id, list_id, item_id).is_none() {
            return Ok(None);
        }
        Ok(Some(state.upsert_label(LabelOwner::Item(item_id.value()), name)))
    }

    async fn update_item_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
        current_name: &str,
        new_name: &str,
    ) -> TodoResult<Option<Label>> {
        validate_label_name(new_name)?;

        let mut state = self.lock();
        if state.owned_item(user_id, list_id, item_id).is_none() {
            return Ok(None);
        }
        state.rename_label(LabelOwner::Item(item_id.value()), current_name, new_name)
    }

    async fn delete_item_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
        name: &str,
    ) -> TodoResult<bool> {
        let mut state = self.lock();
        if state.owned_item(user_id, list_id, item_id).is_none() {
            return Ok(false);
        }
        Ok(state.remove_label(LabelOwner::Item(item_id.value()), name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TodoError;

    fn seeded_store() -> (MemoryTodoStore, UserId) {
        let store = MemoryTodoStore::new();
        let user = UserId::from_i64(1);
        store.add_user(user);
        (store, user)
    }

    #[tokio::test]
    async fn test_unknown_user_gets_none_not_error() {
        let store = MemoryTodoStore::new();
        let ghost = UserId::from_i64(99);

        let page = store.get_lists(ghost, &PageRequest::default()).await.unwrap();
        assert!(page.is_none());
        assert!(store.create_list(ghost, "Chores").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_and_fetch_list() {
        let (store, user) = seeded_store();

        let created = store.create_list(user, "Chores").await.unwrap().unwrap();
        let fetched = store.get_list(user, created.list_id).await.unwrap().unwrap();

        assert_eq!(fetched.name, "Chores");
        assert_eq!(fetched.user_id, user);
        assert!(fetched.items.is_empty());
    }

    #[tokio::test]
    async fn test_other_users_list_is_invisible() {
        let (store, alice) = seeded_store();
        let bob = UserId::from_i64(2);
        store.add_user(bob);

        let list = store.create_list(alice, "Private").await.unwrap().unwrap();

        // Scoped reads and writes all report not-found, never forbidden
        assert!(store.get_list(bob, list.list_id).await.unwrap().is_none());
        assert!(store
            .update_list(bob, list.list_id, "Stolen")
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_list(bob, list.list_id).await.unwrap());
        assert!(store
            .create_item(bob, list.list_id, "sneak")
            .await
            .unwrap()
            .is_none());

        // The owner still sees the untouched list
        let mine = store.get_list(alice, list.list_id).await.unwrap().unwrap();
        assert_eq!(mine.name, "Private");
    }

    #[tokio::test]
    async fn test_blank_name_is_argument_error() {
        let (store, user) = seeded_store();

        let err = store.create_list(user, "  ").await.unwrap_err();
        assert!(matches!(err, TodoError::InvalidArgument(_)));

        let long = "x".repeat(201);
        let err = store.create_list(user, &long).await.unwrap_err();
        assert!(matches!(err, TodoError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_search_matches_list_and_label_names() {
        let (store, user) = seeded_store();

        let groceries = store.create_list(user, "Groceries").await.unwrap().unwrap();
        let chores = store.create_list(user, "Chores").await.unwrap().unwrap();
        store.create_list(user, "Reading").await.unwrap().unwrap();

        store
            .create_list_label(user, chores.list_id, "weekend")
            .await
            .unwrap()
            .unwrap();

        // Case-insensitive match on the list name
        let page = store
            .get_lists(
                user,
                &PageRequest {
                    search: Some("GROC".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.page_content[0].list_id, groceries.list_id);

        // Match via an attached label name
        let page = store
            .get_lists(
                user,
                &PageRequest {
                    search: Some("weekend".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.page_content[0].list_id, chores.list_id);

        // No match
        let page = store
            .get_lists(
                user,
                &PageRequest {
                    search: Some("nothing".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.total, 0);
        assert!(page.page_content.is_empty());
    }

    #[tokio::test]
    async fn test_paging_counts_total_before_slicing() {
        let (store, user) = seeded_store();

        let mut ids = Vec::new();
        for i in 0..5 {
            let list = store
                .create_list(user, &format!("List {i}"))
                .await
                .unwrap()
                .unwrap();
            ids.push(list.list_id);
        }

        let page = store
            .get_lists(
                user,
                &PageRequest {
                    search: None,
                    skip: 2,
                    take: 2,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(page.total, 5);
        assert_eq!(page.start_index, 2);
        assert_eq!(page.page_content.len(), 2);
        // Ascending id order makes paging deterministic
        assert_eq!(page.page_content[0].list_id, ids[2]);
        assert_eq!(page.page_content[1].list_id, ids[3]);
    }

    #[tokio::test]
    async fn test_label_create_is_reuse_by_name() {
        let (store, user) = seeded_store();
        let list = store.create_list(user, "Chores").await.unwrap().unwrap();

        let first = store
            .create_list_label(user, list.list_id, "urgent")
            .await
            .unwrap()
            .unwrap();
        let second = store
            .create_list_label(user, list.list_id, "urgent")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(first.label_id, second.label_id);

        let labels = store
            .get_list_labels(user, list.list_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(labels.len(), 1);

        // Same name on a different parent is a distinct label
        let other = store.create_list(user, "Other").await.unwrap().unwrap();
        let third = store
            .create_list_label(user, other.list_id, "urgent")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(first.label_id, third.label_id);
    }

    #[tokio::test]
    async fn test_label_rename_requires_exact_name() {
        let (store, user) = seeded_store();
        let list = store.create_list(user, "Chores").await.unwrap().unwrap();
        store
            .create_list_label(user, list.list_id, "urgent")
            .await
            .unwrap()
            .unwrap();

        // Lookup by name is exact, unlike search
        assert!(store
            .update_list_label(user, list.list_id, "URGENT", "later")
            .await
            .unwrap()
            .is_none());

        let renamed = store
            .update_list_label(user, list.list_id, "urgent", "later")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "later");

        assert!(!store.delete_list_label(user, list.list_id, "urgent").await.unwrap());
        assert!(store.delete_list_label(user, list.list_id, "later").await.unwrap());
    }

    #[tokio::test]
    async fn test_label_rename_onto_sibling_is_conflict() {
        let (store, user) = seeded_store();
        let list = store.create_list(user, "Chores").await.unwrap().unwrap();
        store
            .create_list_label(user, list.list_id, "a")
            .await
            .unwrap()
            .unwrap();
        store
            .create_list_label(user, list.list_id, "b")
            .await
            .unwrap()
            .unwrap();

        let err = store
            .update_list_label(user, list.list_id, "a", "b")
            .await
            .unwrap_err();
        assert!(matches!(err, TodoError::Conflict(_)));

        // Sibling names stayed unique; both labels are untouched
        let labels = store
            .get_list_labels(user, list.list_id)
            .await
            .unwrap()
            .unwrap();
        let names: Vec<&str> = labels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);

        // Renaming onto the label's own name is a no-op, not a conflict
        let same = store
            .update_list_label(user, list.list_id, "a", "a")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(same.name, "a");

        // The same invariant holds for item labels
        let item = store
            .create_item(user, list.list_id, "task")
            .await
            .unwrap()
            .unwrap();
        store
            .create_item_label(user, list.list_id, item.item_id, "x")
            .await
            .unwrap()
            .unwrap();
        store
            .create_item_label(user, list.list_id, item.item_id, "y")
            .await
            .unwrap()
            .unwrap();
        let err = store
            .update_item_label(user, list.list_id, item.item_id, "x", "y")
            .await
            .unwrap_err();
        assert!(matches!(err, TodoError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_list_removes_whole_aggregate() {
        let (store, user) = seeded_store();
        let list = store.create_list(user, "Chores").await.unwrap().unwrap();
        let item = store
            .create_item(user, list.list_id, "vacuum")
            .await
            .unwrap()
            .unwrap();
        store
            .create_list_label(user, list.list_id, "home")
            .await
            .unwrap()
            .unwrap();
        store
            .create_item_label(user, list.list_id, item.item_id, "saturday")
            .await
            .unwrap()
            .unwrap();

        assert!(store.delete_list(user, list.list_id).await.unwrap());

        assert!(store.get_list(user, list.list_id).await.unwrap().is_none());
        assert!(store
            .get_item(user, list.list_id, item.item_id)
            .await
            .unwrap()
            .is_none());

        let state = store.lock();
        assert!(state.labels.is_empty());
        assert!(state.items.is_empty());
    }

    #[tokio::test]
    async fn test_item_lifecycle() {
        let (store, user) = seeded_store();
        let list = store.create_list(user, "Chores").await.unwrap().unwrap();

        let item = store
            .create_item(user, list.list_id, "vacuum")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(item.list_id, list.list_id);

        let updated = store
            .update_item(user, list.list_id, item.item_id, "vacuum upstairs")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.description, "vacuum upstairs");
        assert!(updated.last_modified >= item.last_modified);

        store
            .create_item_label(user, list.list_id, item.item_id, "weekly")
            .await
            .unwrap()
            .unwrap();

        let full = store.get_list(user, list.list_id).await.unwrap().unwrap();
        assert_eq!(full.items.len(), 1);
        assert_eq!(full.items[0].labels.len(), 1);

        assert!(store.delete_item(user, list.list_id, item.item_id).await.unwrap());
        // Item labels go with the item
        assert!(store.lock().labels.is_empty());
    }

    #[tokio::test]
    async fn test_item_under_wrong_list_is_not_found() {
        let (store, user) = seeded_store();
        let list_a = store.create_list(user, "A").await.unwrap().unwrap();
        let list_b = store.create_list(user, "B").await.unwrap().unwrap();
        let item = store
            .create_item(user, list_a.list_id, "task")
            .await
            .unwrap()
            .unwrap();

        // The nested path must agree with the item's actual parent
        assert!(store
            .get_item(user, list_b.list_id, item.item_id)
            .await
            .unwrap()
            .is_none());
        assert!(!store
            .delete_item(user, list_b.list_id, item.item_id)
            .await
            .unwrap());
    }
}
