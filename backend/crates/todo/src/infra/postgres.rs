//! PostgreSQL Repository Implementations
//!
//! All scoping happens in SQL: every statement filters by the owning
//! user id, so a row belonging to another user behaves exactly like a
//! missing row. Read-then-write operations run inside a transaction so
//! a concurrent delete cannot interleave with a mutation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::{Label, TodoItem, TodoList};
use crate::domain::paging::{PageRequest, PagedResult};
use crate::domain::repository::{
    TodoItemRepository, TodoListRepository, validate_description, validate_label_name,
    validate_list_name,
};
use crate::error::{TodoError, TodoResult};
use kernel::id::{ItemId, LabelId, ListId, UserId};

/// PostgreSQL-backed todo repository
#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn user_exists(&self, user_id: UserId) -> TodoResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE user_id = $1)")
                .bind(user_id.value())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn labels_for_lists(&self, list_ids: &[i64]) -> TodoResult<Vec<ListLabelRow>> {
        if list_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ListLabelRow>(
            r#"
            SELECT label_id, list_id, name, last_modified
            FROM labels
            WHERE list_id = ANY($1)
            ORDER BY label_id
            "#,
        )
        .bind(list_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

/// Turn a user-supplied search term into a literal ILIKE pattern.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

// ============================================================================
// Todo List Repository Implementation
// ============================================================================

impl TodoListRepository for PgTodoRepository {
    async fn get_lists(
        &self,
        user_id: UserId,
        paging: &PageRequest,
    ) -> TodoResult<Option<PagedResult<TodoList>>> {
        if !self.user_exists(user_id).await? {
            return Ok(None);
        }

        let pattern = paging.search_term().map(like_pattern);

        // Total counts matches before paging
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM todo_lists l
            WHERE l.user_id = $1
              AND ($2::text IS NULL
                   OR l.name ILIKE $2
                   OR EXISTS (SELECT 1 FROM labels lb
                              WHERE lb.list_id = l.list_id AND lb.name ILIKE $2))
            "#,
        )
        .bind(user_id.value())
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, ListRow>(
            r#"
            SELECT l.list_id, l.user_id, l.name, l.last_modified
            FROM todo_lists l
            WHERE l.user_id = $1
              AND ($2::text IS NULL
                   OR l.name ILIKE $2
                   OR EXISTS (SELECT 1 FROM labels lb
                              WHERE lb.list_id = l.list_id AND lb.name ILIKE $2))
            ORDER BY l.list_id
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(user_id.value())
        .bind(&pattern)
        .bind(paging.skip())
        .bind(paging.take())
        .fetch_all(&self.pool)
        .await?;

        // Listing loads labels only; items stay behind the single-list read
        let list_ids: Vec<i64> = rows.iter().map(|r| r.list_id).collect();
        let label_rows = self.labels_for_lists(&list_ids).await?;

        let page_content = rows
            .into_iter()
            .map(|row| {
                let labels = label_rows
                    .iter()
                    .filter(|l| l.list_id == row.list_id)
                    .map(ListLabelRow::to_label)
                    .collect();
                row.into_list(Vec::new(), labels)
            })
            .collect();

        Ok(Some(PagedResult {
            page_content,
            start_index: paging.skip(),
            total,
        }))
    }

    async fn get_list(&self, user_id: UserId, list_id: ListId) -> TodoResult<Option<TodoList>> {
        let row = sqlx::query_as::<_, ListRow>(
            r#"
            SELECT list_id, user_id, name, last_modified
            FROM todo_lists
            WHERE user_id = $1 AND list_id = $2
            "#,
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let item_rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT item_id, list_id, user_id, description, last_modified
            FROM todo_items
            WHERE list_id = $1
            ORDER BY item_id
            "#,
        )
        .bind(list_id.value())
        .fetch_all(&self.pool)
        .await?;

        let item_ids: Vec<i64> = item_rows.iter().map(|r| r.item_id).collect();
        let item_label_rows = if item_ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as::<_, ItemLabelRow>(
                r#"
                SELECT label_id, item_id, name, last_modified
                FROM labels
                WHERE item_id = ANY($1)
                ORDER BY label_id
                "#,
            )
            .bind(&item_ids)
            .fetch_all(&self.pool)
            .await?
        };

        let items = item_rows
            .into_iter()
            .map(|item_row| {
                let labels = item_label_rows
                    .iter()
                    .filter(|l| l.item_id == item_row.item_id)
                    .map(ItemLabelRow::to_label)
                    .collect();
                item_row.into_item(labels)
            })
            .collect();

        let labels = self
            .labels_for_lists(&[list_id.value()])
            .await?
            .iter()
            .map(ListLabelRow::to_label)
            .collect();

        Ok(Some(row.into_list(items, labels)))
    }

    async fn create_list(&self, user_id: UserId, name: &str) -> TodoResult<Option<TodoList>> {
        validate_list_name(name)?;

        let mut tx = self.pool.begin().await?;

        // Key-share lock keeps the user row alive until the insert
        // commits; a concurrent user delete blocks instead of breaking
        // the foreign key mid-transaction.
        let user_row = sqlx::query_scalar::<_, i64>(
            "SELECT user_id FROM users WHERE user_id = $1 FOR KEY SHARE",
        )
        .bind(user_id.value())
        .fetch_optional(&mut *tx)
        .await?;
        if user_row.is_none() {
            return Ok(None);
        }

        let row = sqlx::query_as::<_, ListRow>(
            r#"
            INSERT INTO todo_lists (user_id, name, last_modified)
            VALUES ($1, $2, $3)
            RETURNING list_id, user_id, name, last_modified
            "#,
        )
        .bind(user_id.value())
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(user_id = %user_id, list_id = row.list_id, "Todo list created");

        Ok(Some(row.into_list(Vec::new(), Vec::new())))
    }

    async fn update_list(
        &self,
        user_id: UserId,
        list_id: ListId,
        name: &str,
    ) -> TodoResult<Option<TodoList>> {
        validate_list_name(name)?;

        // Single statement: the ownership check and the mutation cannot
        // be interleaved by a concurrent delete.
        let row = sqlx::query_as::<_, ListRow>(
            r#"
            UPDATE todo_lists
            SET name = $3, last_modified = $4
            WHERE user_id = $1 AND list_id = $2
            RETURNING list_id, user_id, name, last_modified
            "#,
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .bind(name)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let labels = self
            .labels_for_lists(&[list_id.value()])
            .await?
            .iter()
            .map(ListLabelRow::to_label)
            .collect();

        Ok(Some(row.into_list(Vec::new(), labels)))
    }

    async fn delete_list(&self, user_id: UserId, list_id: ListId) -> TodoResult<bool> {
        let mut tx = self.pool.begin().await?;

        let owned = sqlx::query_scalar::<_, i64>(
            "SELECT list_id FROM todo_lists WHERE user_id = $1 AND list_id = $2 FOR UPDATE",
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .fetch_optional(&mut *tx)
        .await?;
        if owned.is_none() {
            return Ok(false);
        }

        // The storage layer cannot cascade along both the list->label and
        // list->item->label paths, so list-owned labels go first by hand;
        // items and their labels cascade with the list row.
        let labels_deleted = sqlx::query("DELETE FROM labels WHERE list_id = $1")
            .bind(list_id.value())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM todo_lists WHERE list_id = $1")
            .bind(list_id.value())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            user_id = %user_id,
            list_id = %list_id,
            labels_deleted,
            "Todo list deleted"
        );

        Ok(true)
    }

    async fn get_list_labels(
        &self,
        user_id: UserId,
        list_id: ListId,
    ) -> TodoResult<Option<Vec<Label>>> {
        let owned = sqlx::query_scalar::<_, i64>(
            "SELECT list_id FROM todo_lists WHERE user_id = $1 AND list_id = $2",
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .fetch_optional(&self.pool)
        .await?;
        if owned.is_none() {
            return Ok(None);
        }

        let labels = self
            .labels_for_lists(&[list_id.value()])
            .await?
            .iter()
            .map(ListLabelRow::to_label)
            .collect();

        Ok(Some(labels))
    }

    async fn create_list_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        name: &str,
    ) -> TodoResult<Option<Label>> {
        validate_label_name(name)?;

        let mut tx = self.pool.begin().await?;

        // Lock the parent so concurrent create-or-reuse of the same name
        // serializes instead of inserting twice.
        let owned = sqlx::query_scalar::<_, i64>(
            "SELECT list_id FROM todo_lists WHERE user_id = $1 AND list_id = $2 FOR UPDATE",
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .fetch_optional(&mut *tx)
        .await?;
        if owned.is_none() {
            return Ok(None);
        }

        let existing = sqlx::query_as::<_, BareLabelRow>(
            "SELECT label_id, name, last_modified FROM labels WHERE list_id = $1 AND name = $2",
        )
        .bind(list_id.value())
        .bind(name)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(row) = existing {
            tx.commit().await?;
            return Ok(Some(row.to_label()));
        }

        let row = sqlx::query_as::<_, BareLabelRow>(
            r#"
            INSERT INTO labels (user_id, list_id, name, last_modified)
            VALUES ($1, $2, $3, $4)
            RETURNING label_id, name, last_modified
            "#,
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(row.to_label()))
    }

    async fn update_list_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        current_name: &str,
        new_name: &str,
    ) -> TodoResult<Option<Label>> {
        validate_label_name(new_name)?;

        let mut tx = self.pool.begin().await?;

        let owned = sqlx::query_scalar::<_, i64>(
            "SELECT list_id FROM todo_lists WHERE user_id = $1 AND list_id = $2 FOR UPDATE",
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .fetch_optional(&mut *tx)
        .await?;
        if owned.is_none() {
            return Ok(None);
        }

        // Sibling names must stay unique on the parent; a rename onto a
        // taken name would otherwise trip the unique index
        if new_name != current_name {
            let taken = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM labels WHERE list_id = $1 AND name = $2)",
            )
            .bind(list_id.value())
            .bind(new_name)
            .fetch_one(&mut *tx)
            .await?;
            if taken {
                return Err(TodoError::Conflict("label name already in use"));
            }
        }

        let row = sqlx::query_as::<_, BareLabelRow>(
            r#"
            UPDATE labels
            SET name = $3, last_modified = $4
            WHERE list_id = $1 AND name = $2
            RETURNING label_id, name, last_modified
            "#,
        )
        .bind(list_id.value())
        .bind(current_name)
        .bind(new_name)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.map(|r| r.to_label()))
    }

    async fn delete_list_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        name: &str,
    ) -> TodoResult<bool> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM labels
            WHERE list_id = $2 AND name = $3
              AND EXISTS (SELECT 1 FROM todo_lists
                          WHERE list_id = $2 AND user_id = $1)
            "#,
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .bind(name)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Todo Item Repository Implementation
// ============================================================================

impl TodoItemRepository for PgTodoRepository {
    async fn get_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
    ) -> TodoResult<Option<TodoItem>> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT item_id, list_id, user_id, description, last_modified
            FROM todo_items
            WHERE user_id = $1 AND list_id = $2 AND item_id = $3
            "#,
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .bind(item_id.value())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let labels = sqlx::query_as::<_, BareLabelRow>(
            "SELECT label_id, name, last_modified FROM labels WHERE item_id = $1 ORDER BY label_id",
        )
        .bind(item_id.value())
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(BareLabelRow::to_label)
        .collect();

        Ok(Some(row.into_item(labels)))
    }

    async fn create_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        description: &str,
    ) -> TodoResult<Option<TodoItem>> {
        validate_description(description)?;

        let mut tx = self.pool.begin().await?;

        let owned = sqlx::query_scalar::<_, i64>(
            "SELECT list_id FROM todo_lists WHERE user_id = $1 AND list_id = $2 FOR UPDATE",
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .fetch_optional(&mut *tx)
        .await?;
        if owned.is_none() {
            return Ok(None);
        }

        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            INSERT INTO todo_items (list_id, user_id, description, last_modified)
            VALUES ($1, $2, $3, $4)
            RETURNING item_id, list_id, user_id, description, last_modified
            "#,
        )
        .bind(list_id.value())
        .bind(user_id.value())
        .bind(description)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(user_id = %user_id, list_id = %list_id, item_id = row.item_id, "Todo item created");

        Ok(Some(row.into_item(Vec::new())))
    }

    async fn update_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
        description: &str,
    ) -> TodoResult<Option<TodoItem>> {
        validate_description(description)?;

        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            UPDATE todo_items
            SET description = $4, last_modified = $5
            WHERE user_id = $1 AND list_id = $2 AND item_id = $3
            RETURNING item_id, list_id, user_id, description, last_modified
            "#,
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .bind(item_id.value())
        .bind(description)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let labels = sqlx::query_as::<_, BareLabelRow>(
            "SELECT label_id, name, last_modified FROM labels WHERE item_id = $1 ORDER BY label_id",
        )
        .bind(item_id.value())
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(BareLabelRow::to_label)
        .collect();

        Ok(Some(row.into_item(labels)))
    }

    async fn delete_item(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
    ) -> TodoResult<bool> {
        // Item-owned labels cascade through the foreign key
        let deleted = sqlx::query(
            "DELETE FROM todo_items WHERE user_id = $1 AND list_id = $2 AND item_id = $3",
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .bind(item_id.value())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if deleted > 0 {
            tracing::info!(user_id = %user_id, item_id = %item_id, "Todo item deleted");
        }

        Ok(deleted > 0)
    }

    async fn get_item_labels(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
    ) -> TodoResult<Option<Vec<Label>>> {
        let owned = sqlx::query_scalar::<_, i64>(
            "SELECT item_id FROM todo_items WHERE user_id = $1 AND list_id = $2 AND item_id = $3",
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .bind(item_id.value())
        .fetch_optional(&self.pool)
        .await?;
        if owned.is_none() {
            return Ok(None);
        }

        let labels = sqlx::query_as::<_, BareLabelRow>(
            "SELECT label_id, name, last_modified FROM labels WHERE item_id = $1 ORDER BY label_id",
        )
        .bind(item_id.value())
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(BareLabelRow::to_label)
        .collect();

        Ok(Some(labels))
    }

    async fn create_item_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
        name: &str,
    ) -> TodoResult<Option<Label>> {
        validate_label_name(name)?;

        let mut tx = self.pool.begin().await?;

        let owned = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT item_id FROM todo_items
            WHERE user_id = $1 AND list_id = $2 AND item_id = $3
            FOR UPDATE
            "#,
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .bind(item_id.value())
        .fetch_optional(&mut *tx)
        .await?;
        if owned.is_none() {
            return Ok(None);
        }

        let existing = sqlx::query_as::<_, BareLabelRow>(
            "SELECT label_id, name, last_modified FROM labels WHERE item_id = $1 AND name = $2",
        )
        .bind(item_id.value())
        .bind(name)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(row) = existing {
            tx.commit().await?;
            return Ok(Some(row.to_label()));
        }

        let row = sqlx::query_as::<_, BareLabelRow>(
            r#"
            INSERT INTO labels (user_id, item_id, name, last_modified)
            VALUES ($1, $2, $3, $4)
            RETURNING label_id, name, last_modified
            "#,
        )
        .bind(user_id.value())
        .bind(item_id.value())
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(row.to_label()))
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

        let mut tx = self.pool.begin().await?;

        let owned = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT item_id FROM todo_items
            WHERE user_id = $1 AND list_id = $2 AND item_id = $3
            FOR UPDATE
            "#,
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .bind(item_id.value())
        .fetch_optional(&mut *tx)
        .await?;
        if owned.is_none() {
            return Ok(None);
        }

        if new_name != current_name {
            let taken = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM labels WHERE item_id = $1 AND name = $2)",
            )
            .bind(item_id.value())
            .bind(new_name)
            .fetch_one(&mut *tx)
            .await?;
            if taken {
                return Err(TodoError::Conflict("label name already in use"));
            }
        }

        let row = sqlx::query_as::<_, BareLabelRow>(
            r#"
            UPDATE labels
            SET name = $3, last_modified = $4
            WHERE item_id = $1 AND name = $2
            RETURNING label_id, name, last_modified
            "#,
        )
        .bind(item_id.value())
        .bind(current_name)
        .bind(new_name)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.map(|r| r.to_label()))
    }

    async fn delete_item_label(
        &self,
        user_id: UserId,
        list_id: ListId,
        item_id: ItemId,
        name: &str,
    ) -> TodoResult<bool> {
        let deleted = sqlx::query(
            r#"
            DELETE FROM labels
            WHERE item_id = $3 AND name = $4
              AND EXISTS (SELECT 1 FROM todo_items
                          WHERE user_id = $1 AND list_id = $2 AND item_id = $3)
            "#,
        )
        .bind(user_id.value())
        .bind(list_id.value())
        .bind(item_id.value())
        .bind(name)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ListRow {
    list_id: i64,
    user_id: i64,
    name: String,
    last_modified: DateTime<Utc>,
}

impl ListRow {
    fn into_list(self, items: Vec<TodoItem>, labels: Vec<Label>) -> TodoList {
        TodoList {
            list_id: ListId::from_i64(self.list_id),
            user_id: UserId::from_i64(self.user_id),
            name: self.name,
            last_modified: self.last_modified,
            items,
            labels,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    item_id: i64,
    list_id: i64,
    user_id: i64,
    description: String,
    last_modified: DateTime<Utc>,
}

impl ItemRow {
    fn into_item(self, labels: Vec<Label>) -> TodoItem {
        TodoItem {
            item_id: ItemId::from_i64(self.item_id),
            list_id: ListId::from_i64(self.list_id),
            user_id: UserId::from_i64(self.user_id),
            description: self.description,
            last_modified: self.last_modified,
            labels,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BareLabelRow {
    label_id: i64,
    name: String,
    last_modified: DateTime<Utc>,
}

impl BareLabelRow {
    fn to_label(&self) -> Label {
        Label {
            label_id: LabelId::from_i64(self.label_id),
            name: self.name.clone(),
            last_modified: self.last_modified,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ListLabelRow {
    label_id: i64,
    list_id: i64,
    name: String,
    last_modified: DateTime<Utc>,
}

impl ListLabelRow {
    fn to_label(&self) -> Label {
        Label {
            label_id: LabelId::from_i64(self.label_id),
            name: self.name.clone(),
            last_modified: self.last_modified,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ItemLabelRow {
    label_id: i64,
    item_id: i64,
    name: String,
    last_modified: DateTime<Utc>,
}

impl ItemLabelRow {
    fn to_label(&self) -> Label {
        Label {
            label_id: LabelId::from_i64(self.label_id),
            name: self.name.clone(),
            last_modified: self.last_modified,
        }
    }
}
