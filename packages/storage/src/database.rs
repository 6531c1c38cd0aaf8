// ABOUTME: SQLite persistence for todo lists and their todos
// ABOUTME: Counts and ordering come from the store; failures are recorded for error_message

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use todos_core::messages::ErrorKey;
use todos_core::{TodoItem, TodoList};

use crate::commands::Command;
use crate::error::{StorageError, StorageResult};
use crate::executor::{SqlExecutor, SqlParam};
use crate::{StorageConfig, TodoStorage};

/// Todo storage backed by one SQLite connection
pub struct DatabasePersistence {
    executor: SqlExecutor,
}

impl DatabasePersistence {
    pub async fn connect(config: &StorageConfig) -> StorageResult<Self> {
        let executor = SqlExecutor::connect(config).await?;
        Ok(Self { executor })
    }

    /// Connect to the database for the current environment
    pub async fn from_env() -> StorageResult<Self> {
        let config = StorageConfig::from_env()?;
        Self::connect(&config).await
    }

    pub fn from_executor(executor: SqlExecutor) -> Self {
        Self { executor }
    }

    /// Release the connection
    pub async fn finish(self) -> StorageResult<()> {
        self.executor.finish().await
    }

    fn row_to_todo_list(row: &SqliteRow) -> StorageResult<TodoList> {
        let completed: i64 = row.try_get("completed")?;

        Ok(TodoList {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            todos_count: row.try_get("todos_count")?,
            todos_remaining_count: row.try_get("todos_remaining_count")?,
            completed: completed != 0,
        })
    }

    fn row_to_todo_item(row: &SqliteRow) -> StorageResult<TodoItem> {
        Ok(TodoItem {
            id: row.try_get("id")?,
            list_id: row.try_get("list_id")?,
            name: row.try_get("name")?,
            completed: row.try_get("completed")?,
        })
    }

    /// Fails with `NoSuchList` (and records it) when the list is absent
    async fn ensure_list_exists(&mut self, list_id: i64) -> StorageResult<()> {
        self.find_todo_list(list_id).await.map(|_| ())
    }
}

#[async_trait]
impl TodoStorage for DatabasePersistence {
    async fn all_lists(&mut self) -> StorageResult<Vec<TodoList>> {
        let rows = self.executor.fetch(Command::GetAllTodoLists, &[]).await?;
        let lists = rows
            .iter()
            .map(Self::row_to_todo_list)
            .collect::<StorageResult<Vec<_>>>()?;

        debug!("Retrieved {} todo lists", lists.len());
        Ok(lists)
    }

    async fn create_todo_item(&mut self, list_id: i64, name: Option<&str>) -> StorageResult<i64> {
        let params = [SqlParam::from(list_id), SqlParam::from(name)];
        let outcome = self.executor.execute(Command::CreateTodoItem, &params).await?;

        debug!("Created todo {} in list {}", outcome.last_insert_id, list_id);
        Ok(outcome.last_insert_id)
    }

    async fn create_todo_list(&mut self, name: &str) -> StorageResult<i64> {
        let outcome = self
            .executor
            .execute(Command::CreateTodoList, &[name.into()])
            .await?;

        debug!("Created list '{}' with ID {}", name, outcome.last_insert_id);
        Ok(outcome.last_insert_id)
    }

    async fn delete_todo_item(&mut self, list_id: i64, todo_id: i64) -> StorageResult<bool> {
        self.ensure_list_exists(list_id).await?;

        let outcome = self
            .executor
            .execute(Command::DeleteTodoItem, &[list_id.into(), todo_id.into()])
            .await?;
        Ok(outcome.rows_affected > 0)
    }

    async fn delete_todo_list(&mut self, id: i64) -> StorageResult<bool> {
        self.ensure_list_exists(id).await?;

        let steps = vec![
            (Command::DeleteTodosAll, vec![SqlParam::from(id)]),
            (Command::DeleteTodoList, vec![SqlParam::from(id)]),
        ];
        let outcomes = self.executor.execute_in_transaction(&steps).await?;

        debug!("Deleted list {}", id);
        Ok(outcomes.last().is_some_and(|outcome| outcome.rows_affected > 0))
    }

    async fn delete_todos_all(&mut self, list_id: i64) -> StorageResult<bool> {
        self.ensure_list_exists(list_id).await?;

        let outcome = self
            .executor
            .execute(Command::DeleteTodosAll, &[list_id.into()])
            .await?;
        Ok(outcome.rows_affected > 0)
    }

    fn error_message(&self) -> Option<String> {
        self.executor.error_message()
    }

    async fn find_todo_items(&mut self, list_id: i64) -> StorageResult<Vec<TodoItem>> {
        let rows = self
            .executor
            .fetch(Command::GetTodoItems, &[list_id.into()])
            .await?;

        rows.iter().map(Self::row_to_todo_item).collect()
    }

    async fn find_todo_list(&mut self, id: i64) -> StorageResult<TodoList> {
        let rows = self.executor.fetch(Command::GetTodoList, &[id.into()]).await?;

        match rows.first() {
            Some(row) => Self::row_to_todo_list(row),
            None => self.executor.reject(StorageError::NoSuchList(id)),
        }
    }

    async fn mark_all_complete(&mut self, list_id: i64) -> StorageResult<bool> {
        self.ensure_list_exists(list_id).await?;

        let outcome = self
            .executor
            .execute(Command::MarkTodosComplete, &[list_id.into()])
            .await?;
        Ok(outcome.rows_affected > 0)
    }

    async fn mark_todo(
        &mut self,
        list_id: i64,
        todo_id: i64,
        completed: bool,
    ) -> StorageResult<bool> {
        self.ensure_list_exists(list_id).await?;

        let params = [
            SqlParam::from(list_id),
            SqlParam::from(todo_id),
            SqlParam::from(completed),
        ];
        let outcome = self.executor.execute(Command::MarkTodo, &params).await?;

        if outcome.rows_affected == 0 {
            self.executor.update_error(ErrorKey::NoTodo);
            return Err(StorageError::NoSuchTodo { list_id, todo_id });
        }
        Ok(true)
    }

    async fn size(&mut self) -> StorageResult<i64> {
        self.executor.fetch_scalar(Command::CountLists, &[]).await
    }

    async fn update_list_name(&mut self, id: i64, name: &str) -> StorageResult<bool> {
        self.ensure_list_exists(id).await?;

        let outcome = self
            .executor
            .execute(Command::UpdateListName, &[id.into(), name.into()])
            .await?;
        Ok(outcome.rows_affected > 0)
    }
}
