// ABOUTME: Data layer and persistence for Todo Tracker
// ABOUTME: SQLite-backed and session-backed storage of todo lists and their todos

use async_trait::async_trait;
use std::path::Path;

use todos_config::DatabaseConfig;
use todos_core::{TodoItem, TodoList};

pub mod commands;
pub mod database;
pub mod error;
pub mod executor;
pub mod session;

pub use commands::Command;
pub use database::DatabasePersistence;
pub use error::{ErrorSlot, StorageError, StorageResult};
pub use executor::{ExecOutcome, SqlExecutor, SqlParam};
pub use session::{SessionList, SessionPersistence};

/// URL of a private in-memory SQLite database
pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub database_url: String,
    pub run_migrations: bool,
}

impl StorageConfig {
    /// Configuration for the current environment (`TODOS_ENV`, `TODOS_DATA_DIR`, ...)
    pub fn from_env() -> StorageResult<Self> {
        let database = DatabaseConfig::from_env()?;
        Ok(Self {
            database_url: database.database_url(),
            run_migrations: true,
        })
    }

    /// A fresh in-memory database, used by tests
    pub fn in_memory() -> Self {
        Self {
            database_url: IN_MEMORY_DATABASE_URL.to_string(),
            run_migrations: true,
        }
    }

    pub fn for_path(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: format!("sqlite:{}", path.as_ref().display()),
            run_migrations: true,
        }
    }
}

/// Operations the request handlers program against.
///
/// Expected conditions (missing list or todo, duplicate list name, constraint
/// failures) come back as `Err` and are also recorded so `error_message`
/// returns the user-facing text until the next operation.
#[async_trait]
pub trait TodoStorage: Send {
    /// All lists, incomplete ones first, each group ordered by name
    async fn all_lists(&mut self) -> StorageResult<Vec<TodoList>>;

    /// Add a todo to a list, returning the new todo id
    async fn create_todo_item(&mut self, list_id: i64, name: Option<&str>) -> StorageResult<i64>;

    /// Create an empty list, returning the new list id
    async fn create_todo_list(&mut self, name: &str) -> StorageResult<i64>;

    /// `Ok(false)` when the list exists but has no such todo
    async fn delete_todo_item(&mut self, list_id: i64, todo_id: i64) -> StorageResult<bool>;

    /// Delete a list together with all of its todos
    async fn delete_todo_list(&mut self, id: i64) -> StorageResult<bool>;

    /// `Ok(false)` when the list exists but was already empty
    async fn delete_todos_all(&mut self, list_id: i64) -> StorageResult<bool>;

    /// User-facing text for the error recorded by the last operation
    fn error_message(&self) -> Option<String>;

    /// Todos of a list, incomplete ones first; empty when the list does not exist
    async fn find_todo_items(&mut self, list_id: i64) -> StorageResult<Vec<TodoItem>>;

    async fn find_todo_list(&mut self, id: i64) -> StorageResult<TodoList>;

    /// `Ok(false)` when the list exists but has no todos
    async fn mark_all_complete(&mut self, list_id: i64) -> StorageResult<bool>;

    async fn mark_todo(&mut self, list_id: i64, todo_id: i64, completed: bool)
        -> StorageResult<bool>;

    /// Number of lists
    async fn size(&mut self) -> StorageResult<i64>;

    async fn update_list_name(&mut self, id: i64, name: &str) -> StorageResult<bool>;
}
