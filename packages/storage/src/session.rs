// ABOUTME: In-memory persistence shaped like a serialized user session
// ABOUTME: Mirrors the database backend's results, ordering and recorded errors

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use todos_core::helpers::{todos_count, todos_remaining_count};
use todos_core::messages::ErrorKey;
use todos_core::{sort_todo_items, sort_todo_lists, TodoItem, TodoList};

use crate::error::{ErrorSlot, StorageError, StorageResult};
use crate::TodoStorage;

const UNIQUE_LIST_NAME: &str = "UNIQUE constraint failed: lists.name";
const NOT_NULL_TODO_NAME: &str = "NotNullViolation: NOT NULL constraint failed: todos.name";
const FOREIGN_KEY_LIST: &str = "ForeignKeyViolation: FOREIGN KEY constraint failed";

/// A list and its todos as stored in the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionList {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub todos: Vec<TodoItem>,
}

impl SessionList {
    fn summary(&self) -> TodoList {
        TodoList::new(
            self.id,
            self.name.clone(),
            todos_count(&self.todos) as i64,
            todos_remaining_count(&self.todos) as i64,
        )
    }
}

/// Todo storage kept in memory
#[derive(Debug, Default)]
pub struct SessionPersistence {
    lists: Vec<SessionList>,
    error: ErrorSlot,
}

impl SessionPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from lists previously taken out with `into_lists`
    pub fn from_lists(lists: Vec<SessionList>) -> Self {
        Self {
            lists,
            error: ErrorSlot::new(),
        }
    }

    pub fn lists(&self) -> &[SessionList] {
        &self.lists
    }

    pub fn into_lists(self) -> Vec<SessionList> {
        self.lists
    }

    fn next_id<I: Iterator<Item = i64>>(ids: I) -> i64 {
        ids.max().unwrap_or(0) + 1
    }

    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.lists
            .iter()
            .any(|list| list.name == name && Some(list.id) != except)
    }

    fn position(&self, list_id: i64) -> Option<usize> {
        self.lists.iter().position(|list| list.id == list_id)
    }

    /// Index of the list, or a recorded `NoSuchList`
    fn require_list(&mut self, list_id: i64) -> StorageResult<usize> {
        self.error.clear();
        match self.position(list_id) {
            Some(index) => Ok(index),
            None => self.error.reject(StorageError::NoSuchList(list_id)),
        }
    }
}

#[async_trait]
impl TodoStorage for SessionPersistence {
    async fn all_lists(&mut self) -> StorageResult<Vec<TodoList>> {
        self.error.clear();

        let mut lists: Vec<TodoList> = self.lists.iter().map(SessionList::summary).collect();
        sort_todo_lists(&mut lists);
        Ok(lists)
    }

    async fn create_todo_item(&mut self, list_id: i64, name: Option<&str>) -> StorageResult<i64> {
        self.error.clear();

        let Some(name) = name else {
            return self
                .error
                .reject(StorageError::Database(NOT_NULL_TODO_NAME.to_string()));
        };
        let Some(index) = self.position(list_id) else {
            return self
                .error
                .reject(StorageError::Database(FOREIGN_KEY_LIST.to_string()));
        };

        let list = &mut self.lists[index];
        let id = Self::next_id(list.todos.iter().map(|todo| todo.id));
        list.todos.push(TodoItem {
            id,
            list_id,
            name: name.to_string(),
            completed: false,
        });

        debug!("Created todo {} in list {}", id, list_id);
        Ok(id)
    }

    async fn create_todo_list(&mut self, name: &str) -> StorageResult<i64> {
        self.error.clear();

        if self.name_taken(name, None) {
            return self
                .error
                .reject(StorageError::UniqueViolation(UNIQUE_LIST_NAME.to_string()));
        }

        let id = Self::next_id(self.lists.iter().map(|list| list.id));
        self.lists.push(SessionList {
            id,
            name: name.to_string(),
            todos: Vec::new(),
        });

        debug!("Created list '{}' with ID {}", name, id);
        Ok(id)
    }

    async fn delete_todo_item(&mut self, list_id: i64, todo_id: i64) -> StorageResult<bool> {
        let index = self.require_list(list_id)?;

        let todos = &mut self.lists[index].todos;
        let before = todos.len();
        todos.retain(|todo| todo.id != todo_id);
        Ok(todos.len() < before)
    }

    async fn delete_todo_list(&mut self, id: i64) -> StorageResult<bool> {
        let index = self.require_list(id)?;
        self.lists.remove(index);

        debug!("Deleted list {}", id);
        Ok(true)
    }

    async fn delete_todos_all(&mut self, list_id: i64) -> StorageResult<bool> {
        let index = self.require_list(list_id)?;

        let todos = &mut self.lists[index].todos;
        let removed = !todos.is_empty();
        todos.clear();
        Ok(removed)
    }

    fn error_message(&self) -> Option<String> {
        self.error.message()
    }

    async fn find_todo_items(&mut self, list_id: i64) -> StorageResult<Vec<TodoItem>> {
        self.error.clear();

        let mut todos = self
            .position(list_id)
            .map(|index| self.lists[index].todos.clone())
            .unwrap_or_default();
        sort_todo_items(&mut todos);
        Ok(todos)
    }

    async fn find_todo_list(&mut self, id: i64) -> StorageResult<TodoList> {
        let index = self.require_list(id)?;
        Ok(self.lists[index].summary())
    }

    async fn mark_all_complete(&mut self, list_id: i64) -> StorageResult<bool> {
        let index = self.require_list(list_id)?;

        let todos = &mut self.lists[index].todos;
        todos.iter_mut().for_each(|todo| todo.completed = true);
        Ok(!todos.is_empty())
    }

    async fn mark_todo(
        &mut self,
        list_id: i64,
        todo_id: i64,
        completed: bool,
    ) -> StorageResult<bool> {
        let index = self.require_list(list_id)?;

        match self.lists[index]
            .todos
            .iter_mut()
            .find(|todo| todo.id == todo_id)
        {
            Some(todo) => {
                todo.completed = completed;
                Ok(true)
            }
            None => {
                self.error.update(ErrorKey::NoTodo);
                Err(StorageError::NoSuchTodo { list_id, todo_id })
            }
        }
    }

    async fn size(&mut self) -> StorageResult<i64> {
        self.error.clear();
        Ok(self.lists.len() as i64)
    }

    async fn update_list_name(&mut self, id: i64, name: &str) -> StorageResult<bool> {
        let index = self.require_list(id)?;

        if self.name_taken(name, Some(id)) {
            return self
                .error
                .reject(StorageError::UniqueViolation(UNIQUE_LIST_NAME.to_string()));
        }

        self.lists[index].name = name.to_string();
        Ok(true)
    }
}
