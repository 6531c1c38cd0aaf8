// ABOUTME: Todo list and todo item record types
// ABOUTME: Plain records handed from the storage layer to views and handlers

use serde::{Deserialize, Serialize};

/// A named list with counts derived from its todos at read time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: i64,
    pub name: String,
    pub todos_count: i64,
    pub todos_remaining_count: i64,
    pub completed: bool,
}

impl TodoList {
    /// Build a list record, deriving `completed` from the counts
    pub fn new(id: i64, name: impl Into<String>, todos_count: i64, todos_remaining_count: i64) -> Self {
        Self {
            id,
            name: name.into(),
            todos_count,
            todos_remaining_count,
            completed: todos_count > 0 && todos_remaining_count == 0,
        }
    }
}

/// A single todo belonging to exactly one list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: i64,
    pub list_id: i64,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}
