// ABOUTME: View-model helpers derived from list and todo records
// ABOUTME: Completion classes, counts and application labels for templates

use crate::constants::{COMPLETE_CLASS, INCOMPLETE_CLASS};
use crate::messages::{self, UiKey};
use crate::types::{TodoItem, TodoList};

pub fn app_name() -> String {
    messages::ui(UiKey::AppName, &[])
}

pub fn app_title() -> String {
    messages::ui(UiKey::AppTitle, &[])
}

/// A list is complete when it has todos and none remain
pub fn list_complete(list: &TodoList) -> bool {
    list.todos_count > 0 && list.todos_remaining_count == 0
}

pub fn list_completion_class(list: &TodoList) -> &'static str {
    if list_complete(list) {
        COMPLETE_CLASS
    } else {
        INCOMPLETE_CLASS
    }
}

pub fn todo_completion_class(todo: &TodoItem) -> &'static str {
    if todo.completed {
        COMPLETE_CLASS
    } else {
        INCOMPLETE_CLASS
    }
}

pub fn todos_count(todos: &[TodoItem]) -> usize {
    todos.len()
}

pub fn todos_remaining_count(todos: &[TodoItem]) -> usize {
    todos.iter().filter(|todo| !todo.completed).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todos() -> Vec<TodoItem> {
        ["Apples", "Bananas", "Cherries"]
            .iter()
            .enumerate()
            .map(|(index, name)| TodoItem {
                id: index as i64 + 1,
                list_id: 2,
                name: name.to_string(),
                completed: index == 1,
            })
            .collect()
    }

    #[test]
    fn test_application_labels() {
        assert_eq!(app_name(), "Todo Tracker");
        assert_eq!(app_title(), "Todo Tracker");
    }

    #[test]
    fn test_empty_list_is_incomplete() {
        let list = TodoList::new(1, "Dummy", 0, 0);
        assert!(!list_complete(&list));
        assert_eq!(list_completion_class(&list), "incomplete");
    }

    #[test]
    fn test_list_completion_class() {
        assert_eq!(list_completion_class(&TodoList::new(2, "Fruits", 3, 1)), "incomplete");
        assert_eq!(list_completion_class(&TodoList::new(2, "Fruits", 3, 0)), "complete");
    }

    #[test]
    fn test_todo_completion_class() {
        let todos = todos();
        assert_eq!(todo_completion_class(&todos[0]), "incomplete");
        assert_eq!(todo_completion_class(&todos[1]), "complete");
    }

    #[test]
    fn test_counts() {
        let todos = todos();
        assert_eq!(todos_count(&todos), 3);
        assert_eq!(todos_remaining_count(&todos), 2);
        assert_eq!(todos_count(&[]), 0);
        assert_eq!(todos_remaining_count(&[]), 0);
    }
}
