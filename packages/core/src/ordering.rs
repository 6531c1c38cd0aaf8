// ABOUTME: Display ordering for lists and todos
// ABOUTME: Incomplete before complete, then by name, matching the SQL ORDER BY clauses

use crate::types::{TodoItem, TodoList};

/// Sort lists with incomplete lists first, each group ordered by name
pub fn sort_todo_lists(lists: &mut [TodoList]) {
    lists.sort_by(|a, b| a.completed.cmp(&b.completed).then_with(|| a.name.cmp(&b.name)));
}

/// Sort todos with incomplete todos first, each group ordered by name then id
pub fn sort_todo_items(todos: &mut [TodoItem]) {
    todos.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: i64, name: &str, completed: bool) -> TodoItem {
        TodoItem {
            id,
            list_id: 1,
            name: name.to_string(),
            completed,
        }
    }

    #[test]
    fn test_lists_incomplete_first_then_by_name() {
        let mut lists = vec![
            TodoList::new(1, "Alpha", 2, 2),
            TodoList::new(2, "Bravo", 1, 0),
            TodoList::new(3, "Charlie", 3, 1),
            TodoList::new(4, "Aardvark", 0, 0),
        ];

        sort_todo_lists(&mut lists);

        let names: Vec<_> = lists.iter().map(|list| list.name.as_str()).collect();
        assert_eq!(names, vec!["Aardvark", "Alpha", "Charlie", "Bravo"]);
    }

    #[test]
    fn test_todos_incomplete_first_then_by_name() {
        let mut todos = vec![
            todo(1, "Cherries", true),
            todo(2, "Bananas", false),
            todo(3, "Apples", true),
            todo(4, "Dates", false),
        ];

        sort_todo_items(&mut todos);

        let ids: Vec<_> = todos.iter().map(|todo| todo.id).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_duplicate_todo_names_keep_creation_order() {
        let mut todos = vec![todo(5, "Milk", false), todo(2, "Milk", false)];

        sort_todo_items(&mut todos);

        assert_eq!(todos[0].id, 2);
        assert_eq!(todos[1].id, 5);
    }
}
