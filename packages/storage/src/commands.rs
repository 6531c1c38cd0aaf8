// ABOUTME: The fixed set of SQL statements the storage layer runs
// ABOUTME: Every statement takes positional `?` parameters that are always bound

/// SQL commands used by the database persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    CountLists,
    CreateTodoItem,
    CreateTodoList,
    DeleteTodoItem,
    DeleteTodosAll,
    DeleteTodoList,
    GetAllTodoLists,
    GetTodoItems,
    GetTodoList,
    MarkTodo,
    MarkTodosComplete,
    UpdateListName,
}

impl Command {
    pub fn sql(&self) -> &'static str {
        match self {
            Command::CountLists => "SELECT COUNT(*) AS count FROM lists",
            Command::CreateTodoItem => "INSERT INTO todos (list_id, name) VALUES (?1, ?2)",
            Command::CreateTodoList => "INSERT INTO lists (name) VALUES (?1)",
            Command::DeleteTodoItem => "DELETE FROM todos WHERE list_id = ?1 AND id = ?2",
            Command::DeleteTodosAll => "DELETE FROM todos WHERE list_id = ?1",
            Command::DeleteTodoList => "DELETE FROM lists WHERE id = ?1",
            Command::GetAllTodoLists => {
                r#"
                SELECT lists.id,
                       lists.name,
                       COUNT(todos.id)                  AS todos_count,
                       COUNT(NULLIF(todos.completed, 1)) AS todos_remaining_count,
                       COUNT(todos.id) > 0 AND COUNT(NULLIF(todos.completed, 1)) = 0
                                                        AS completed
                FROM lists
                LEFT JOIN todos ON todos.list_id = lists.id
                GROUP BY lists.id
                ORDER BY completed, lists.name
                "#
            }
            Command::GetTodoItems => {
                r#"
                SELECT id, list_id, name, completed
                FROM todos
                WHERE list_id = ?1
                ORDER BY completed, name, id
                "#
            }
            Command::GetTodoList => {
                r#"
                SELECT lists.id,
                       lists.name,
                       COUNT(todos.id)                  AS todos_count,
                       COUNT(NULLIF(todos.completed, 1)) AS todos_remaining_count,
                       COUNT(todos.id) > 0 AND COUNT(NULLIF(todos.completed, 1)) = 0
                                                        AS completed
                FROM lists
                LEFT JOIN todos ON todos.list_id = lists.id
                WHERE lists.id = ?1
                GROUP BY lists.id
                "#
            }
            Command::MarkTodo => "UPDATE todos SET completed = ?3 WHERE list_id = ?1 AND id = ?2",
            Command::MarkTodosComplete => "UPDATE todos SET completed = 1 WHERE list_id = ?1",
            Command::UpdateListName => "UPDATE lists SET name = ?2 WHERE id = ?1",
        }
    }

    /// Number of positional parameters the statement expects
    pub fn arity(&self) -> usize {
        match self {
            Command::CountLists | Command::GetAllTodoLists => 0,
            Command::CreateTodoList
            | Command::DeleteTodosAll
            | Command::DeleteTodoList
            | Command::GetTodoItems
            | Command::GetTodoList
            | Command::MarkTodosComplete => 1,
            Command::CreateTodoItem | Command::DeleteTodoItem | Command::UpdateListName => 2,
            Command::MarkTodo => 3,
        }
    }
}
