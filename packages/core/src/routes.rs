// ABOUTME: URL route templates and path builders
// ABOUTME: Fills `:param` placeholders by plain textual substitution

use std::fmt::Display;

pub const INDEX: &str = "/"; // get
pub const ALL_LISTS: &str = "/lists"; // get
pub const CREATE_LIST: &str = "/lists/new"; // get/post
pub const VIEW_LIST: &str = "/lists/:id"; // get
pub const COMPLETE_ALL_TODOS: &str = "/lists/:id/complete_all"; // post
pub const DELETE_LIST: &str = "/lists/:id/destroy"; // post
pub const EDIT_LIST_FORM: &str = "/lists/:id/edit"; // get
pub const UPDATE_LIST_NAME: &str = "/lists/:id/edit"; // post
pub const ADD_TODO: &str = "/lists/:list_id/todos"; // post
pub const UPDATE_TODO_STATUS: &str = "/lists/:list_id/todos/:id"; // post
pub const DELETE_TODO: &str = "/lists/:list_id/todos/:id/destroy"; // post

pub fn index() -> String {
    INDEX.to_string()
}

pub fn all_lists() -> String {
    ALL_LISTS.to_string()
}

pub fn create_todo_list() -> String {
    CREATE_LIST.to_string()
}

pub fn view_list(list_id: impl Display) -> String {
    interpolate(VIEW_LIST, &[("id", list_id.to_string())])
}

pub fn complete_all_todos(list_id: impl Display) -> String {
    interpolate(COMPLETE_ALL_TODOS, &[("id", list_id.to_string())])
}

pub fn delete_todo_list(list_id: impl Display) -> String {
    interpolate(DELETE_LIST, &[("id", list_id.to_string())])
}

pub fn edit_todo_list(list_id: impl Display) -> String {
    interpolate(EDIT_LIST_FORM, &[("id", list_id.to_string())])
}

pub fn update_list_name(list_id: impl Display) -> String {
    interpolate(UPDATE_LIST_NAME, &[("id", list_id.to_string())])
}

pub fn add_todo(list_id: impl Display) -> String {
    interpolate(ADD_TODO, &[("list_id", list_id.to_string())])
}

pub fn complete_todo(list_id: impl Display, todo_id: impl Display) -> String {
    interpolate(
        UPDATE_TODO_STATUS,
        &[("list_id", list_id.to_string()), ("id", todo_id.to_string())],
    )
}

pub fn delete_todo_item(list_id: impl Display, todo_id: impl Display) -> String {
    interpolate(
        DELETE_TODO,
        &[("list_id", list_id.to_string()), ("id", todo_id.to_string())],
    )
}

/// Replace the first `:name` token for each variable with its value
pub fn interpolate(route: &str, variables: &[(&str, String)]) -> String {
    variables
        .iter()
        .fold(route.to_string(), |path, (parameter, value)| {
            path.replacen(&format!(":{}", parameter), value, 1)
        })
}
