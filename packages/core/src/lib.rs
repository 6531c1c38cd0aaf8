// ABOUTME: Core types, message catalog, validation and routes for Todo Tracker
// ABOUTME: Foundational package shared by the storage layer and any front-end

pub mod constants;
pub mod helpers;
pub mod messages;
pub mod ordering;
pub mod routes;
pub mod types;
pub mod validation;

// Re-export main types
pub use types::{TodoItem, TodoList};

// Re-export constants
pub use constants::{NAME_MAX_LENGTH, NAME_MIN_LENGTH};

// Re-export message catalog
pub use messages::{CatalogKey, Category, ErrorKey, MessageId, SuccessKey, UiKey};

// Re-export ordering and validation
pub use ordering::{sort_todo_items, sort_todo_lists};
pub use validation::{validate_list_name, validate_todo_name, ValidationError};
