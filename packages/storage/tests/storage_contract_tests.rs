// ABOUTME: Runs the same storage scenarios against every TodoStorage backend
// ABOUTME: Both backends must agree on results, ordering and recorded errors

use pretty_assertions::assert_eq;
use todos_core::{validate_list_name, TodoList};
use todos_storage::{
    DatabasePersistence, SessionPersistence, StorageConfig, StorageError, TodoStorage,
};

async fn database() -> DatabasePersistence {
    DatabasePersistence::connect(&StorageConfig::in_memory())
        .await
        .unwrap()
}

async fn session() -> SessionPersistence {
    SessionPersistence::new()
}

async fn groceries_with_apples<S: TodoStorage>(mut storage: S) {
    let list_id = storage.create_todo_list("Groceries").await.unwrap();
    storage
        .create_todo_item(list_id, Some("Apples"))
        .await
        .unwrap();

    assert_eq!(
        storage.find_todo_list(list_id).await.unwrap(),
        TodoList::new(list_id, "Groceries", 1, 1)
    );
    assert_eq!(storage.size().await.unwrap(), 1);
    assert_eq!(storage.error_message(), None);
}

async fn duplicate_name_is_rejected<S: TodoStorage>(mut storage: S) {
    storage.create_todo_list("Groceries").await.unwrap();

    let result = storage.create_todo_list("Groceries").await;
    assert!(matches!(result, Err(StorageError::UniqueViolation(_))));
    assert_eq!(
        storage.error_message().as_deref(),
        Some("List name must be unique.")
    );
}

async fn missing_list_is_reported<S: TodoStorage>(mut storage: S) {
    assert!(matches!(
        storage.mark_todo(99, 1, true).await,
        Err(StorageError::NoSuchList(99))
    ));
    assert_eq!(storage.error_message().as_deref(), Some("No such todo list."));

    assert!(storage.find_todo_items(99).await.unwrap().is_empty());
    assert_eq!(storage.error_message(), None);
}

async fn missing_todo_is_reported<S: TodoStorage>(mut storage: S) {
    let list_id = storage.create_todo_list("Chores").await.unwrap();

    assert!(matches!(
        storage.mark_todo(list_id, 5, true).await,
        Err(StorageError::NoSuchTodo { todo_id: 5, .. })
    ));
    assert_eq!(storage.error_message().as_deref(), Some("No such todo."));
}

async fn null_todo_name_is_rejected<S: TodoStorage>(mut storage: S) {
    let list_id = storage.create_todo_list("Chores").await.unwrap();

    assert!(matches!(
        storage.create_todo_item(list_id, None).await,
        Err(StorageError::Database(_))
    ));
    assert_eq!(
        storage.error_message().as_deref(),
        Some("NotNullViolation: NOT NULL constraint failed: todos.name")
    );
}

async fn lists_and_todos_are_ordered<S: TodoStorage>(mut storage: S) {
    let b = storage.create_todo_list("B").await.unwrap();
    storage.create_todo_list("C").await.unwrap();
    let a = storage.create_todo_list("A").await.unwrap();

    let walk = storage.create_todo_item(b, Some("walk")).await.unwrap();
    storage.mark_todo(b, walk, true).await.unwrap();
    let zebra = storage.create_todo_item(a, Some("zebra")).await.unwrap();
    storage.create_todo_item(a, Some("apple")).await.unwrap();
    storage.create_todo_item(a, Some("mango")).await.unwrap();
    storage.mark_todo(a, zebra, true).await.unwrap();

    let lists: Vec<String> = storage
        .all_lists()
        .await
        .unwrap()
        .into_iter()
        .map(|list| list.name)
        .collect();
    assert_eq!(lists, vec!["A", "C", "B"]);

    let todos: Vec<(String, bool)> = storage
        .find_todo_items(a)
        .await
        .unwrap()
        .into_iter()
        .map(|todo| (todo.name, todo.completed))
        .collect();
    assert_eq!(
        todos,
        vec![
            ("apple".to_string(), false),
            ("mango".to_string(), false),
            ("zebra".to_string(), true),
        ]
    );
}

async fn bulk_operations<S: TodoStorage>(mut storage: S) {
    let list_id = storage.create_todo_list("Chores").await.unwrap();
    let empty_id = storage.create_todo_list("Empty").await.unwrap();
    storage.create_todo_item(list_id, Some("Sweep")).await.unwrap();
    storage.create_todo_item(list_id, Some("Dust")).await.unwrap();

    assert!(storage.mark_all_complete(list_id).await.unwrap());
    assert!(storage.find_todo_list(list_id).await.unwrap().completed);
    assert!(!storage.mark_all_complete(empty_id).await.unwrap());
    assert_eq!(storage.error_message(), None);

    assert!(!storage.delete_todo_item(list_id, 42).await.unwrap());
    assert!(storage.delete_todos_all(list_id).await.unwrap());
    assert!(!storage.delete_todos_all(list_id).await.unwrap());

    assert!(storage.delete_todo_list(list_id).await.unwrap());
    assert_eq!(storage.size().await.unwrap(), 1);
    assert!(matches!(
        storage.find_todo_list(list_id).await,
        Err(StorageError::NoSuchList(_))
    ));
}

async fn rename_after_validation<S: TodoStorage>(mut storage: S) {
    let list_id = storage.create_todo_list("Chores").await.unwrap();

    let too_long = "x".repeat(101);
    assert!(validate_list_name(&too_long).is_err());
    assert!(validate_list_name("House").is_ok());

    assert!(storage.update_list_name(list_id, "House").await.unwrap());
    assert_eq!(storage.find_todo_list(list_id).await.unwrap().name, "House");
    assert!(matches!(
        storage.update_list_name(list_id + 1, "Garage").await,
        Err(StorageError::NoSuchList(_))
    ));
}

macro_rules! contract_tests {
    ($($scenario:ident),+ $(,)?) => {
        mod database_backend {
            use super::*;
            $(
                #[tokio::test]
                async fn $scenario() {
                    super::$scenario(database().await).await;
                }
            )+
        }

        mod session_backend {
            use super::*;
            $(
                #[tokio::test]
                async fn $scenario() {
                    super::$scenario(session().await).await;
                }
            )+
        }
    };
}

contract_tests!(
    groceries_with_apples,
    duplicate_name_is_rejected,
    missing_list_is_reported,
    missing_todo_is_reported,
    null_todo_name_is_rejected,
    lists_and_todos_are_ordered,
    bulk_operations,
    rename_after_validation,
);
