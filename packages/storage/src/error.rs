// ABOUTME: Storage error type and the last-error slot
// ABOUTME: Maps every failure to a catalog message or a raw store diagnostic

use thiserror::Error;
use tracing::warn;

use todos_config::ConfigError;
use todos_core::messages::{CatalogKey, ErrorKey, MessageId};
use todos_core::ValidationError;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{}", ErrorKey::NoTodosList.message())]
    NoSuchList(i64),
    #[error("{}", ErrorKey::NoTodo.message())]
    NoSuchTodo { list_id: i64, todo_id: i64 },
    #[error("{}", ErrorKey::ListNameUnique.message())]
    UniqueViolation(String),
    #[error("{0}")]
    Database(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl StorageError {
    /// Catalog key for business errors, literal diagnostic text for everything else
    pub fn message_id(&self) -> MessageId<ErrorKey> {
        match self {
            StorageError::NoSuchList(_) => MessageId::Key(ErrorKey::NoTodosList),
            StorageError::NoSuchTodo { .. } => MessageId::Key(ErrorKey::NoTodo),
            StorageError::UniqueViolation(_) => MessageId::Key(ErrorKey::ListNameUnique),
            StorageError::Validation(err) => MessageId::Key(err.key()),
            StorageError::Database(diagnostic) => MessageId::Literal(diagnostic.clone()),
            other => MessageId::Literal(other.to_string()),
        }
    }

    /// Faults that are not caused by the request itself (lost connection, bad config, ...)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StorageError::Sqlx(_)
                | StorageError::Migration(_)
                | StorageError::Config(_)
                | StorageError::Io(_)
        )
    }
}

/// Holds the error recorded by the most recent failed operation
#[derive(Debug, Clone, Default)]
pub struct ErrorSlot {
    message: Option<MessageId<ErrorKey>>,
}

impl ErrorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite whatever is stored (last write wins)
    pub fn save(&mut self, message: impl Into<MessageId<ErrorKey>>) {
        self.message = Some(message.into());
    }

    /// Store only when nothing is stored yet (first error wins)
    pub fn update(&mut self, message: impl Into<MessageId<ErrorKey>>) {
        if self.message.is_none() {
            self.message = Some(message.into());
        }
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn is_set(&self) -> bool {
        self.message.is_some()
    }

    /// Record `error` and hand it back as an `Err`
    pub fn reject<T>(&mut self, error: StorageError) -> StorageResult<T> {
        warn!("Storage operation failed: {}", error);
        self.save(error.message_id());
        Err(error)
    }

    /// Stored message resolved through the error catalog
    pub fn message(&self) -> Option<String> {
        self.message.as_ref().map(|message| message.resolve(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slot_has_no_message() {
        let slot = ErrorSlot::new();
        assert!(!slot.is_set());
        assert_eq!(slot.message(), None);
    }

    #[test]
    fn test_save_overwrites() {
        let mut slot = ErrorSlot::new();
        slot.save(ErrorKey::NoTodosList);
        slot.save(ErrorKey::NoTodo);
        assert_eq!(slot.message().as_deref(), Some("No such todo."));
    }

    #[test]
    fn test_update_keeps_first_error() {
        let mut slot = ErrorSlot::new();
        slot.update("NotNullViolation: NOT NULL constraint failed: todos.name");
        slot.update(ErrorKey::NoTodo);
        assert_eq!(
            slot.message().as_deref(),
            Some("NotNullViolation: NOT NULL constraint failed: todos.name")
        );

        slot.clear();
        slot.update(ErrorKey::NoTodo);
        assert_eq!(slot.message().as_deref(), Some("No such todo."));
    }

    #[test]
    fn test_reject_records_catalog_message() {
        let mut slot = ErrorSlot::new();
        let result: StorageResult<()> = slot.reject(StorageError::NoSuchList(99));

        assert!(matches!(result, Err(StorageError::NoSuchList(99))));
        assert_eq!(slot.message().as_deref(), Some("No such todo list."));
    }

    #[test]
    fn test_display_matches_catalog() {
        assert_eq!(
            StorageError::UniqueViolation("UNIQUE constraint failed: lists.name".into()).to_string(),
            "List name must be unique."
        );
        assert_eq!(
            StorageError::NoSuchTodo { list_id: 1, todo_id: 2 }.to_string(),
            "No such todo."
        );
        assert_eq!(
            StorageError::Validation(ValidationError::TodoNameLength).message_id(),
            MessageId::Key(ErrorKey::TodoNameLength)
        );
    }

    #[test]
    fn test_fatal_classification() {
        assert!(!StorageError::NoSuchList(1).is_fatal());
        assert!(!StorageError::Database("CheckViolation: x".into()).is_fatal());
        assert!(StorageError::Sqlx(sqlx::Error::PoolClosed).is_fatal());
    }
}
