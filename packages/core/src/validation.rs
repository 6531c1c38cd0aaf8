// ABOUTME: Input validation for list and todo names
// ABOUTME: Length rules checked before anything reaches the store

use thiserror::Error;

use crate::constants::{NAME_MAX_LENGTH, NAME_MIN_LENGTH};
use crate::messages::{CatalogKey, ErrorKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{}", ErrorKey::ListNameLength.message())]
    ListNameLength,

    #[error("{}", ErrorKey::TodoNameLength.message())]
    TodoNameLength,
}

impl ValidationError {
    /// Catalog identifier for this error
    pub fn key(&self) -> ErrorKey {
        match self {
            ValidationError::ListNameLength => ErrorKey::ListNameLength,
            ValidationError::TodoNameLength => ErrorKey::TodoNameLength,
        }
    }
}

/// Validate a list name (trimmed length between 1 and 100 characters)
pub fn validate_list_name(name: &str) -> Result<(), ValidationError> {
    if name_size_valid(name) {
        Ok(())
    } else {
        Err(ValidationError::ListNameLength)
    }
}

/// Validate a todo name (trimmed length between 1 and 100 characters)
pub fn validate_todo_name(name: &str) -> Result<(), ValidationError> {
    if name_size_valid(name) {
        Ok(())
    } else {
        Err(ValidationError::TodoNameLength)
    }
}

fn name_size_valid(name: &str) -> bool {
    let trimmed = name.trim_matches(is_strippable);
    (NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&trimmed.chars().count())
}

/// ASCII whitespace (vertical tab included) and NUL; other Unicode spaces count
fn is_strippable(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r' | '\0')
}
