use serde::Serialize;
use thiserror::Error;

/// A single constraint violation on an input field
///
/// `field` is the dotted path of the offending field (`age`, `address.city`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub kind: &'static str,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, kind: &'static str) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
        }
    }
}

/// Errors that can occur in the student domain
#[derive(Debug, Error)]
pub enum StudentError {
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Invalid ID format: {0}")]
    InvalidIdentifier(String),

    #[error("Student not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type StudentResult<T> = Result<T, StudentError>;
