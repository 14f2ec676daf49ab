use std::path::PathBuf;

use shelf_types::{BookId, ValidationError};

/// Errors from catalog and persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A field, status, or search argument failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No book with the given id.
    #[error("book with id {0} not found")]
    NotFound(BookId),

    /// A content-equal book is already in the catalog.
    #[error("book {title:?} already exists (id {existing})")]
    Duplicate { title: String, existing: BookId },

    /// Every id up to `i64::MAX` has been handed out.
    #[error("no book ids left: the largest id is already taken")]
    IdsExhausted,

    /// I/O error from the backing file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not exist and the backend requires it.
    #[error("catalog file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// Persisted data could not be decoded into valid books.
    #[error("corrupt data at {location}: {reason}")]
    CorruptData { location: String, reason: String },

    /// Records could not be encoded for writing.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub(crate) fn corrupt(location: impl Into<String>, reason: impl ToString) -> Self {
        Self::CorruptData {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
