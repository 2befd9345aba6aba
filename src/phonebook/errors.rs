//! Phonebook operation errors

use thiserror::Error;

use crate::store::StoreError;

/// Result type for phonebook operations
pub type PhonebookResult<T> = Result<T, PhonebookError>;

/// Errors returned by [`Phonebook`](super::Phonebook) operations
#[derive(Debug, Error)]
pub enum PhonebookError {
    /// Name or number missing on create
    #[error("name or number is missing")]
    Validation,

    /// Another person already has this name
    #[error("This name already exists")]
    DuplicateName,

    /// Another person already has this number
    #[error("This number already exists")]
    DuplicateNumber,

    /// No person with the given id
    #[error("Person not found")]
    NotFound,

    /// Identifier failed the store's id-format check
    #[error("malformatted id")]
    MalformedId(String),

    /// Any other store failure
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for PhonebookError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MalformedId(raw) => Self::MalformedId(raw),
            other => Self::Store(other),
        }
    }
}

impl PhonebookError {
    /// Get error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::DuplicateName => "DUPLICATE_NAME",
            Self::DuplicateNumber => "DUPLICATE_NUMBER",
            Self::NotFound => "NOT_FOUND",
            Self::MalformedId(_) => "MALFORMED_ID",
            Self::Store(err) => err.code(),
        }
    }
}
