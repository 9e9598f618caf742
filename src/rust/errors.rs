use thiserror::Error;

use crate::aminoacid::format_invalid_chars;
use crate::types::ProteinId;

/// Failures raised by a [`crate::store::ProteinStore`] implementation
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rocksdb::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt record at key {key}: {message}")]
    CorruptRecord { key: String, message: String },

    #[error("Lock acquisition failed: {0}")]
    LockError(String),

    #[error("Protein {0} not found")]
    NotFound(ProteinId),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced to whoever submitted a request
#[derive(Debug, Error)]
pub enum ProteinError {
    #[error("Protein name and sequence are required.")]
    MissingInput { field: &'static str },

    #[error("Sequence contains invalid characters: {}", format_invalid_chars(.characters))]
    InvalidSequence { characters: Vec<char> },

    #[error("Protein not found")]
    NotFound(ProteinId),

    /// Storage detail is kept as the source but never shown in the message
    #[error("Database operation failed")]
    Persistence(#[source] StoreError),

    #[error("Configuration error: {field} - {message}")]
    ConfigurationError { field: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ProteinResult<T> = Result<T, ProteinError>;

impl From<StoreError> for ProteinError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ProteinError::NotFound(id),
            other => {
                log::error!("Store operation failed: {}", other);
                ProteinError::Persistence(other)
            }
        }
    }
}

/// Extension trait for Result to add configuration context
pub trait ProteinResultExt<T> {
    /// Attach the offending configuration field to an error
    fn with_field_context(self, field: &str, message: &str) -> ProteinResult<T>;
}

impl<T, E> ProteinResultExt<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn with_field_context(self, field: &str, message: &str) -> ProteinResult<T> {
        self.map_err(|e| ProteinError::ConfigurationError {
            field: field.to_string(),
            message: format!("{}: {}", message, e),
        })
    }
}
