//! Person store errors

use std::io;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a [`PersonStore`](super::PersonStore)
#[derive(Debug, Error)]
pub enum StoreError {
    /// Identifier does not satisfy the store's id format
    #[error("Malformed person id: {0}")]
    MalformedId(String),

    /// A record on disk failed its checksum or was truncated
    #[error("Store corruption at byte offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    /// Disk I/O failure
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// Record body could not be encoded or decoded
    #[error("Record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Store state is unusable (poisoned lock)
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn corruption(offset: u64, reason: impl Into<String>) -> Self {
        Self::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    /// Stable error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedId(_) => "PHONEBOOK_STORE_MALFORMED_ID",
            Self::Corruption { .. } => "PHONEBOOK_STORE_CORRUPTION",
            Self::Io { .. } => "PHONEBOOK_STORE_IO_ERROR",
            Self::Serialization(_) => "PHONEBOOK_STORE_SERIALIZATION",
            Self::Unavailable(_) => "PHONEBOOK_STORE_UNAVAILABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corruption_display_includes_offset() {
        let err = StoreError::corruption(42, "checksum mismatch");
        assert_eq!(
            err.to_string(),
            "Store corruption at byte offset 42: checksum mismatch"
        );
        assert_eq!(err.code(), "PHONEBOOK_STORE_CORRUPTION");
    }

    #[test]
    fn test_io_keeps_source() {
        use std::error::Error as _;

        let err = StoreError::io(
            "Failed to open",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.source().is_some());
        assert_eq!(err.code(), "PHONEBOOK_STORE_IO_ERROR");
    }
}
