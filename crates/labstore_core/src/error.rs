//! Error types for LabStore core.

use std::io;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in LabStore core operations.
///
/// Hydration read/parse failures are deliberately *not* represented here:
/// they are absorbed into [`crate::HydrationOutcome::Recovered`] and the
/// collection degrades to its seed data.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Storage backend error.
    #[error("storage error: {0}")]
    Storage(#[from] labstore_storage::StorageError),

    /// JSON encoding or decoding error.
    #[error("codec error: {0}")]
    Codec(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A record with this id already exists in the collection.
    #[error("duplicate record id {id:?} in collection {collection:?}")]
    DuplicateId {
        /// Name of the collection.
        collection: String,
        /// The id that is already present.
        id: String,
    },

    /// The patch cannot be applied to the record.
    #[error("invalid patch: {message}")]
    InvalidPatch {
        /// Description of the problem.
        message: String,
    },

    /// The collection name is already claimed by another handle.
    #[error("collection {name:?} is already open")]
    CollectionInUse {
        /// Name of the collection.
        name: String,
    },

    /// The store directory is locked by another process.
    #[error("store locked: another process has exclusive access")]
    StoreLocked,

    /// The store has been closed.
    #[error("store is closed")]
    StoreClosed,

    /// The store path or layout is not usable.
    #[error("invalid store: {message}")]
    InvalidStore {
        /// Description of the problem.
        message: String,
    },
}

impl CoreError {
    /// Creates a duplicate id error.
    pub fn duplicate_id(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Creates an invalid patch error.
    pub fn invalid_patch(message: impl Into<String>) -> Self {
        Self::InvalidPatch {
            message: message.into(),
        }
    }

    /// Creates an invalid store error.
    pub fn invalid_store(message: impl Into<String>) -> Self {
        Self::InvalidStore {
            message: message.into(),
        }
    }
}
