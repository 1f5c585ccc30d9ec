//! Key-value backend trait definition.

use crate::error::{StorageError, StorageResult};

/// Maximum length of a storage key in bytes.
///
/// Keys double as file names in [`crate::DirBackend`], so they are kept
/// short and restricted to a safe character set.
pub const MAX_KEY_LEN: usize = 128;

/// A low-level key-value backend for LabStore.
///
/// Backends are **opaque value stores**. Each key holds one value that is
/// replaced wholesale on every write. LabStore owns all value interpretation -
/// backends do not understand collections, records, or JSON.
///
/// # Invariants
///
/// - `get` returns exactly the bytes of the last successful `put` for that key
/// - `put` replaces the whole value; a crash mid-`put` must leave the prior
///   value observable on restart (no partial writes)
/// - `remove` of an absent key succeeds
/// - Backends must be `Send + Sync` for shared access
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::DirBackend`] - For persistent storage
pub trait KvBackend: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` if the key has never been written (or was removed).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or an I/O error occurs.
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Replaces the value stored under `key`.
    ///
    /// The write is atomic with respect to crashes: after a failure the key
    /// holds either the prior value or the new one, never a mix.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or an I/O error occurs.
    fn put(&mut self, key: &str, value: &[u8]) -> StorageResult<()>;

    /// Removes the value stored under `key`.
    ///
    /// Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or an I/O error occurs.
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Returns all keys currently holding a value, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the key listing cannot be produced.
    fn keys(&self) -> StorageResult<Vec<String>>;

    /// Ensures all previous writes are durable.
    ///
    /// For backends with no durability (memory), this is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync operation fails.
    fn sync(&mut self) -> StorageResult<()>;
}

/// Validates a storage key.
///
/// Keys must be non-empty, at most [`MAX_KEY_LEN`] bytes, and consist of
/// ASCII lowercase letters, digits, `_`, and `-`.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] describing the violation.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::invalid_key(key, "key is empty"));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(StorageError::invalid_key(
            key,
            format!("key exceeds {MAX_KEY_LEN} bytes"),
        ));
    }
    if !key
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
    {
        return Err(StorageError::invalid_key(
            key,
            "key must match [a-z0-9_-]+",
        ));
    }
    Ok(())
}
