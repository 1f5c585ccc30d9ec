//! The record trait and id helpers.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

/// A domain object that can live in a [`crate::Collection`].
///
/// Records are stored as JSON objects inside the collection's array. The id
/// is the record's stable identity: unique within its collection, immutable
/// once assigned.
///
/// # Example
///
/// ```rust
/// use labstore_core::Record;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Offer {
///     id: String,
///     title: String,
/// }
///
/// impl Record for Offer {
///     fn id(&self) -> &str {
///         &self.id
///     }
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Returns the record's unique identifier.
    fn id(&self) -> &str;
}

/// Generates a fresh record id with the given prefix.
///
/// Collections reject duplicate ids on insert, so callers creating new
/// records should never reuse ids. `fresh_id("lab")` yields something like
/// `lab_4f7a2c9e0d1b4e8fa3b5c6d7e8f90a1b`.
#[must_use]
pub fn fresh_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_unique() {
        let a = fresh_id("order");
        let b = fresh_id("order");
        assert_ne!(a, b);
    }

    #[test]
    fn fresh_id_keeps_prefix() {
        let id = fresh_id("complaint");
        assert!(id.starts_with("complaint_"));
    }
}
