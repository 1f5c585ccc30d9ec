//! Test fixtures and store helpers.
//!
//! Provides convenience wrappers for setting up test stores and
//! marketplaces with automatic cleanup.

use labstore_core::Store;
use labstore_market::Marketplace;
use std::path::PathBuf;
use tempfile::TempDir;

/// A test store with automatic cleanup.
pub struct TestStore {
    /// The store instance.
    pub store: Store,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
}

impl TestStore {
    /// Creates a new in-memory test store.
    #[must_use]
    pub fn memory() -> Self {
        Self {
            store: Store::open_in_memory().expect("failed to open in-memory store"),
            _temp_dir: None,
        }
    }

    /// Creates a new directory-backed test store.
    #[must_use]
    pub fn dir() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp directory");
        let store =
            Store::open(&temp_dir.path().join("store")).expect("failed to open directory store");

        Self {
            store,
            _temp_dir: Some(temp_dir),
        }
    }

    /// Returns the store path if directory-backed, `None` if in-memory.
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> {
        self._temp_dir.as_ref().map(|d| d.path().join("store"))
    }
}

impl std::ops::Deref for TestStore {
    type Target = Store;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

/// Runs a test with a temporary in-memory store.
///
/// # Example
///
/// ```rust,ignore
/// use labstore_testkit::with_mem_store;
///
/// #[test]
/// fn my_test() {
///     with_mem_store(|store| {
///         let tests = store.collection("tests", Vec::new()).unwrap();
///         // ... test operations
///     });
/// }
/// ```
pub fn with_mem_store<F, R>(f: F) -> R
where
    F: FnOnce(&Store) -> R,
{
    let test_store = TestStore::memory();
    f(&test_store.store)
}

/// Runs a test with a temporary directory-backed store.
///
/// The closure also receives the store path, for reopen scenarios; drop
/// the store (via [`TestStore`]) before reopening the same path.
pub fn with_dir_store<F, R>(f: F) -> R
where
    F: FnOnce(&Store, &std::path::Path) -> R,
{
    let test_store = TestStore::dir();
    let path = test_store.path().expect("directory store has a path");
    f(&test_store.store, &path)
}

/// A marketplace over a temporary directory, with automatic cleanup.
pub struct TestMarketplace {
    /// The marketplace instance.
    pub market: Marketplace,
    _temp_dir: TempDir,
}

impl TestMarketplace {
    /// Creates a marketplace in a fresh temporary directory.
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp directory");
        let market = Marketplace::open(&temp_dir.path().join("market"))
            .expect("failed to open marketplace");
        Self {
            market,
            _temp_dir: temp_dir,
        }
    }
}

impl Default for TestMarketplace {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Deref for TestMarketplace {
    type Target = Marketplace;

    fn deref(&self) -> &Self::Target {
        &self.market
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_has_no_path() {
        let store = TestStore::memory();
        assert!(store.path().is_none());
        assert!(store.is_open());
    }

    #[test]
    fn dir_store_reports_its_path() {
        let store = TestStore::dir();
        assert!(store.path().unwrap().exists());
    }

    #[test]
    fn marketplace_fixture_seeds() {
        let market = TestMarketplace::new();
        assert_eq!(market.laboratories().list().len(), 2);
    }
}
