//! Store facade.

use crate::collection::Collection;
use crate::config::Config;
use crate::dir::StoreDir;
use crate::error::{CoreError, CoreResult};
use crate::record::Record;
use crate::session::Session;
use labstore_storage::{validate_key, DirBackend, InMemoryBackend, KvBackend};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// State shared between the store and its collection handles.
pub(crate) struct Shared {
    /// The key-value backend, serialized behind one lock.
    backend: Mutex<Box<dyn KvBackend>>,
    /// Store configuration.
    config: Config,
    /// Whether the store is still open.
    closed: RwLock<bool>,
    /// Collection keys claimed by live handles.
    claimed: Mutex<BTreeSet<String>>,
    /// Directory lock holder. None for in-memory stores.
    _dir: Option<StoreDir>,
}

impl Shared {
    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn ensure_open(&self) -> CoreResult<()> {
        if *self.closed.read() {
            return Err(CoreError::StoreClosed);
        }
        Ok(())
    }

    /// Reads the durable value under `key`.
    pub(crate) fn read(&self, key: &str) -> CoreResult<Option<Vec<u8>>> {
        self.ensure_open()?;
        Ok(self.backend.lock().get(key)?)
    }

    /// Overwrites the durable value under `key`.
    pub(crate) fn write(&self, key: &str, value: &[u8]) -> CoreResult<()> {
        self.ensure_open()?;
        let mut backend = self.backend.lock();
        backend.put(key, value)?;
        if self.config.sync_on_write {
            backend.sync()?;
        }
        Ok(())
    }

    /// Removes the durable value under `key`.
    pub(crate) fn delete(&self, key: &str) -> CoreResult<()> {
        self.ensure_open()?;
        let mut backend = self.backend.lock();
        backend.remove(key)?;
        if self.config.sync_on_write {
            backend.sync()?;
        }
        Ok(())
    }

    fn claim(&self, key: &str) -> CoreResult<()> {
        validate_key(key)?;
        let mut claimed = self.claimed.lock();
        if !claimed.insert(key.to_string()) {
            return Err(CoreError::CollectionInUse {
                name: key.to_string(),
            });
        }
        Ok(())
    }
}

/// The main store handle.
///
/// `Store` is the entry point for LabStore. It owns the key-value backend
/// and hands out [`Collection`] and [`Session`] handles, each exclusively
/// bound to one storage key for the life of the store.
///
/// # Opening a store
///
/// ```rust,ignore
/// use labstore_core::Store;
/// use std::path::Path;
///
/// let store = Store::open(Path::new("labstore_data"))?;
/// let labs = store.collection::<Laboratory>("laboratories", seed_laboratories())?;
/// ```
///
/// # In-memory stores
///
/// For tests, use [`Store::open_in_memory`].
pub struct Store {
    shared: Arc<Shared>,
}

impl Store {
    /// Opens a directory-backed store at the given path.
    ///
    /// Acquires an exclusive lock on the directory; a second process (or a
    /// second `Store` in this process) opening the same path gets
    /// [`CoreError::StoreLocked`].
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or locked.
    pub fn open(path: &Path) -> CoreResult<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Opens a directory-backed store with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or locked.
    pub fn open_with_config(path: &Path, config: Config) -> CoreResult<Self> {
        let dir = StoreDir::open(path, config.create_if_missing)?;
        let backend = DirBackend::open(path)?;

        debug!(path = %path.display(), "store opened");

        Ok(Self {
            shared: Arc::new(Shared {
                backend: Mutex::new(Box::new(backend)),
                config,
                closed: RwLock::new(false),
                claimed: Mutex::new(BTreeSet::new()),
                _dir: Some(dir),
            }),
        })
    }

    /// Opens an ephemeral in-memory store.
    ///
    /// # Errors
    ///
    /// Never fails today; returns a result for parity with the other
    /// constructors.
    pub fn open_in_memory() -> CoreResult<Self> {
        Ok(Self::open_with_backend(
            Config::default(),
            Box::new(InMemoryBackend::new()),
        ))
    }

    /// Opens a store over a pre-configured backend.
    ///
    /// This is the lower-level constructor used by tests and tools that
    /// supply their own backend (fault injection, pre-populated state).
    #[must_use]
    pub fn open_with_backend(config: Config, backend: Box<dyn KvBackend>) -> Self {
        Self {
            shared: Arc::new(Shared {
                backend: Mutex::new(backend),
                config,
                closed: RwLock::new(false),
                claimed: Mutex::new(BTreeSet::new()),
                _dir: None,
            }),
        }
    }

    /// Opens the named collection, hydrating it from storage.
    ///
    /// If the key has never been written, the collection is initialized from
    /// `seed` and the seed is written back. Each key can be claimed by at
    /// most one handle per store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is closed, the key is invalid, or the
    /// key is already claimed. Hydration read/parse failures are not errors;
    /// they surface through [`Collection::hydration`].
    pub fn collection<T: Record>(&self, name: &str, seed: Vec<T>) -> CoreResult<Collection<T>> {
        self.shared.ensure_open()?;
        self.shared.claim(name)?;
        Ok(Collection::open(name, Arc::clone(&self.shared), seed))
    }

    /// Opens the singleton session under the given key.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is closed, the key is invalid, or the
    /// key is already claimed.
    pub fn session<T: Record>(&self, key: &str) -> CoreResult<Session<T>> {
        self.shared.ensure_open()?;
        self.shared.claim(key)?;
        Ok(Session::open(key, Arc::clone(&self.shared)))
    }

    /// Returns all keys currently holding a durable value, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is closed or the listing fails.
    pub fn keys(&self) -> CoreResult<Vec<String>> {
        self.shared.ensure_open()?;
        Ok(self.shared.backend.lock().keys()?)
    }

    /// Reads the raw durable value under `key`.
    ///
    /// Inspection tooling uses this to look at collections without opening
    /// typed handles.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is closed or the read fails.
    pub fn raw_value(&self, key: &str) -> CoreResult<Option<Vec<u8>>> {
        self.shared.read(key)
    }

    /// Returns whether the store is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !*self.shared.closed.read()
    }

    /// Closes the store.
    ///
    /// Syncs the backend and rejects further operations. Collection handles
    /// keep serving in-memory reads but fail all mutations with
    /// [`CoreError::StoreClosed`].
    ///
    /// # Errors
    ///
    /// Returns an error if the final sync fails.
    pub fn close(&self) -> CoreResult<()> {
        self.shared.ensure_open()?;
        self.shared.backend.lock().sync()?;
        *self.shared.closed.write() = true;
        debug!("store closed");
        Ok(())
    }
}
