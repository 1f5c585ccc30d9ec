//! The singleton session record.

use crate::error::CoreResult;
use crate::record::Record;
use crate::state::{HydrationOutcome, LoadState};
use crate::store::Shared;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, warn};

/// A singleton record persisted under one key.
///
/// Where a [`crate::Collection`] holds a JSON array, a `Session` holds at
/// most one JSON object - the authenticated user in the marketplace. Its
/// presence defines the session: `sign_in` persists then swaps the mirror,
/// `sign_out` removes the durable value then clears it.
///
/// Hydration follows the collection rules with a seed of "nobody": an
/// absent key yields no session, an unreadable value is dropped in memory
/// and left untouched on disk.
pub struct Session<T: Record> {
    /// Storage key, e.g. `"user"`.
    key: String,
    /// Store-wide shared state.
    shared: Arc<Shared>,
    /// The current signed-in record, if any.
    current: RwLock<Option<T>>,
    /// Serializes sign-in/sign-out.
    write_lock: Mutex<()>,
    /// Lifecycle state.
    state: RwLock<LoadState>,
}

impl<T: Record> Session<T> {
    /// Opens the session and hydrates it. Called by the store.
    pub(crate) fn open(key: &str, shared: Arc<Shared>) -> Self {
        let session = Self {
            key: key.to_string(),
            shared,
            current: RwLock::new(None),
            write_lock: Mutex::new(()),
            state: RwLock::new(LoadState::Uninitialized),
        };
        session.hydrate();
        session
    }

    fn hydrate(&self) {
        *self.state.write() = LoadState::Hydrating;

        let outcome = match self.shared.read(&self.key) {
            Ok(Some(bytes)) => match serde_json::from_slice::<T>(&bytes) {
                Ok(record) => {
                    *self.current.write() = Some(record);
                    HydrationOutcome::Loaded
                }
                Err(err) => {
                    warn!(key = %self.key, %err, "stored session unreadable, dropped");
                    HydrationOutcome::Recovered
                }
            },
            Ok(None) => HydrationOutcome::Seeded,
            Err(err) => {
                warn!(key = %self.key, %err, "session read failed");
                HydrationOutcome::Recovered
            }
        };

        debug!(key = %self.key, %outcome, "session hydrated");
        *self.state.write() = LoadState::Ready(outcome);
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        *self.state.read()
    }

    /// Returns how the initial session was obtained.
    #[must_use]
    pub fn hydration(&self) -> Option<HydrationOutcome> {
        self.state.read().outcome()
    }

    /// Returns the signed-in record, if any.
    pub fn current(&self) -> Option<T> {
        self.current.read().clone()
    }

    /// Returns whether a record is signed in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    /// Persists `record` as the session, then swaps the mirror.
    ///
    /// # Errors
    ///
    /// Returns a storage/codec error if the write fails, in which case the
    /// prior session (if any) remains in force.
    pub fn sign_in(&self, record: T) -> CoreResult<()> {
        let _guard = self.write_lock.lock();
        let bytes = serde_json::to_vec(&record)?;
        self.shared.write(&self.key, &bytes)?;
        *self.current.write() = Some(record);
        Ok(())
    }

    /// Removes the durable session, then clears the mirror.
    ///
    /// Signing out with no session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the removal fails, in which case the
    /// session remains in force.
    pub fn sign_out(&self) -> CoreResult<()> {
        let _guard = self.write_lock.lock();
        self.shared.delete(&self.key)?;
        *self.current.write() = None;
        Ok(())
    }
}
