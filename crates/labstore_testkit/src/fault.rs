//! Fault-injecting backend wrapper.

use labstore_storage::{KvBackend, StorageError, StorageResult};
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;

/// Shared switchboard controlling which operations fail.
#[derive(Debug, Default)]
struct Faults {
    fail_reads: bool,
    fail_writes: bool,
}

/// Remote control for a [`FaultBackend`].
///
/// Clone it before handing the backend to a store, then flip failures on
/// and off mid-test.
#[derive(Debug, Clone, Default)]
pub struct FaultSwitch {
    faults: Arc<Mutex<Faults>>,
}

impl FaultSwitch {
    /// Makes every subsequent read fail.
    pub fn fail_reads(&self, on: bool) {
        self.faults.lock().fail_reads = on;
    }

    /// Makes every subsequent write (put/remove) fail.
    pub fn fail_writes(&self, on: bool) {
        self.faults.lock().fail_writes = on;
    }
}

/// A backend wrapper that fails operations on demand.
///
/// Arms the two failure paths the collection layer has to survive:
/// hydration over an unreadable value, and a durable write that rejects a
/// mutation.
///
/// # Example
///
/// ```rust
/// use labstore_core::Store;
/// use labstore_storage::InMemoryBackend;
/// use labstore_testkit::FaultBackend;
///
/// let (backend, switch) = FaultBackend::wrap(InMemoryBackend::new());
/// let store = Store::open_with_backend(Default::default(), Box::new(backend));
///
/// switch.fail_writes(true);
/// // ... mutations now reject, mirrors stay at the prior snapshot
/// ```
pub struct FaultBackend<B> {
    inner: B,
    switch: FaultSwitch,
}

impl<B: KvBackend> FaultBackend<B> {
    /// Wraps a backend, returning it with its control switch.
    pub fn wrap(inner: B) -> (Self, FaultSwitch) {
        let switch = FaultSwitch::default();
        (
            Self {
                inner,
                switch: switch.clone(),
            },
            switch,
        )
    }

    fn injected() -> StorageError {
        StorageError::Io(io::Error::new(io::ErrorKind::Other, "injected fault"))
    }
}

impl<B: KvBackend> KvBackend for FaultBackend<B> {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        if self.switch.faults.lock().fail_reads {
            return Err(Self::injected());
        }
        self.inner.get(key)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> StorageResult<()> {
        if self.switch.faults.lock().fail_writes {
            return Err(Self::injected());
        }
        self.inner.put(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if self.switch.faults.lock().fail_writes {
            return Err(Self::injected());
        }
        self.inner.remove(key)
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        self.inner.keys()
    }

    fn sync(&mut self) -> StorageResult<()> {
        self.inner.sync()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labstore_core::{CoreError, HydrationOutcome, Record, Store};
    use labstore_storage::InMemoryBackend;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Item {
        id: String,
    }

    impl Record for Item {
        fn id(&self) -> &str {
            &self.id
        }
    }

    #[test]
    fn write_fault_rejects_mutation_and_preserves_mirror() {
        let (backend, switch) = FaultBackend::wrap(InMemoryBackend::new());
        let store = Store::open_with_backend(Default::default(), Box::new(backend));
        let items = store
            .collection("tests", vec![Item { id: "t1".into() }])
            .unwrap();

        switch.fail_writes(true);
        let result = items.insert(Item { id: "t2".into() });
        assert!(matches!(result, Err(CoreError::Storage(_))));
        assert_eq!(items.len(), 1);

        switch.fail_writes(false);
        items.insert(Item { id: "t2".into() }).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn read_fault_degrades_hydration_to_seed() {
        let (backend, switch) = FaultBackend::wrap(InMemoryBackend::new());
        let store = Store::open_with_backend(Default::default(), Box::new(backend));

        switch.fail_reads(true);
        let items = store
            .collection("tests", vec![Item { id: "seed".into() }])
            .unwrap();

        assert_eq!(items.hydration(), Some(HydrationOutcome::Recovered));
        assert!(items.contains("seed"));
    }
}
