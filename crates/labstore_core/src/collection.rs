//! The persisted collection.

use crate::error::{CoreError, CoreResult};
use crate::record::Record;
use crate::state::{HydrationOutcome, LoadState};
use crate::store::Shared;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// A named, ordered collection of records persisted under one key.
///
/// The collection keeps an in-memory mirror of the stored JSON array.
/// Reads ([`list`](Self::list), [`get`](Self::get)) are served from the
/// mirror and never touch storage. Mutations rewrite the whole array
/// durably and only then swap the mirror, so after every successful
/// mutation the two are identical, and after a failed one the mirror still
/// matches the last durable snapshot - the attempted change is simply lost
/// and reported to the caller.
///
/// # Ordering
///
/// Insertion order is the canonical iteration order. [`insert`](Self::insert)
/// appends; [`update`](Self::update) and [`remove`](Self::remove) preserve
/// the order of the untouched records.
///
/// # Mutation serialization
///
/// Every mutation acquires the collection's write lock and re-reads the
/// latest accepted state before transforming it. Two writers racing on the
/// same collection therefore apply in sequence and both changes survive -
/// there is no lost-update window between "compute next array" and
/// "persist it".
pub struct Collection<T: Record> {
    /// Collection name; doubles as the storage key.
    name: String,
    /// Store-wide shared state (backend, config).
    shared: Arc<Shared>,
    /// In-memory mirror of the stored array.
    records: RwLock<Vec<T>>,
    /// Serializes mutations on this collection.
    write_lock: Mutex<()>,
    /// Lifecycle state.
    state: RwLock<LoadState>,
}

impl<T: Record> Collection<T> {
    /// Opens the collection and hydrates it. Called by the store.
    pub(crate) fn open(name: &str, shared: Arc<Shared>, seed: Vec<T>) -> Self {
        let collection = Self {
            name: name.to_string(),
            shared,
            records: RwLock::new(Vec::new()),
            write_lock: Mutex::new(()),
            state: RwLock::new(LoadState::Uninitialized),
        };
        collection.hydrate(seed);
        collection
    }

    /// Reads the durable value into memory, seeding on first-ever load.
    ///
    /// Runs exactly once, at open. Never fails: a missing key is seeded, an
    /// unreadable value degrades to the seed in memory. The `loading`
    /// transition happens exactly once, from `Hydrating` to `Ready`.
    fn hydrate(&self, seed: Vec<T>) {
        *self.state.write() = LoadState::Hydrating;

        let outcome = match self.shared.read(&self.name) {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<T>>(&bytes) {
                Ok(stored) => {
                    *self.records.write() = stored;
                    HydrationOutcome::Loaded
                }
                Err(err) => {
                    warn!(collection = %self.name, %err, "stored value unreadable, using seed");
                    self.recover(seed)
                }
            },
            Ok(None) => {
                // First-ever load: adopt the seed and write it through so the
                // next process start hydrates the same data.
                if let Err(err) = self.persist_bytes(&seed) {
                    warn!(collection = %self.name, %err, "seed write-back failed");
                }
                *self.records.write() = seed;
                HydrationOutcome::Seeded
            }
            Err(err) => {
                warn!(collection = %self.name, %err, "storage read failed, using seed");
                self.recover(seed)
            }
        };

        debug!(collection = %self.name, %outcome, "hydrated");
        *self.state.write() = LoadState::Ready(outcome);
    }

    /// Falls back to the seed after a failed read or parse.
    ///
    /// The durable value is left untouched so a transient failure cannot
    /// clobber recoverable data, unless the store is explicitly configured
    /// to reseed on corruption.
    fn recover(&self, seed: Vec<T>) -> HydrationOutcome {
        if self.shared.config().reseed_on_corrupt {
            if let Err(err) = self.persist_bytes(&seed) {
                warn!(collection = %self.name, %err, "reseed after corruption failed");
            }
        }
        *self.records.write() = seed;
        HydrationOutcome::Recovered
    }

    /// Serializes `records` and overwrites the durable value.
    fn persist_bytes(&self, records: &[T]) -> CoreResult<()> {
        let bytes = serde_json::to_vec(records)?;
        self.shared.write(&self.name, &bytes)
    }

    /// Persists `next` and, only on success, swaps the in-memory mirror.
    ///
    /// Caller must hold the write lock.
    fn persist(&self, next: Vec<T>) -> CoreResult<()> {
        if let Err(err) = self.persist_bytes(&next) {
            warn!(collection = %self.name, %err, "mutation not persisted, mirror unchanged");
            return Err(err);
        }
        *self.records.write() = next;
        Ok(())
    }

    /// Returns the collection name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        *self.state.read()
    }

    /// Returns how the initial contents were obtained.
    ///
    /// `None` only while hydration is still in flight, which cannot be
    /// observed through a store-created handle.
    #[must_use]
    pub fn hydration(&self) -> Option<HydrationOutcome> {
        self.state.read().outcome()
    }

    /// Returns a snapshot of all records in insertion order.
    pub fn list(&self) -> Vec<T> {
        self.records.read().clone()
    }

    /// Returns the record with the given id, if present.
    pub fn get(&self, id: &str) -> Option<T> {
        self.records.read().iter().find(|r| r.id() == id).cloned()
    }

    /// Returns whether a record with the given id is present.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.records.read().iter().any(|r| r.id() == id)
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Returns the records matching a predicate, in insertion order.
    pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool) -> Vec<T> {
        self.records
            .read()
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    /// Appends a record to the collection and persists.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateId`] if a record with the same id is
    /// already present, or a storage/codec error if the write fails (in
    /// which case the collection is unchanged).
    pub fn insert(&self, record: T) -> CoreResult<()> {
        let _guard = self.write_lock.lock();
        let mut next = self.records.read().clone();

        if next.iter().any(|r| r.id() == record.id()) {
            return Err(CoreError::duplicate_id(&self.name, record.id()));
        }

        next.push(record);
        self.persist(next)
    }

    /// Shallow-merges a JSON object patch into the record with the given id.
    ///
    /// Fields present in `patch` overwrite the record's fields; absent
    /// fields are preserved; other records are untouched. The record's `id`
    /// is immutable. Returns `false`, without writing, when no record
    /// matches.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPatch`] if `patch` is not a JSON object
    /// or tries to change the id, [`CoreError::Codec`] if the merged object
    /// no longer deserializes as a record, or a storage error if the write
    /// fails (collection unchanged).
    pub fn update(&self, id: &str, patch: Value) -> CoreResult<bool> {
        let Value::Object(patch) = patch else {
            return Err(CoreError::invalid_patch("patch must be a JSON object"));
        };
        if let Some(patched) = patch.get("id") {
            if patched.as_str() != Some(id) {
                return Err(CoreError::invalid_patch("record id is immutable"));
            }
        }

        let _guard = self.write_lock.lock();
        let mut next = self.records.read().clone();

        let Some(pos) = next.iter().position(|r| r.id() == id) else {
            return Ok(false);
        };

        let mut merged = serde_json::to_value(&next[pos])?;
        let Value::Object(fields) = &mut merged else {
            return Err(CoreError::invalid_patch(
                "record did not serialize to a JSON object",
            ));
        };
        for (key, value) in patch {
            fields.insert(key, value);
        }

        next[pos] = serde_json::from_value(merged)?;
        self.persist(next)?;
        Ok(true)
    }

    /// Applies a typed edit to the record with the given id.
    ///
    /// Returns `false`, without writing, when no record matches.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPatch`] if the edit changes the record's
    /// id, or a storage/codec error if the write fails.
    pub fn update_with(&self, id: &str, edit: impl FnOnce(&mut T)) -> CoreResult<bool> {
        let _guard = self.write_lock.lock();
        let mut next = self.records.read().clone();

        let Some(pos) = next.iter().position(|r| r.id() == id) else {
            return Ok(false);
        };

        edit(&mut next[pos]);
        if next[pos].id() != id {
            return Err(CoreError::invalid_patch("record id is immutable"));
        }

        self.persist(next)?;
        Ok(true)
    }

    /// Removes the record with the given id.
    ///
    /// Idempotent: returns `false`, without writing, when no record
    /// matches; the remaining records keep their order.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails (collection unchanged).
    pub fn remove(&self, id: &str) -> CoreResult<bool> {
        let _guard = self.write_lock.lock();
        let mut next = self.records.read().clone();

        let Some(pos) = next.iter().position(|r| r.id() == id) else {
            return Ok(false);
        };

        next.remove(pos);
        self.persist(next)?;
        Ok(true)
    }

    /// Replaces the whole collection.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateId`] if `records` contains a repeated
    /// id, or a storage/codec error if the write fails.
    pub fn replace_all(&self, records: Vec<T>) -> CoreResult<()> {
        for (i, record) in records.iter().enumerate() {
            if records[..i].iter().any(|r| r.id() == record.id()) {
                return Err(CoreError::duplicate_id(&self.name, record.id()));
            }
        }

        let _guard = self.write_lock.lock();
        self.persist(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use labstore_storage::{InMemoryBackend, KvBackend, StorageResult};
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Analysis {
        id: String,
        name: String,
        price: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        preparation: Option<String>,
    }

    impl Record for Analysis {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn analysis(id: &str, name: &str, price: f64) -> Analysis {
        Analysis {
            id: id.into(),
            name: name.into(),
            price,
            preparation: None,
        }
    }

    fn seeded_collection() -> (Store, Collection<Analysis>) {
        let store = Store::open_in_memory().unwrap();
        let collection = store
            .collection(
                "tests",
                vec![
                    analysis("t1", "Complete blood count", 100.0),
                    analysis("t2", "Lipid panel", 150.0),
                ],
            )
            .unwrap();
        (store, collection)
    }

    #[test]
    fn seed_on_empty_writes_through() {
        let (store, collection) = seeded_collection();

        assert_eq!(collection.hydration(), Some(HydrationOutcome::Seeded));
        assert_eq!(collection.len(), 2);

        // The seed must now be the durable value
        let stored = store.raw_value("tests").unwrap().unwrap();
        let parsed: Vec<Analysis> = serde_json::from_slice(&stored).unwrap();
        assert_eq!(parsed, collection.list());
    }

    #[test]
    fn hydrates_stored_value_over_seed() {
        let stored = serde_json::to_vec(&vec![analysis("t9", "Ferritin", 80.0)]).unwrap();
        let backend = InMemoryBackend::with_entries([("tests".to_string(), stored)]);
        let store = Store::open_with_backend(Default::default(), Box::new(backend));

        let collection = store
            .collection("tests", vec![analysis("seed", "Seed", 1.0)])
            .unwrap();

        assert_eq!(collection.hydration(), Some(HydrationOutcome::Loaded));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get("t9").unwrap().name, "Ferritin");
    }

    #[test]
    fn corrupt_value_recovers_to_seed_without_overwrite() {
        let backend =
            InMemoryBackend::with_entries([("tests".to_string(), b"{not json".to_vec())]);
        let store = Store::open_with_backend(Default::default(), Box::new(backend));

        let collection = store
            .collection("tests", vec![analysis("t1", "Seeded", 10.0)])
            .unwrap();

        assert_eq!(collection.hydration(), Some(HydrationOutcome::Recovered));
        assert_eq!(collection.len(), 1);
        // Durable bytes untouched: recoverable data must not be clobbered
        assert_eq!(
            store.raw_value("tests").unwrap().as_deref(),
            Some(&b"{not json"[..])
        );
    }

    #[test]
    fn corrupt_value_reseeds_when_configured() {
        let backend =
            InMemoryBackend::with_entries([("tests".to_string(), b"{not json".to_vec())]);
        let store = Store::open_with_backend(
            crate::Config::new().reseed_on_corrupt(true),
            Box::new(backend),
        );

        let collection = store
            .collection("tests", vec![analysis("t1", "Seeded", 10.0)])
            .unwrap();

        assert_eq!(collection.hydration(), Some(HydrationOutcome::Recovered));
        let stored = store.raw_value("tests").unwrap().unwrap();
        let parsed: Vec<Analysis> = serde_json::from_slice(&stored).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn insert_appends_at_end() {
        let (_store, collection) = seeded_collection();

        collection.insert(analysis("t3", "TSH", 90.0)).unwrap();

        let ids: Vec<String> = collection.list().iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let (_store, collection) = seeded_collection();

        let result = collection.insert(analysis("t1", "Duplicate", 1.0));
        assert!(matches!(result, Err(CoreError::DuplicateId { .. })));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn update_merges_only_named_fields() {
        let (_store, collection) = seeded_collection();

        let changed = collection.update("t1", json!({ "price": 150.0 })).unwrap();
        assert!(changed);

        let updated = collection.get("t1").unwrap();
        assert_eq!(updated.price, 150.0);
        assert_eq!(updated.name, "Complete blood count");
        // Other records untouched
        assert_eq!(collection.get("t2").unwrap(), analysis("t2", "Lipid panel", 150.0));
    }

    #[test]
    fn update_can_set_optional_fields() {
        let (_store, collection) = seeded_collection();

        collection
            .update("t2", json!({ "preparation": "12h fasting" }))
            .unwrap();

        assert_eq!(
            collection.get("t2").unwrap().preparation.as_deref(),
            Some("12h fasting")
        );
    }

    #[test]
    fn update_missing_id_is_noop() {
        let (store, collection) = seeded_collection();
        let before = store.raw_value("tests").unwrap();

        let changed = collection.update("t404", json!({ "price": 1.0 })).unwrap();
        assert!(!changed);
        assert_eq!(store.raw_value("tests").unwrap(), before);
    }

    #[test]
    fn update_rejects_id_change() {
        let (_store, collection) = seeded_collection();

        let result = collection.update("t1", json!({ "id": "t99" }));
        assert!(matches!(result, Err(CoreError::InvalidPatch { .. })));
        assert!(collection.contains("t1"));
    }

    #[test]
    fn update_rejects_non_object_patch() {
        let (_store, collection) = seeded_collection();

        let result = collection.update("t1", json!([1, 2, 3]));
        assert!(matches!(result, Err(CoreError::InvalidPatch { .. })));
    }

    #[test]
    fn update_with_applies_typed_edit() {
        let (_store, collection) = seeded_collection();

        let changed = collection
            .update_with("t1", |a| a.price = 175.0)
            .unwrap();
        assert!(changed);
        assert_eq!(collection.get("t1").unwrap().price, 175.0);
    }

    #[test]
    fn update_with_rejects_id_change() {
        let (_store, collection) = seeded_collection();

        let result = collection.update_with("t1", |a| a.id = "mutated".into());
        assert!(matches!(result, Err(CoreError::InvalidPatch { .. })));
        assert!(collection.contains("t1"));
        assert!(!collection.contains("mutated"));
    }

    #[test]
    fn remove_is_idempotent_and_order_preserving() {
        let (_store, collection) = seeded_collection();
        collection.insert(analysis("t3", "TSH", 90.0)).unwrap();

        assert!(collection.remove("t2").unwrap());
        let ids: Vec<String> = collection.list().iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids, vec!["t1", "t3"]);

        // Absent id: unchanged, same order
        assert!(!collection.remove("t2").unwrap());
        let ids: Vec<String> = collection.list().iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids, vec!["t1", "t3"]);
    }

    #[test]
    fn replace_all_swaps_contents() {
        let (_store, collection) = seeded_collection();

        collection
            .replace_all(vec![analysis("n1", "New", 5.0)])
            .unwrap();
        assert_eq!(collection.len(), 1);
        assert!(collection.contains("n1"));
    }

    #[test]
    fn replace_all_rejects_duplicate_ids() {
        let (_store, collection) = seeded_collection();

        let result = collection.replace_all(vec![
            analysis("n1", "New", 5.0),
            analysis("n1", "Clash", 6.0),
        ]);
        assert!(matches!(result, Err(CoreError::DuplicateId { .. })));
        // Prior contents intact
        assert_eq!(collection.len(), 2);
    }

    /// Backend that fails every write after an initial grace count.
    struct FailingBackend {
        inner: InMemoryBackend,
        writes_left: usize,
    }

    impl KvBackend for FailingBackend {
        fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
            self.inner.get(key)
        }

        fn put(&mut self, key: &str, value: &[u8]) -> StorageResult<()> {
            if self.writes_left == 0 {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into());
            }
            self.writes_left -= 1;
            self.inner.put(key, value)
        }

        fn remove(&mut self, key: &str) -> StorageResult<()> {
            self.inner.remove(key)
        }

        fn keys(&self) -> StorageResult<Vec<String>> {
            self.inner.keys()
        }

        fn sync(&mut self) -> StorageResult<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_leaves_mirror_at_prior_snapshot() {
        let backend = FailingBackend {
            inner: InMemoryBackend::new(),
            writes_left: 1, // seed write succeeds, everything after fails
        };
        let store = Store::open_with_backend(Default::default(), Box::new(backend));
        let collection = store
            .collection("tests", vec![analysis("t1", "Stable", 10.0)])
            .unwrap();

        let result = collection.insert(analysis("t2", "Lost", 20.0));
        assert!(matches!(result, Err(CoreError::Storage(_))));

        // Mirror and durable copy still agree on the prior snapshot
        assert_eq!(collection.len(), 1);
        let stored = store.raw_value("tests").unwrap().unwrap();
        let parsed: Vec<Analysis> = serde_json::from_slice(&stored).unwrap();
        assert_eq!(parsed, collection.list());
    }

    #[test]
    fn interleaved_inserts_both_survive() {
        let store = std::sync::Arc::new(Store::open_in_memory().unwrap());
        let collection = std::sync::Arc::new(
            store
                .collection::<Analysis>("tests", Vec::new())
                .unwrap(),
        );

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let collection = std::sync::Arc::clone(&collection);
                std::thread::spawn(move || {
                    collection
                        .insert(analysis(&format!("t{i}"), "Concurrent", i as f64))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(collection.len(), 8);
        for i in 0..8 {
            assert!(collection.contains(&format!("t{i}")));
        }
    }
}
