use crate::config::Config;
use crate::entity::{Note, NoteCollection, NoteId};
use crate::error::Result;

use super::{IdStrategy, KeyValueStore};

/// The single reader and writer of the persisted note collection.
///
/// Every mutation is a full read-modify-write: load the latest collection,
/// build the next one, write it under the storage key, and only then replace
/// the cached copy. This assumes one writer; two processes editing the same
/// storage can lose each other's updates.
pub struct NoteStore<S> {
    kv: S,
    key: String,
    ids: IdStrategy,
    cache: NoteCollection,
}

impl<S: KeyValueStore> NoteStore<S> {
    pub fn new(kv: S, key: impl Into<String>, ids: IdStrategy) -> Self {
        let mut store = Self {
            kv,
            key: key.into(),
            ids,
            cache: NoteCollection::new(),
        };
        store.cache = store.read_collection();
        store
    }

    pub fn with_config(kv: S, config: &Config) -> Self {
        Self::new(kv, config.storage_key.clone(), config.id_strategy)
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn into_kv(self) -> S {
        self.kv
    }

    /// The collection as of the last successful read or write.
    pub fn cached(&self) -> &NoteCollection {
        &self.cache
    }

    /// Read the whole collection. Absent or unreadable data is an empty
    /// collection, never an error.
    pub fn load_all(&mut self) -> NoteCollection {
        self.cache = self.read_collection();
        self.cache.clone()
    }

    /// Note stored under `id`, or the default placeholder when there is none.
    pub fn get(&mut self, id: &NoteId) -> Note {
        match self.load_all().get(id) {
            Some(note) => note.clone(),
            None => {
                tracing::debug!(id = %id, "note not found, using placeholder");
                Note::default()
            }
        }
    }

    pub fn contains(&mut self, id: &NoteId) -> bool {
        self.load_all().contains(id)
    }

    pub fn len(&mut self) -> usize {
        self.load_all().len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.load_all().is_empty()
    }

    /// Insert a default note under a fresh id and return the id.
    pub fn create(&mut self) -> Result<NoteId> {
        let latest = self.load_all();
        let id = self.ids.next_id(&latest);
        self.commit(latest.with_note(id.clone(), Note::default()))?;
        tracing::info!(id = %id, "created note");
        Ok(id)
    }

    /// Store `note` under `id`, replacing whatever was there.
    pub fn update(&mut self, id: &NoteId, note: Note) -> Result<()> {
        let latest = self.load_all();
        self.commit(latest.with_note(id.clone(), note))
    }

    /// Remove `id`. Removing an absent id is not an error.
    pub fn delete(&mut self, id: &NoteId) -> Result<()> {
        let latest = self.load_all();
        if !latest.contains(id) {
            tracing::debug!(id = %id, "delete of absent note");
        }
        self.commit(latest.without(id))?;
        tracing::info!(id = %id, "deleted note");
        Ok(())
    }

    fn read_collection(&self) -> NoteCollection {
        let raw = match self.kv.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return NoteCollection::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read notes, treating as empty");
                return NoteCollection::new();
            }
        };

        match NoteCollection::from_json(&raw) {
            Ok(notes) => notes,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "malformed notes, treating as empty");
                NoteCollection::new()
            }
        }
    }

    fn commit(&mut self, next: NoteCollection) -> Result<()> {
        let raw = next.to_json()?;
        let bytes = raw.len();
        if let Err(e) = self.kv.set(&self.key, raw) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist notes");
            return Err(e);
        }
        tracing::debug!(key = %self.key, notes = next.len(), bytes, "persisted notes");
        self.cache = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoteboxError;
    use crate::storage::MemoryKv;

    fn store() -> NoteStore<MemoryKv> {
        NoteStore::new(MemoryKv::new(), "notes", IdStrategy::Counter)
    }

    fn store_with_raw(raw: &str) -> NoteStore<MemoryKv> {
        let mut kv = MemoryKv::new();
        kv.set("notes", raw.to_string()).unwrap();
        NoteStore::new(kv, "notes", IdStrategy::Counter)
    }

    #[test]
    fn test_load_all_empty_storage() {
        let mut store = store();
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_load_all_corrupt_storage_is_empty() {
        let mut store = store_with_raw("{not json");
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_load_all_null_is_empty() {
        let mut store = store_with_raw("null");
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_create_on_empty_gives_default_note() {
        let mut store = store();
        let id = store.create().unwrap();

        assert_eq!(id.as_str(), "1");
        assert_eq!(store.get(&id), Note::new("New Note", ""));
    }

    #[test]
    fn test_create_returns_unused_ids() {
        let mut store = store();
        let a = store.create().unwrap();
        let b = store.create().unwrap();
        let c = store.create().unwrap();

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_create_with_timestamp_ids_in_same_tick() {
        let mut store = NoteStore::new(MemoryKv::new(), "notes", IdStrategy::Timestamp);
        let ids: Vec<NoteId> = (0..20).map(|_| store.create().unwrap()).collect();

        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_get_absent_returns_placeholder() {
        let mut store = store();
        assert_eq!(store.get(&NoteId::from("nope")), Note::default());
    }

    #[test]
    fn test_update_then_get() {
        let mut store = store();
        let id = store.create().unwrap();

        let note = Note::new("Groceries", "milk, eggs");
        store.update(&id, note.clone()).unwrap();

        assert_eq!(store.get(&id), note);
    }

    #[test]
    fn test_update_persists_full_collection() {
        let mut store = store();
        let id = store.create().unwrap();
        store.update(&id, Note::new("a", "b")).unwrap();

        let raw = store.kv().get("notes").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({"1": {"name": "a", "content": "b"}}));
    }

    #[test]
    fn test_delete_twice_same_as_once() {
        let mut store = store();
        let keep = store.create().unwrap();
        let gone = store.create().unwrap();

        store.delete(&gone).unwrap();
        let once = store.load_all();
        store.delete(&gone).unwrap();
        let twice = store.load_all();

        assert_eq!(once, twice);
        assert!(twice.contains(&keep));
        assert!(!twice.contains(&gone));
    }

    #[test]
    fn test_create_then_delete_keeps_size() {
        let mut store = store();
        store.create().unwrap();
        let before = store.len();

        let id = store.create().unwrap();
        store.delete(&id).unwrap();

        assert_eq!(store.len(), before);
    }

    #[test]
    fn test_delete_one_of_two() {
        let mut store = store();
        let first = store.create().unwrap();
        let second = store.create().unwrap();
        store
            .update(&second, Note::new("keep me", "still here"))
            .unwrap();

        store.delete(&first).unwrap();

        let notes = store.load_all();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes.get(&second), Some(&Note::new("keep me", "still here")));
    }

    #[test]
    fn test_reads_see_external_writes() {
        let mut store = store();
        let id = store.create().unwrap();

        let mut kv = store.into_kv();
        kv.set("notes", r#"{"9":{"name":"x","content":"y"}}"#.to_string())
            .unwrap();
        let mut store = NoteStore::new(kv, "notes", IdStrategy::Counter);

        assert_eq!(store.get(&id), Note::default());
        assert_eq!(store.get(&NoteId::from("9")), Note::new("x", "y"));
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let mut store = NoteStore::new(MemoryKv::with_quota(64), "notes", IdStrategy::Counter);
        let id = store.create().unwrap();
        let before = store.load_all();

        let result = store.update(&id, Note::new("big", "x".repeat(500)));

        assert!(matches!(result, Err(NoteboxError::StorageWrite { .. })));
        assert_eq!(store.cached(), &before);
        assert_eq!(store.load_all(), before);
    }

    #[test]
    fn test_create_on_corrupt_storage_starts_fresh() {
        let mut store = store_with_raw("garbage");
        let id = store.create().unwrap();
        assert_eq!(store.load_all().len(), 1);
        assert_eq!(store.get(&id), Note::default());
    }

    #[test]
    fn test_create_after_largest_numeric_id() {
        let mut store = store_with_raw(r#"{"9223372036854775807":{"name":"a","content":"b"}}"#);

        let id = store.create().unwrap();

        assert_ne!(id.as_str(), "9223372036854775807");
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&id), Note::default());
    }

    #[test]
    fn test_custom_storage_key() {
        let mut store = NoteStore::new(MemoryKv::new(), "my-notes", IdStrategy::Counter);
        store.create().unwrap();

        assert!(store.kv().get("my-notes").unwrap().is_some());
        assert!(store.kv().get("notes").unwrap().is_none());
    }
}
