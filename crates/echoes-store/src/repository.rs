//! The composition collection over a single storage slot.

use echoes_spec::Composition;
use log::{debug, warn};

use crate::error::PersistenceError;
use crate::storage::KeyValueStorage;

/// Storage key holding the serialized collection.
pub const COMPOSITIONS_KEY: &str = "emotional-echoes-compositions";

/// The `{load, append, remove}` capability the controller persists through.
pub trait CompositionRepository {
    /// Returns the saved compositions in save order.
    ///
    /// Missing, unreadable, or unparseable data yields an empty collection;
    /// the failure is logged, never returned.
    fn load(&self) -> Vec<Composition>;

    /// Appends `composition`, persists, and returns the new collection.
    fn append(&mut self, composition: Composition) -> Result<Vec<Composition>, PersistenceError>;

    /// Drops every composition with `id`, persists, and returns the
    /// remainder. An unknown id leaves storage untouched.
    fn remove(&mut self, id: &str) -> Result<Vec<Composition>, PersistenceError>;

    /// Looks up a saved composition by id.
    fn find(&self, id: &str) -> Option<Composition> {
        self.load().into_iter().find(|c| c.id == id)
    }
}

/// [`CompositionRepository`] backed by one slot of a [`KeyValueStorage`].
#[derive(Debug, Clone)]
pub struct CompositionStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> CompositionStore<S> {
    /// Creates a store using the default [`COMPOSITIONS_KEY`] slot.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, COMPOSITIONS_KEY)
    }

    /// Creates a store using a custom slot.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The slot name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self, compositions: &[Composition]) -> Result<(), PersistenceError> {
        let document = serde_json::to_string(compositions)?;
        self.storage.set(&self.key, &document)?;
        debug!(
            "event=compositions_persist status=ok key={} count={}",
            self.key,
            compositions.len()
        );
        Ok(())
    }
}

impl<S: KeyValueStorage> CompositionRepository for CompositionStore<S> {
    fn load(&self) -> Vec<Composition> {
        let document = match self.storage.get(&self.key) {
            Ok(Some(document)) => document,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(
                    "event=compositions_load status=unreadable key={} error={}",
                    self.key, err
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Composition>>(&document) {
            Ok(compositions) => compositions,
            Err(err) => {
                warn!(
                    "event=compositions_load status=corrupt key={} error={}",
                    self.key, err
                );
                Vec::new()
            }
        }
    }

    fn append(&mut self, composition: Composition) -> Result<Vec<Composition>, PersistenceError> {
        let mut compositions = self.load();
        compositions.push(composition);
        self.persist(&compositions)?;
        Ok(compositions)
    }

    fn remove(&mut self, id: &str) -> Result<Vec<Composition>, PersistenceError> {
        let mut compositions = self.load();
        let before = compositions.len();
        compositions.retain(|c| c.id != id);
        if compositions.len() != before {
            self.persist(&compositions)?;
        }
        Ok(compositions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use pretty_assertions::assert_eq;

    fn composition(id: &str, mood: &str) -> Composition {
        Composition::new(
            id,
            mood,
            format!("data:image/png;base64,{mood}"),
            "data:audio/wav;base64,UklGRg==",
        )
    }

    #[test]
    fn test_empty_storage_loads_empty() {
        let store = CompositionStore::new(MemoryStorage::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_append_then_load_preserves_fields() {
        let mut store = CompositionStore::new(MemoryStorage::new());
        let saved = composition("2025-01-01T00:00:00.000Z", "serene");

        let returned = store.append(saved.clone()).unwrap();
        assert_eq!(returned, vec![saved.clone()]);
        assert_eq!(store.load(), vec![saved]);
    }

    #[test]
    fn test_append_keeps_save_order() {
        let mut store = CompositionStore::new(MemoryStorage::new());
        store.append(composition("2025-01-01T00:00:02.000Z", "b")).unwrap();
        store.append(composition("2025-01-01T00:00:01.000Z", "a")).unwrap();
        store.append(composition("2025-01-01T00:00:03.000Z", "c")).unwrap();

        let moods: Vec<_> = store.load().into_iter().map(|c| c.mood).collect();
        assert_eq!(moods, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_persists_json_array_with_camel_case_keys() {
        let mut store = CompositionStore::new(MemoryStorage::new());
        store.append(composition("2025-01-01T00:00:00.000Z", "calm")).unwrap();

        let raw = store.storage().raw(COMPOSITIONS_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "id": "2025-01-01T00:00:00.000Z",
                "mood": "calm",
                "artDataUri": "data:image/png;base64,calm",
                "soundDataUri": "data:audio/wav;base64,UklGRg==",
            }])
        );
    }

    #[test]
    fn test_remove_drops_matching_id() {
        let mut store = CompositionStore::new(MemoryStorage::new());
        store.append(composition("id-1", "one")).unwrap();
        store.append(composition("id-2", "two")).unwrap();

        let remaining = store.remove("id-1").unwrap();
        assert_eq!(remaining, vec![composition("id-2", "two")]);
        assert!(store.load().iter().all(|c| c.id != "id-1"));
    }

    #[test]
    fn test_remove_drops_every_duplicate_id() {
        let mut store = CompositionStore::new(MemoryStorage::new());
        store.append(composition("same", "first")).unwrap();
        store.append(composition("same", "second")).unwrap();
        store.append(composition("other", "third")).unwrap();

        let remaining = store.remove("same").unwrap();
        assert_eq!(remaining, vec![composition("other", "third")]);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut store = CompositionStore::new(MemoryStorage::new());
        store.append(composition("id-1", "one")).unwrap();
        let before = store.storage().raw(COMPOSITIONS_KEY).map(str::to_string);

        let remaining = store.remove("missing").unwrap();
        assert_eq!(remaining, vec![composition("id-1", "one")]);
        assert_eq!(
            store.storage().raw(COMPOSITIONS_KEY).map(str::to_string),
            before
        );
    }

    #[test]
    fn test_corrupt_document_loads_empty() {
        for raw in ["{not json", "{\"id\": \"x\"}", "[{\"mood\": 3}]", "null", ""] {
            let store = CompositionStore::new(MemoryStorage::with_value(COMPOSITIONS_KEY, raw));
            assert!(store.load().is_empty(), "document {raw:?} should load empty");
        }
    }

    #[test]
    fn test_remove_on_corrupt_document_leaves_it_alone() {
        let mut store =
            CompositionStore::new(MemoryStorage::with_value(COMPOSITIONS_KEY, "{garbage"));
        assert!(store.remove("anything").unwrap().is_empty());
        assert_eq!(store.storage().raw(COMPOSITIONS_KEY), Some("{garbage"));
    }

    #[test]
    fn test_append_over_corrupt_document_starts_fresh() {
        let mut store =
            CompositionStore::new(MemoryStorage::with_value(COMPOSITIONS_KEY, "{garbage"));
        let saved = store.append(composition("id-1", "hopeful")).unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(store.load(), saved);
    }

    #[test]
    fn test_find_by_id() {
        let mut store = CompositionStore::new(MemoryStorage::new());
        store.append(composition("id-1", "one")).unwrap();
        store.append(composition("id-2", "two")).unwrap();

        assert_eq!(store.find("id-2").map(|c| c.mood), Some("two".to_string()));
        assert_eq!(store.find("id-3"), None);
    }

    #[test]
    fn test_custom_key_isolated_from_default() {
        let mut store = CompositionStore::with_key(MemoryStorage::new(), "other-slot");
        store.append(composition("id-1", "one")).unwrap();
        assert_eq!(store.key(), "other-slot");
        assert!(store.storage().raw(COMPOSITIONS_KEY).is_none());
    }

    #[test]
    fn test_file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = CompositionStore::new(FileStorage::open(dir.path()).unwrap());
            store.append(composition("id-1", "wistful")).unwrap();
        }
        let reopened = CompositionStore::new(FileStorage::open(dir.path()).unwrap());
        assert_eq!(reopened.load(), vec![composition("id-1", "wistful")]);
    }

    #[test]
    fn test_file_backed_corrupt_document_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(format!("{COMPOSITIONS_KEY}.json")),
            "[{\"id\":",
        )
        .unwrap();
        let store = CompositionStore::new(FileStorage::open(dir.path()).unwrap());
        assert!(store.load().is_empty());
    }
}
