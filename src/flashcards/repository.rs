//! Library repository: the authoritative, ordered list of flashcards.
//!
//! The whole library is one JSON array stored under a single key. Every
//! mutation builds the next list, writes it, and only then replaces the
//! in-memory copy, so a failed write or a failed image read leaves both the
//! store and the repository untouched.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use super::models::{new_entry_id, normalize_category, EntryInput, EntryUpdate, FlashcardEntry};
use super::seed::default_library;
use crate::image::ImageError;
use crate::store::{write_json, SharedStore, StoreError};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Import contained no flashcards")]
    EmptyImport,
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

pub struct LibraryRepository {
    store: SharedStore,
    key: String,
    entries: Vec<FlashcardEntry>,
}

impl LibraryRepository {
    /// Create a repository over `store`; call [`load`](Self::load) before use
    pub fn new(store: SharedStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            entries: Vec::new(),
        }
    }

    /// Create and load in one step
    pub fn open(store: SharedStore, key: impl Into<String>) -> Result<Self> {
        let mut repo = Self::new(store, key);
        repo.load()?;
        Ok(repo)
    }

    /// Load the persisted library.
    ///
    /// A missing, malformed or empty library is replaced by the default set,
    /// which is persisted before returning.
    pub fn load(&mut self) -> Result<&[FlashcardEntry]> {
        let raw = match self.store.get(&self.key) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Could not read library '{}': {}", self.key, e);
                None
            }
        };

        let decoded = raw.and_then(|raw| match serde_json::from_str::<Value>(&raw) {
            Ok(value) => decode_entries(value),
            Err(e) => {
                log::warn!("Stored library is malformed: {}", e);
                None
            }
        });

        match decoded {
            Some((entries, repaired)) if !entries.is_empty() => {
                if repaired {
                    log::info!("Repaired stored library, saving cleaned copy");
                    self.save(&entries)?;
                }
                self.entries = entries;
            }
            _ => {
                let entries = default_library();
                self.save(&entries)?;
                log::info!("Seeded library with {} default cards", entries.len());
                self.entries = entries;
            }
        }

        Ok(&self.entries)
    }

    /// All entries in display order (newest additions first)
    pub fn entries(&self) -> &[FlashcardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&FlashcardEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Create an entry from `input` and insert it at the front
    pub fn add(&mut self, input: EntryInput) -> Result<FlashcardEntry> {
        let image = input.image.as_ref().map(|i| i.resolve()).transpose()?;

        let mut entry = FlashcardEntry::new(
            &input.word,
            &input.meaning,
            &input.category,
            &input.difficulty,
            &input.note,
            image,
        );
        while self.get(&entry.id).is_some() {
            entry.id = new_entry_id();
        }

        let mut next = self.entries.clone();
        next.insert(0, entry.clone());
        self.commit(next)?;

        log::info!("Added card '{}' ({})", entry.word, entry.id);
        Ok(entry)
    }

    /// Apply `update` to the entry with `id`; `None` when no such entry exists
    pub fn update(&mut self, id: &str, update: EntryUpdate) -> Result<Option<FlashcardEntry>> {
        let Some(pos) = self.entries.iter().position(|e| e.id == id) else {
            log::debug!("Update skipped, no card with id {}", id);
            return Ok(None);
        };

        let image = update.image.as_ref().map(|i| i.resolve()).transpose()?;

        let mut next = self.entries.clone();
        update.apply_to(&mut next[pos], image);
        let updated = next[pos].clone();
        self.commit(next)?;

        log::info!("Updated card '{}' ({})", updated.word, updated.id);
        Ok(Some(updated))
    }

    /// Delete the entry with `id`, returning whether one was removed
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }

        let next: Vec<FlashcardEntry> = self.entries.iter().filter(|e| e.id != id).cloned().collect();
        self.commit(next)?;

        log::info!("Removed card {}", id);
        Ok(true)
    }

    /// Discard every entry and reinstall the default set
    pub fn reset(&mut self) -> Result<&[FlashcardEntry]> {
        self.commit(default_library())?;
        log::info!("Library reset to defaults");
        Ok(&self.entries)
    }

    /// Replace the library with a JSON array of entries
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let value: Value = serde_json::from_str(json)?;
        let entries = match decode_entries(value) {
            Some((entries, _)) if !entries.is_empty() => entries,
            _ => return Err(RepositoryError::EmptyImport),
        };

        let count = entries.len();
        self.commit(entries)?;
        log::info!("Imported {} cards", count);
        Ok(count)
    }

    /// The library as a pretty-printed JSON array
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    fn save(&self, entries: &[FlashcardEntry]) -> Result<()> {
        write_json(self.store.as_ref(), &self.key, entries)?;
        Ok(())
    }

    fn commit(&mut self, entries: Vec<FlashcardEntry>) -> Result<()> {
        self.save(&entries)?;
        self.entries = entries;
        Ok(())
    }
}

/// Decode a stored array entry by entry.
///
/// Returns `None` when `value` is not an array. The flag reports whether any
/// element was dropped or re-keyed.
fn decode_entries(value: Value) -> Option<(Vec<FlashcardEntry>, bool)> {
    let Value::Array(items) = value else {
        log::warn!("Stored library is not an array");
        return None;
    };

    let mut repaired = false;
    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<FlashcardEntry>(item) {
            Ok(mut entry) => {
                // Padded or blank categories would list under a name the filter never matches
                let category = normalize_category(&entry.category);
                if category != entry.category {
                    entry.category = category;
                    repaired = true;
                }
                entries.push(entry);
            }
            Err(e) => {
                log::warn!("Dropping unreadable card at position {}: {}", index, e);
                repaired = true;
            }
        }
    }

    if dedupe_ids(&mut entries) > 0 {
        repaired = true;
    }

    Some((entries, repaired))
}

/// Give every entry whose id was already seen a fresh id
fn dedupe_ids(entries: &mut [FlashcardEntry]) -> usize {
    let mut seen = HashSet::new();
    let mut rekeyed = 0;

    for entry in entries.iter_mut() {
        if !seen.insert(entry.id.clone()) {
            let old = std::mem::replace(&mut entry.id, new_entry_id());
            while !seen.insert(entry.id.clone()) {
                entry.id = new_entry_id();
            }
            log::warn!("Duplicate card id {} re-keyed to {}", old, entry.id);
            rekeyed += 1;
        }
    }

    rekeyed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::image::ImageInput;
    use crate::store::{FileStore, KeyValueStore, MemoryStore};
    use tempfile::TempDir;

    const KEY: &str = "library";

    fn create_test_repo() -> (LibraryRepository, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let repo = LibraryRepository::open(store.clone(), KEY).unwrap();
        (repo, store)
    }

    fn words(entries: &[FlashcardEntry]) -> Vec<String> {
        entries.iter().map(|e| e.word.clone()).collect()
    }

    fn png_input() -> ImageInput {
        ImageInput::Bytes {
            data: b"\x89PNG\r\n\x1a\nfake".to_vec(),
            mime_type: None,
        }
    }

    #[test]
    fn test_load_seeds_empty_store() {
        let (repo, store) = create_test_repo();

        assert_eq!(repo.len(), 13);
        let persisted = store.get(KEY).unwrap().unwrap();
        let persisted: Vec<FlashcardEntry> = serde_json::from_str(&persisted).unwrap();
        assert_eq!(persisted, repo.entries());
    }

    #[test]
    fn test_seed_is_stable_across_loads() {
        let first = words(create_test_repo().0.entries());
        let second = words(create_test_repo().0.entries());
        assert_eq!(first, second);
        assert_eq!(first, words(&default_library()));
    }

    #[test]
    fn test_load_reseeds_malformed_or_empty() {
        for raw in ["{oops", "{\"word\":\"Cat\"}", "[]", "42", "[1, \"x\"]"] {
            let store = Arc::new(MemoryStore::new());
            store.set(KEY, raw).unwrap();

            let repo = LibraryRepository::open(store, KEY).unwrap();
            assert_eq!(repo.len(), 13, "input {:?} should reseed", raw);
        }
    }

    #[test]
    fn test_load_keeps_existing_library() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(KEY, r#"[{"id":"x1","word":"Cat","category":"Animals"}]"#)
            .unwrap();

        let repo = LibraryRepository::open(store.clone(), KEY).unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.entries()[0].id, "x1");
        assert_eq!(repo.entries()[0].difficulty, "Easy");
    }

    #[test]
    fn test_load_drops_bad_elements_and_rekeys_duplicates() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                KEY,
                r#"[{"id":"d","word":"A"}, 7, {"id":"d","word":"B"}, {"word":"C"}]"#,
            )
            .unwrap();

        let repo = LibraryRepository::open(store.clone(), KEY).unwrap();
        assert_eq!(words(repo.entries()), vec!["A", "B", "C"]);
        assert_eq!(repo.entries()[0].id, "d");
        assert_ne!(repo.entries()[1].id, "d");

        let ids: HashSet<&str> = repo.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), 3);

        // The cleaned copy was written back
        let reloaded = LibraryRepository::open(store, KEY).unwrap();
        assert_eq!(reloaded.entries(), repo.entries());
    }

    #[test]
    fn test_add_inserts_at_front() {
        let (mut repo, _store) = create_test_repo();

        let input = EntryInput {
            word: "  Cat ".to_string(),
            category: "Animals".to_string(),
            ..Default::default()
        };
        let entry = repo.add(input).unwrap();

        assert_eq!(repo.len(), 14);
        assert_eq!(repo.entries()[0].id, entry.id);
        assert_eq!(entry.word, "Cat");
        assert_eq!(entry.category, "Animals");
        assert_eq!(entry.difficulty, "Easy");
    }

    #[test]
    fn test_add_ids_are_unique() {
        let (mut repo, _store) = create_test_repo();
        for i in 0..50 {
            repo.add(EntryInput::new(format!("Word {}", i))).unwrap();
        }

        let ids: HashSet<&str> = repo.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), repo.len());
    }

    #[test]
    fn test_add_with_image() {
        let (mut repo, _store) = create_test_repo();

        let input = EntryInput {
            image: Some(png_input()),
            ..EntryInput::new("Wave")
        };
        let entry = repo.add(input).unwrap();

        let image = entry.image.unwrap();
        assert_eq!(image.mime_type(), Some("image/png"));
    }

    #[test]
    fn test_add_image_failure_writes_nothing() {
        let (mut repo, store) = create_test_repo();
        let before = store.get(KEY).unwrap();

        let input = EntryInput {
            image: Some(ImageInput::from_path("/definitely/not/here.png")),
            ..EntryInput::new("Wave")
        };
        let result = repo.add(input);

        assert!(matches!(result, Err(RepositoryError::Image(_))));
        assert_eq!(repo.len(), 13);
        assert_eq!(store.get(KEY).unwrap(), before);
    }

    #[test]
    fn test_load_normalizes_padded_categories() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                KEY,
                r#"[{"word":"Cat","category":"   "},{"word":"Dog","category":" Pets "},{"word":"Fish","category":"Pets"}]"#,
            )
            .unwrap();

        let repo = LibraryRepository::open(store.clone(), KEY).unwrap();
        let categories: Vec<&str> = repo.entries().iter().map(|e| e.category.as_str()).collect();
        assert_eq!(categories, vec!["Custom", "Pets", "Pets"]);

        // Every listed category selects at least one card
        for name in crate::flashcards::available_categories(repo.entries()).iter().skip(1) {
            let filter = crate::flashcards::CategoryFilter::from(name.as_str());
            assert!(repo.entries().iter().any(|e| filter.matches(e)), "{} matches nothing", name);
        }

        // The cleaned library was written back
        let saved = store.get(KEY).unwrap().unwrap();
        assert!(!saved.contains("\"   \""));
        assert!(!saved.contains("\" Pets \""));
    }

    #[test]
    fn test_update_unknown_id() {
        let (mut repo, _store) = create_test_repo();
        let update = EntryUpdate {
            word: Some("New".to_string()),
            ..Default::default()
        };
        assert!(repo.update("missing", update).unwrap().is_none());
    }

    #[test]
    fn test_update_preserves_image_on_omission() {
        let (mut repo, _store) = create_test_repo();
        let input = EntryInput {
            image: Some(png_input()),
            ..EntryInput::new("Wave")
        };
        let entry = repo.add(input).unwrap();
        let original_image = entry.image.clone();

        let update = EntryUpdate {
            word: Some("new".to_string()),
            ..Default::default()
        };
        let updated = repo.update(&entry.id, update).unwrap().unwrap();
        assert_eq!(updated.word, "new");
        assert_eq!(updated.image, original_image);

        let update = EntryUpdate {
            image: Some(ImageInput::Bytes {
                data: b"GIF89a....".to_vec(),
                mime_type: None,
            }),
            ..Default::default()
        };
        let updated = repo.update(&entry.id, update).unwrap().unwrap();
        assert_eq!(updated.word, "new");
        assert_eq!(updated.image.unwrap().mime_type(), Some("image/gif"));
    }

    #[test]
    fn test_update_image_failure_leaves_entry() {
        let (mut repo, _store) = create_test_repo();
        let id = repo.entries()[0].id.clone();

        let update = EntryUpdate {
            word: Some("Changed".to_string()),
            image: Some(ImageInput::from_path("/definitely/not/here.png")),
            ..Default::default()
        };
        assert!(repo.update(&id, update).is_err());
        assert_eq!(repo.get(&id).unwrap().word, "Hello");
    }

    #[test]
    fn test_remove() {
        let (mut repo, _store) = create_test_repo();
        let id = repo.entries()[3].id.clone();

        assert!(repo.remove(&id).unwrap());
        assert_eq!(repo.len(), 12);
        assert!(repo.get(&id).is_none());
        assert!(!repo.remove(&id).unwrap());
    }

    #[test]
    fn test_reset_restores_defaults() {
        let (mut repo, _store) = create_test_repo();
        repo.add(EntryInput::new("Cat")).unwrap();
        let id = repo.entries()[1].id.clone();
        repo.remove(&id).unwrap();

        repo.reset().unwrap();
        assert_eq!(words(repo.entries()), words(&default_library()));
    }

    #[test]
    fn test_export_then_import() {
        let (mut repo, _store) = create_test_repo();
        repo.add(EntryInput::new("Cat")).unwrap();
        let exported = repo.export_json().unwrap();

        let (mut other, _other_store) = create_test_repo();
        assert_eq!(other.import_json(&exported).unwrap(), 14);
        assert_eq!(other.entries(), repo.entries());
    }

    #[test]
    fn test_import_empty_rejected() {
        let (mut repo, _store) = create_test_repo();
        assert!(matches!(repo.import_json("[]"), Err(RepositoryError::EmptyImport)));
        assert!(matches!(repo.import_json("{}"), Err(RepositoryError::EmptyImport)));
        assert_eq!(repo.len(), 13);
    }

    #[test]
    fn test_persists_through_file_store() {
        let temp = TempDir::new().unwrap();
        let store: SharedStore = Arc::new(FileStore::new(temp.path().to_path_buf()).unwrap());

        let mut repo = LibraryRepository::open(store.clone(), KEY).unwrap();
        let entry = repo.add(EntryInput::new("Cat")).unwrap();

        let reopened = LibraryRepository::open(store, KEY).unwrap();
        assert_eq!(reopened.len(), 14);
        assert_eq!(reopened.entries()[0].id, entry.id);
    }
}
