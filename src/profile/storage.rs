//! Profile persistence
//!
//! The profile is a single optional record. "No profile" (key absent) is a
//! different state from a profile with an empty name.

use thiserror::Error;

use super::models::Profile;
use crate::image::{ImageError, ImageInput};
use crate::store::{read_json, write_json, SharedStore, StoreError};

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),
}

pub type Result<T> = std::result::Result<T, ProfileError>;

pub struct ProfileManager {
    store: SharedStore,
    key: String,
}

impl ProfileManager {
    pub fn new(store: SharedStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Stored profile, `None` when none was saved or it is unreadable
    pub fn load(&self) -> Option<Profile> {
        read_json(self.store.as_ref(), &self.key)
    }

    /// Save the name and, if given, a new photo.
    ///
    /// Without a photo input the previously stored photo is kept. The photo is
    /// read before anything is written.
    pub fn save(&self, name: &str, photo: Option<&ImageInput>) -> Result<Profile> {
        let photo = match photo {
            Some(input) => Some(input.resolve()?),
            None => self.load().and_then(|old| old.photo),
        };

        let profile = Profile::new(name, photo);
        write_json(self.store.as_ref(), &self.key, &profile)?;

        log::info!("Saved profile '{}'", profile.name);
        Ok(profile)
    }

    /// Delete the profile record, returning whether one existed
    pub fn clear(&self) -> Result<bool> {
        let removed = self.store.remove(&self.key)?;
        if removed {
            log::info!("Cleared profile");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::store::{KeyValueStore, MemoryStore};

    const KEY: &str = "profile";

    fn create_test_manager() -> (ProfileManager, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (ProfileManager::new(store.clone(), KEY), store)
    }

    fn photo() -> ImageInput {
        ImageInput::Bytes {
            data: vec![0xFF, 0xD8, 0xFF, 0xE0, 1, 2, 3],
            mime_type: None,
        }
    }

    #[test]
    fn test_load_absent() {
        let (manager, _store) = create_test_manager();
        assert!(manager.load().is_none());
    }

    #[test]
    fn test_load_malformed_is_absent() {
        let (manager, store) = create_test_manager();
        store.set(KEY, "not json").unwrap();
        assert!(manager.load().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let (manager, _store) = create_test_manager();

        let saved = manager.save("  Ana ", Some(&photo())).unwrap();
        assert_eq!(saved.name, "Ana");
        assert_eq!(saved.photo.as_ref().unwrap().mime_type(), Some("image/jpeg"));

        assert_eq!(manager.load().unwrap(), saved);
    }

    #[test]
    fn test_save_without_photo_keeps_previous() {
        let (manager, _store) = create_test_manager();
        let first = manager.save("Ana", Some(&photo())).unwrap();

        let second = manager.save("", None).unwrap();
        assert_eq!(second.name, "");
        assert_eq!(second.photo, first.photo);

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.name, "");
        assert!(loaded.photo.is_some());
    }

    #[test]
    fn test_clear_removes_record() {
        let (manager, _store) = create_test_manager();
        manager.save("Ana", Some(&photo())).unwrap();

        assert!(manager.clear().unwrap());
        assert!(manager.load().is_none());
        assert!(!manager.clear().unwrap());

        // A later save starts without a photo
        let profile = manager.save("Ben", None).unwrap();
        assert!(profile.photo.is_none());
    }

    #[test]
    fn test_photo_failure_writes_nothing() {
        let (manager, _store) = create_test_manager();
        manager.save("Ana", None).unwrap();

        let bad = ImageInput::from_path("/definitely/not/here.jpg");
        assert!(matches!(manager.save("Ben", Some(&bad)), Err(ProfileError::Image(_))));
        assert_eq!(manager.load().unwrap().name, "Ana");
    }
}
