//! Data models for the flashcard library

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::image::{ImageData, ImageInput};

/// Category given to entries created without one
pub const DEFAULT_CATEGORY: &str = "Custom";

/// Difficulty given to entries created without one
pub const DEFAULT_DIFFICULTY: &str = "Easy";

/// Difficulties offered by the shells; any other text is accepted too
pub const SUGGESTED_DIFFICULTIES: [&str; 3] = ["Easy", "Medium", "Hard"];

/// One flashcard: a word, what it means and how to sign it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardEntry {
    #[serde(default = "new_entry_id", deserialize_with = "id_or_new")]
    pub id: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub word: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub meaning: String,
    #[serde(default = "default_category", deserialize_with = "category_or_default")]
    pub category: String,
    #[serde(default = "default_difficulty", deserialize_with = "difficulty_or_default")]
    pub difficulty: String,
    /// Signing tip
    #[serde(default, deserialize_with = "text_or_empty")]
    pub note: String,
    #[serde(default, rename = "imageDataUrl")]
    pub image: Option<ImageData>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl FlashcardEntry {
    /// Build a new entry with a fresh id, normalizing every text field
    pub fn new(
        word: &str,
        meaning: &str,
        category: &str,
        difficulty: &str,
        note: &str,
        image: Option<ImageData>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_entry_id(),
            word: normalize_text(word),
            meaning: normalize_text(meaning),
            category: normalize_category(category),
            difficulty: normalize_difficulty(difficulty),
            note: normalize_text(note),
            image,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// Fields for a new entry, as gathered by a shell
#[derive(Debug, Clone, Default)]
pub struct EntryInput {
    pub word: String,
    pub meaning: String,
    pub category: String,
    pub difficulty: String,
    pub note: String,
    pub image: Option<ImageInput>,
}

impl EntryInput {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Default::default()
        }
    }
}

/// Changes to an existing entry; `None` leaves the field as it is
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub word: Option<String>,
    pub meaning: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub note: Option<String>,
    /// Replaces the stored image; omission keeps the existing one
    pub image: Option<ImageInput>,
}

impl EntryUpdate {
    /// Whether applying this update would change nothing
    pub fn is_empty(&self) -> bool {
        self.word.is_none()
            && self.meaning.is_none()
            && self.category.is_none()
            && self.difficulty.is_none()
            && self.note.is_none()
            && self.image.is_none()
    }

    /// Apply the text fields and an already-resolved image to `entry`
    pub(crate) fn apply_to(&self, entry: &mut FlashcardEntry, image: Option<ImageData>) {
        if let Some(word) = &self.word {
            entry.word = normalize_text(word);
        }
        if let Some(meaning) = &self.meaning {
            entry.meaning = normalize_text(meaning);
        }
        if let Some(category) = &self.category {
            entry.category = normalize_category(category);
        }
        if let Some(difficulty) = &self.difficulty {
            entry.difficulty = normalize_difficulty(difficulty);
        }
        if let Some(note) = &self.note {
            entry.note = normalize_text(note);
        }
        if image.is_some() {
            entry.image = image;
        }
        entry.updated_at = Utc::now();
    }
}

pub(crate) fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_difficulty() -> String {
    DEFAULT_DIFFICULTY.to_string()
}

pub fn normalize_text(value: &str) -> String {
    value.trim().to_string()
}

pub fn normalize_category(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default_category()
    } else {
        value.to_string()
    }
}

pub fn normalize_difficulty(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default_difficulty()
    } else {
        value.to_string()
    }
}

// Hand-edited or older documents may hold `null` where text is expected

fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn id_or_new<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(new_entry_id))
}

fn category_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|c| !c.is_empty())
        .unwrap_or_else(default_category))
}

fn difficulty_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|d| !d.is_empty())
        .unwrap_or_else(default_difficulty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_normalizes_fields() {
        let entry = FlashcardEntry::new("  Cat ", " Animal ", "   ", "", " Whiskers ", None);

        assert_eq!(entry.word, "Cat");
        assert_eq!(entry.meaning, "Animal");
        assert_eq!(entry.category, "Custom");
        assert_eq!(entry.difficulty, "Easy");
        assert_eq!(entry.note, "Whiskers");
        assert!(!entry.id.is_empty());
        assert!(!entry.has_image());
    }

    #[test]
    fn test_deserialize_web_app_record() {
        let json = r#"{
            "id": "a1b2c3",
            "word": "Hello",
            "meaning": "Greeting",
            "category": "Basics",
            "difficulty": "Easy",
            "note": "Smile and wave.",
            "imageDataUrl": null
        }"#;

        let entry: FlashcardEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "a1b2c3");
        assert_eq!(entry.word, "Hello");
        assert_eq!(entry.category, "Basics");
        assert!(entry.image.is_none());
    }

    #[test]
    fn test_deserialize_sparse_record() {
        let json = r#"{ "word": "Cat", "category": null, "note": null }"#;

        let entry: FlashcardEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.id.is_empty());
        assert_eq!(entry.word, "Cat");
        assert_eq!(entry.meaning, "");
        assert_eq!(entry.category, "Custom");
        assert_eq!(entry.difficulty, "Easy");
        assert_eq!(entry.note, "");
    }

    #[test]
    fn test_serialize_uses_image_data_url_key() {
        let entry = FlashcardEntry::new("Cat", "", "", "", "", None);
        let value = serde_json::to_value(&entry).unwrap();

        assert!(value.get("imageDataUrl").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("image").is_none());
    }

    #[test]
    fn test_update_keeps_omitted_fields() {
        let mut entry = FlashcardEntry::new("Cat", "Animal", "Animals", "Medium", "Tip", None);

        let update = EntryUpdate {
            word: Some(" Kitten ".to_string()),
            category: Some("  ".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut entry, None);

        assert_eq!(entry.word, "Kitten");
        assert_eq!(entry.meaning, "Animal");
        assert_eq!(entry.category, "Custom");
        assert_eq!(entry.difficulty, "Medium");
        assert_eq!(entry.note, "Tip");
    }

    #[test]
    fn test_empty_update() {
        assert!(EntryUpdate::default().is_empty());
        assert!(!EntryUpdate {
            note: Some(String::new()),
            ..Default::default()
        }
        .is_empty());
    }
}
