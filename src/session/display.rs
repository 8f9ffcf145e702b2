//! What each view shows, independent of how a shell draws it

use serde::Serialize;

use crate::flashcards::FlashcardEntry;
use crate::image::ImageData;

pub const NO_TIP: &str = "No tip added.";
pub const NO_CARDS_TITLE: &str = "No cards found";
pub const NO_CARDS_HINT: &str = "Try a different category or search";
pub const NO_CARDS_NOTE: &str = "Add your own words in Manage.";
pub const NO_RESULTS_LABEL: &str = "No results";
pub const PLACEHOLDER: &str = "\u{2014}";
pub const NO_ITEMS_TITLE: &str = "No items";
pub const NO_ITEMS_HINT: &str = "Add words above";

fn tip_or_default(note: &str) -> String {
    if note.is_empty() {
        NO_TIP.to_string()
    } else {
        note.to_string()
    }
}

/// The card shown in the Learn view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub category: String,
    pub difficulty: String,
    pub word: String,
    pub meaning: String,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageData>,
    /// 1-based position and view length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<(usize, usize)>,
}

impl LearnCard {
    pub fn new(entry: Option<&FlashcardEntry>, index: usize, len: usize) -> Self {
        match entry {
            Some(entry) => Self {
                id: Some(entry.id.clone()),
                category: entry.category.clone(),
                difficulty: entry.difficulty.clone(),
                word: entry.word.clone(),
                meaning: entry.meaning.clone(),
                note: tip_or_default(&entry.note),
                image: entry.image.clone(),
                position: Some((index + 1, len)),
            },
            None => Self {
                id: None,
                category: NO_RESULTS_LABEL.to_string(),
                difficulty: PLACEHOLDER.to_string(),
                word: NO_CARDS_TITLE.to_string(),
                meaning: NO_CARDS_HINT.to_string(),
                note: NO_CARDS_NOTE.to_string(),
                image: None,
                position: None,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
    }
}

/// The card shown in the Practice view; the answer stays hidden until revealed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub word: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageData>,
    pub revealed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PracticeCard {
    pub fn new(entry: Option<&FlashcardEntry>, revealed: bool) -> Self {
        match entry {
            Some(entry) => Self {
                id: Some(entry.id.clone()),
                word: entry.word.clone(),
                image: entry.image.clone(),
                revealed,
                meaning: revealed.then(|| entry.meaning.clone()),
                note: revealed.then(|| tip_or_default(&entry.note)),
            },
            None => Self {
                id: None,
                word: NO_CARDS_TITLE.to_string(),
                image: None,
                revealed: false,
                meaning: None,
                note: None,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
    }

    /// Label for the reveal button
    pub fn reveal_label(&self) -> &'static str {
        if self.revealed {
            "Hide"
        } else {
            "Reveal"
        }
    }
}

/// One line of the Manage list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageRow {
    pub id: String,
    pub word: String,
    pub category: String,
    pub difficulty: String,
    pub meaning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    pub has_image: bool,
}

impl ManageRow {
    pub fn new(entry: &FlashcardEntry) -> Self {
        Self {
            id: entry.id.clone(),
            word: entry.word.clone(),
            category: entry.category.clone(),
            difficulty: entry.difficulty.clone(),
            meaning: entry.meaning.clone(),
            tip: (!entry.note.is_empty()).then(|| entry.note.clone()),
            has_image: entry.has_image(),
        }
    }

    /// "Category • Difficulty"
    pub fn meta(&self) -> String {
        format!("{} \u{2022} {}", self.category, self.difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(note: &str) -> FlashcardEntry {
        FlashcardEntry::new("Water", "Ask for a drink", "Needs", "Easy", note, None)
    }

    #[test]
    fn test_learn_card_empty_state() {
        let card = LearnCard::new(None, 0, 0);
        assert!(card.is_empty());
        assert_eq!(card.word, "No cards found");
        assert_eq!(card.category, "No results");
        assert_eq!(card.note, "Add your own words in Manage.");
    }

    #[test]
    fn test_learn_card_defaults_tip() {
        let e = entry("");
        let card = LearnCard::new(Some(&e), 2, 5);
        assert_eq!(card.note, "No tip added.");
        assert_eq!(card.position, Some((3, 5)));
    }

    #[test]
    fn test_practice_card_hides_answer() {
        let e = entry("W handshape near mouth.");

        let hidden = PracticeCard::new(Some(&e), false);
        assert_eq!(hidden.word, "Water");
        assert!(hidden.meaning.is_none());
        assert!(hidden.note.is_none());
        assert_eq!(hidden.reveal_label(), "Reveal");

        let shown = PracticeCard::new(Some(&e), true);
        assert_eq!(shown.meaning.as_deref(), Some("Ask for a drink"));
        assert_eq!(shown.note.as_deref(), Some("W handshape near mouth."));
        assert_eq!(shown.reveal_label(), "Hide");
    }

    #[test]
    fn test_manage_row() {
        let row = ManageRow::new(&entry(""));
        assert_eq!(row.meta(), "Needs \u{2022} Easy");
        assert!(row.tip.is_none());
        assert!(!row.has_image);
    }
}
