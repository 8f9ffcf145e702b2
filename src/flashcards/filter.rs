//! Search and category filtering over the library

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::models::{FlashcardEntry, DEFAULT_CATEGORY};

/// Selector value meaning "every category"
pub const ALL_CATEGORIES: &str = "all";

/// Category selector
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, entry: &FlashcardEntry) -> bool {
        match self {
            CategoryFilter::All => true,
            // Exact, case-sensitive comparison
            CategoryFilter::Only(category) => entry.category == *category,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(category) => category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Only(category) => category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current search text and category selection
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    pub category: CategoryFilter,
}

impl FilterState {
    pub fn new(query: impl Into<String>, category: impl Into<CategoryFilter>) -> Self {
        Self {
            query: query.into(),
            category: category.into(),
        }
    }

    pub fn matches(&self, entry: &FlashcardEntry) -> bool {
        self.category.matches(entry) && matches_query(entry, &normalize_query(&self.query))
    }
}

/// Entries of the library that pass the current filter, in library order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView {
    entries: Vec<FlashcardEntry>,
}

impl FilteredView {
    pub fn entries(&self) -> &[FlashcardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FlashcardEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlashcardEntry> {
        self.entries.iter()
    }
}

/// Filter `library` by `filter`, keeping library order
pub fn apply(library: &[FlashcardEntry], filter: &FilterState) -> FilteredView {
    let query = normalize_query(&filter.query);
    let entries = library
        .iter()
        .filter(|entry| filter.category.matches(entry) && matches_query(entry, &query))
        .cloned()
        .collect();
    FilteredView { entries }
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Case-insensitive substring match on word, meaning and note.
/// `query` must already be trimmed and lower-cased.
fn matches_query(entry: &FlashcardEntry, query: &str) -> bool {
    query.is_empty()
        || entry.word.to_lowercase().contains(query)
        || entry.meaning.to_lowercase().contains(query)
        || entry.note.to_lowercase().contains(query)
}

/// Selector options: `"all"` followed by every distinct category, sorted
pub fn available_categories(library: &[FlashcardEntry]) -> Vec<String> {
    let distinct: BTreeSet<&str> = library
        .iter()
        .map(|entry| {
            let category = entry.category.trim();
            if category.is_empty() {
                DEFAULT_CATEGORY
            } else {
                category
            }
        })
        .collect();

    let mut categories: Vec<&str> = distinct.into_iter().collect();
    categories.sort_by(|a, b| compare_categories(a, b));

    std::iter::once(ALL_CATEGORIES)
        .chain(categories)
        .map(str::to_string)
        .collect()
}

fn compare_categories(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Keep `selected` if the library still has it, otherwise fall back to all
pub fn reconcile(selected: &CategoryFilter, library: &[FlashcardEntry]) -> CategoryFilter {
    match selected {
        CategoryFilter::All => CategoryFilter::All,
        CategoryFilter::Only(category) => {
            if available_categories(library).iter().any(|c| c == category) {
                selected.clone()
            } else {
                log::debug!("Category '{}' no longer exists, showing all", category);
                CategoryFilter::All
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::seed::default_library;

    fn entry(word: &str, meaning: &str, category: &str, note: &str) -> FlashcardEntry {
        FlashcardEntry::new(word, meaning, category, "", note, None)
    }

    fn words(view: &FilteredView) -> Vec<&str> {
        view.iter().map(|e| e.word.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let library = default_library();
        let view = apply(&library, &FilterState::default());
        assert_eq!(view.entries(), library.as_slice());
    }

    #[test]
    fn test_category_filter() {
        let library = default_library();
        let view = apply(&library, &FilterState::new("", "Family"));
        assert_eq!(words(&view), vec!["Mom", "Dad"]);

        // Case-sensitive
        let view = apply(&library, &FilterState::new("", "family"));
        assert!(view.is_empty());
    }

    #[test]
    fn test_query_matches_word_meaning_and_note() {
        let library = vec![
            entry("Cat", "Animal", "Animals", ""),
            entry("Dog", "Barks", "Animals", "Pat your leg"),
            entry("Milk", "Drink", "Needs", "Squeeze like a CATtle udder"),
            entry("Sun", "Cat-free", "Nature", ""),
            entry("Fish", "Swims", "cat", ""),
        ];

        let view = apply(&library, &FilterState::new("  CAT ", "all"));
        // Category text is not searched
        assert_eq!(words(&view), vec!["Cat", "Milk", "Sun"]);

        let view = apply(&library, &FilterState::new("leg", "all"));
        assert_eq!(words(&view), vec!["Dog"]);
    }

    #[test]
    fn test_query_and_category_combine() {
        let library = default_library();
        let view = apply(&library, &FilterState::new("feeling", "Feelings"));
        assert_eq!(words(&view), vec!["Sad", "Happy"]);

        let view = apply(&library, &FilterState::new("feeling", "Basics"));
        assert!(view.is_empty());
    }

    #[test]
    fn test_filter_matches_agrees_with_apply() {
        let library = default_library();
        let queries = ["", "th", "MOUTH", "zzz", " a "];
        let categories = ["all", "Basics", "Needs", "Nope"];

        for q in queries {
            for c in categories {
                let filter = FilterState::new(q, c);
                let view = apply(&library, &filter);
                let expected: Vec<&FlashcardEntry> =
                    library.iter().filter(|e| filter.matches(e)).collect();
                assert_eq!(view.iter().collect::<Vec<_>>(), expected);
            }
        }
    }

    #[test]
    fn test_available_categories() {
        let library = default_library();
        assert_eq!(
            available_categories(&library),
            vec!["all", "Basics", "Family", "Feelings", "Needs"]
        );
    }

    #[test]
    fn test_available_categories_trims_and_sorts_case_insensitively() {
        let mut library = vec![
            entry("A", "", "zoo", ""),
            entry("B", "", "Apple", ""),
            entry("C", "", "banana", ""),
            entry("D", "", "Apple", ""),
        ];
        library[0].category = " zoo ".to_string();
        library[1].category = "   ".to_string();

        assert_eq!(
            available_categories(&library),
            vec!["all", "Apple", "banana", "Custom", "zoo"]
        );
        assert_eq!(available_categories(&[]), vec!["all"]);
    }

    #[test]
    fn test_reconcile_falls_back_to_all() {
        let library = default_library();
        let family = CategoryFilter::from("Family");
        assert_eq!(reconcile(&family, &library), family);

        let gone = CategoryFilter::from("Animals");
        assert_eq!(reconcile(&gone, &library), CategoryFilter::All);
        assert_eq!(reconcile(&CategoryFilter::All, &[]), CategoryFilter::All);
    }

    #[test]
    fn test_category_filter_string_forms() {
        assert_eq!(CategoryFilter::from("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::All.to_string(), "all");
        assert_eq!(
            serde_json::to_string(&CategoryFilter::Only("Needs".into())).unwrap(),
            "\"Needs\""
        );
        let parsed: CategoryFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(parsed, CategoryFilter::All);
    }
}
