//! Runtime state shared by the three views (Learn, Practice, Manage).
//!
//! [`Session`] owns the repository, the profile and every derived value. Each
//! handler takes typed input, updates state and recomputes the filtered view,
//! so shells only translate their events into handler calls and draw the
//! display models.

pub mod display;

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;
use crate::flashcards::{
    apply, available_categories, reconcile, BrowseCursor, CategoryFilter, EntryInput,
    EntryUpdate, FilterState, FilteredView, FlashcardEntry, LibraryRepository,
    PracticeSession, RepositoryError,
};
use crate::image::ImageInput;
use crate::profile::{Profile, ProfileError, ProfileManager};
use crate::shell::ShellStatus;
use crate::store::SharedStore;

pub use display::{LearnCard, ManageRow, PracticeCard};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// The active screen; exactly one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Learn,
    Practice,
    Manage,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Learn, ViewMode::Practice, ViewMode::Manage];

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Learn => "Learn",
            ViewMode::Practice => "Practice",
            ViewMode::Manage => "Manage",
        }
    }

    /// The view after this one, wrapping around
    pub fn next(&self) -> ViewMode {
        match self {
            ViewMode::Learn => ViewMode::Practice,
            ViewMode::Practice => ViewMode::Manage,
            ViewMode::Manage => ViewMode::Learn,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub struct Session {
    library: LibraryRepository,
    profiles: ProfileManager,
    profile: Option<Profile>,
    filter: FilterState,
    view: FilteredView,
    categories: Vec<String>,
    browse: BrowseCursor,
    practice: PracticeSession,
    mode: ViewMode,
    shell: ShellStatus,
    rng: StdRng,
}

impl Session {
    /// Load library and profile from `store` and start on the Learn view
    pub fn open(store: SharedStore, config: &AppConfig) -> Result<Self> {
        Self::open_with_rng(store, config, StdRng::from_entropy())
    }

    /// Same as [`open`](Self::open) with a caller-provided random source
    pub fn open_with_rng(store: SharedStore, config: &AppConfig, rng: StdRng) -> Result<Self> {
        let library = LibraryRepository::open(store.clone(), config.storage.library_key.as_str())?;
        let profiles = ProfileManager::new(store, config.storage.profile_key.as_str());
        let profile = profiles.load();

        let mut session = Self {
            library,
            profiles,
            profile,
            filter: FilterState::default(),
            view: FilteredView::default(),
            categories: Vec::new(),
            browse: BrowseCursor::new(),
            practice: PracticeSession::new(config.practice.max_redraws),
            mode: ViewMode::Learn,
            // Everything is local, so the app starts usable
            shell: ShellStatus::new(true),
            rng,
        };
        session.library_changed();
        Ok(session)
    }

    // ===== Read access =====

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    /// Category selector options, `"all"` first
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn library(&self) -> &[FlashcardEntry] {
        self.library.entries()
    }

    pub fn entry(&self, id: &str) -> Option<&FlashcardEntry> {
        self.library.get(id)
    }

    pub fn browse_index(&self) -> usize {
        self.browse.index()
    }

    /// Card under the Learn cursor
    pub fn current_card(&self) -> Option<&FlashcardEntry> {
        self.browse.current(&self.view)
    }

    pub fn practice(&self) -> &PracticeSession {
        &self.practice
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn subtitle(&self) -> String {
        Profile::subtitle(self.profile.as_ref())
    }

    pub fn shell(&self) -> &ShellStatus {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut ShellStatus {
        &mut self.shell
    }

    // ===== Display models =====

    pub fn learn_card(&self) -> LearnCard {
        LearnCard::new(self.current_card(), self.browse.index(), self.view.len())
    }

    pub fn practice_card(&self) -> PracticeCard {
        PracticeCard::new(self.practice.current(), self.practice.is_revealed())
    }

    pub fn manage_rows(&self) -> Vec<ManageRow> {
        self.view.iter().map(ManageRow::new).collect()
    }

    // ===== Filtering =====

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.refresh();
    }

    /// Select a category; one the library does not have falls back to all
    pub fn set_category(&mut self, category: impl Into<CategoryFilter>) {
        self.filter.category = reconcile(&category.into(), self.library.entries());
        self.refresh();
    }

    /// Move the category selector to the next option, wrapping around
    pub fn cycle_category(&mut self) {
        let current = self.filter.category.as_str();
        let pos = self.categories.iter().position(|c| c == current).unwrap_or(0);
        let next = self.categories[(pos + 1) % self.categories.len()].clone();
        self.set_category(next);
    }

    // ===== Views =====

    /// Make `mode` the active view; entering Practice draws a new card
    pub fn switch_view(&mut self, mode: ViewMode) {
        self.mode = mode;
        if mode == ViewMode::Practice {
            self.practice.draw(&self.view, &mut self.rng);
        }
    }

    // ===== Learn =====

    pub fn next_card(&mut self) {
        self.browse.next(self.view.len());
    }

    pub fn prev_card(&mut self) {
        self.browse.prev(self.view.len());
    }

    pub fn shuffle_card(&mut self) {
        self.browse.shuffle(self.view.len(), &mut self.rng);
    }

    pub fn jump_to(&mut self, index: usize) {
        self.browse.jump(index, self.view.len());
    }

    // ===== Practice =====

    pub fn practice_next(&mut self) -> Option<&FlashcardEntry> {
        self.practice.draw(&self.view, &mut self.rng)
    }

    pub fn toggle_reveal(&mut self) {
        self.practice.toggle_reveal();
    }

    // ===== Manage =====

    pub fn add_entry(&mut self, input: EntryInput) -> Result<FlashcardEntry> {
        let entry = self.library.add(input)?;
        self.library_changed();
        Ok(entry)
    }

    pub fn update_entry(&mut self, id: &str, update: EntryUpdate) -> Result<Option<FlashcardEntry>> {
        let updated = self.library.update(id, update)?;
        if updated.is_some() {
            self.library_changed();
        }
        Ok(updated)
    }

    pub fn remove_entry(&mut self, id: &str) -> Result<bool> {
        let removed = self.library.remove(id)?;
        if removed {
            self.library_changed();
        }
        Ok(removed)
    }

    pub fn reset_library(&mut self) -> Result<()> {
        self.library.reset()?;
        self.library_changed();
        Ok(())
    }

    pub fn import_library(&mut self, json: &str) -> Result<usize> {
        let count = self.library.import_json(json)?;
        self.library_changed();
        Ok(count)
    }

    pub fn export_library(&self) -> Result<String> {
        Ok(self.library.export_json()?)
    }

    // ===== Profile =====

    pub fn save_profile(&mut self, name: &str, photo: Option<&ImageInput>) -> Result<&Profile> {
        let profile = self.profiles.save(name, photo)?;
        Ok(self.profile.insert(profile))
    }

    pub fn clear_profile(&mut self) -> Result<bool> {
        let removed = self.profiles.clear()?;
        self.profile = None;
        Ok(removed)
    }

    // ===== Internals =====

    fn library_changed(&mut self) {
        self.categories = available_categories(self.library.entries());
        self.filter.category = reconcile(&self.filter.category, self.library.entries());
        self.refresh();
    }

    /// Recompute the filtered view and keep the cursors valid
    pub fn refresh(&mut self) {
        self.view = apply(self.library.entries(), &self.filter);
        self.browse.clamp(self.view.len());
        if self.mode == ViewMode::Practice {
            self.practice.draw(&self.view, &mut self.rng);
        }
    }
}
