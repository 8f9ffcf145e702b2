use std::path::PathBuf;

use signcoach_lib::flashcards::{EntryInput, EntryUpdate};
use signcoach_lib::image::ImageInput;
use signcoach_lib::session::ManageRow;
use signcoach_lib::ViewMode;

use crate::app::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Search,
    AddCard,
    EditCard,
    ProfileName,
    ConfirmReset,
}

pub struct TuiState {
    pub app: App,
    pub mode: Mode,

    // Manage list selection, an index into the filtered rows
    pub manage_selected: usize,

    // Card being changed in EditCard
    pub edit_target: Option<String>,

    // Text typed in Search / AddCard / EditCard / ProfileName
    pub input_text: String,
    pub flash_message: Option<String>,

    pub show_help: bool,
    pub quit: bool,
}

impl TuiState {
    pub fn new(app: App) -> Self {
        Self {
            app,
            mode: Mode::Normal,
            manage_selected: 0,
            edit_target: None,
            input_text: String::new(),
            flash_message: None,
            show_help: false,
            quit: false,
        }
    }

    pub fn view(&self) -> ViewMode {
        self.app.session.mode()
    }

    pub fn switch_view(&mut self, mode: ViewMode) {
        self.app.session.switch_view(mode);
        self.clamp_selection();
    }

    pub fn manage_rows(&self) -> Vec<ManageRow> {
        self.app.session.manage_rows()
    }

    pub fn manage_move_down(&mut self) {
        let len = self.app.session.view().len();
        if len > 0 && self.manage_selected < len - 1 {
            self.manage_selected += 1;
        }
    }

    pub fn manage_move_up(&mut self) {
        self.manage_selected = self.manage_selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.app.session.view().len();
        if self.manage_selected >= len {
            self.manage_selected = len.saturating_sub(1);
        }
    }

    pub fn start_search(&mut self) {
        self.input_text = self.app.session.filter().query.clone();
        self.mode = Mode::Search;
    }

    /// Re-filter on every keystroke
    pub fn update_search(&mut self) {
        self.app.session.set_query(self.input_text.clone());
        self.clamp_selection();
    }

    pub fn cycle_category(&mut self) {
        self.app.session.cycle_category();
        self.clamp_selection();
        self.flash_message = Some(format!("Category: {}", self.app.session.filter().category));
    }

    pub fn delete_selected(&mut self) {
        let selected = self
            .app
            .session
            .view()
            .get(self.manage_selected)
            .map(|e| (e.id.clone(), e.word.clone()));
        let Some((id, word)) = selected else {
            return;
        };

        match self.app.session.remove_entry(&id) {
            Ok(true) => self.flash_message = Some(format!("Deleted \"{}\"", word)),
            Ok(false) => {}
            Err(e) => self.flash_message = Some(format!("Error: {}", e)),
        }
        self.clamp_selection();
    }

    /// Add a card from "word; meaning; category; difficulty; note"
    pub fn add_from_input(&mut self) {
        let Some(input) = parse_card_input(&self.input_text) else {
            self.flash_message = Some("A word is required".to_string());
            return;
        };

        let word = input.word.clone();
        match self.app.session.add_entry(input) {
            Ok(_) => {
                self.flash_message = Some(format!("Added \"{}\"", word.trim()));
                self.manage_selected = 0;
            }
            Err(e) => self.flash_message = Some(format!("Error: {}", e)),
        }

        self.input_text.clear();
        self.mode = Mode::Normal;
    }

    /// Open the selected card in the prompt as "word; meaning; category; difficulty; note"
    pub fn start_edit(&mut self) {
        let Some(entry) = self.app.session.view().get(self.manage_selected) else {
            return;
        };

        self.input_text = format!(
            "{}; {}; {}; {}; {}",
            entry.word, entry.meaning, entry.category, entry.difficulty, entry.note
        );
        self.edit_target = Some(entry.id.clone());
        self.mode = Mode::EditCard;
    }

    /// Save the prompt over the card being edited; the picture is only
    /// replaced when an `@path` field is given
    pub fn save_edit_from_input(&mut self) {
        let Some(id) = self.edit_target.clone() else {
            self.mode = Mode::Normal;
            return;
        };
        let Some(input) = parse_card_input(&self.input_text) else {
            self.flash_message = Some("A word is required".to_string());
            return;
        };

        let word = input.word.clone();
        let update = EntryUpdate {
            word: Some(input.word),
            meaning: Some(input.meaning),
            category: Some(input.category),
            difficulty: Some(input.difficulty),
            note: Some(input.note),
            image: input.image,
        };

        match self.app.session.update_entry(&id, update) {
            Ok(Some(_)) => self.flash_message = Some(format!("Saved \"{}\"", word)),
            Ok(None) => self.flash_message = Some("That card no longer exists".to_string()),
            Err(e) => {
                // Keep the prompt open so the path can be corrected
                self.flash_message = Some(format!("Error: {}", e));
                return;
            }
        }

        self.edit_target = None;
        self.input_text.clear();
        self.mode = Mode::Normal;
        self.clamp_selection();
    }

    pub fn start_profile_edit(&mut self) {
        self.input_text = self
            .app
            .session
            .profile()
            .map(|p| p.name.clone())
            .unwrap_or_default();
        self.mode = Mode::ProfileName;
    }

    pub fn save_profile_from_input(&mut self) {
        let name = self.input_text.clone();
        match self.app.session.save_profile(&name, None) {
            Ok(_) => self.flash_message = Some("Profile saved".to_string()),
            Err(e) => self.flash_message = Some(format!("Error: {}", e)),
        }

        self.input_text.clear();
        self.mode = Mode::Normal;
    }

    pub fn reset_library(&mut self) {
        match self.app.session.reset_library() {
            Ok(()) => {
                self.flash_message = Some(format!(
                    "Library reset to {} cards",
                    self.app.session.library().len()
                ));
                self.manage_selected = 0;
            }
            Err(e) => self.flash_message = Some(format!("Error: {}", e)),
        }
        self.mode = Mode::Normal;
    }
}

/// Split the card prompt into fields. Missing trailing fields stay blank
/// and pick up their defaults when the entry is built. A last field of the
/// form `@path` names a picture file.
pub fn parse_card_input(text: &str) -> Option<EntryInput> {
    let (text, image) = match text.rsplit_once(';') {
        Some((rest, last)) if last.trim().starts_with('@') => {
            let path = last.trim().trim_start_matches('@').trim();
            (rest, (!path.is_empty()).then(|| ImageInput::File(PathBuf::from(path))))
        }
        _ => (text, None),
    };

    let mut parts = text.splitn(5, ';').map(|p| p.trim().to_string());
    let word = parts.next().filter(|w| !w.is_empty())?;

    Some(EntryInput {
        word,
        meaning: parts.next().unwrap_or_default(),
        category: parts.next().unwrap_or_default(),
        difficulty: parts.next().unwrap_or_default(),
        note: parts.next().unwrap_or_default(),
        image,
    })
}
