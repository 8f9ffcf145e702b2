//! Positions within a filtered view: sequential browsing for the Learn view
//! and random draws for the Practice view.

use rand::Rng;

use super::filter::FilteredView;
use super::models::FlashcardEntry;

/// Default number of re-draws spent avoiding an immediate repeat
pub const DEFAULT_MAX_REDRAWS: usize = 6;

/// Index into the filtered view for the Learn view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowseCursor {
    index: usize,
}

impl BrowseCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Current entry, `None` when the view is empty
    pub fn current<'a>(&self, view: &'a FilteredView) -> Option<&'a FlashcardEntry> {
        view.get(self.index)
    }

    /// Advance with wraparound
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + 1) % len;
    }

    /// Step back with wraparound
    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + len - 1) % len;
    }

    /// Jump to a uniformly random position; no-op for one or zero entries
    pub fn shuffle<R: Rng>(&mut self, len: usize, rng: &mut R) {
        if len <= 1 {
            return;
        }
        self.index = rng.gen_range(0..len);
    }

    /// Jump to `index`, clamped into the view
    pub fn jump(&mut self, index: usize, len: usize) {
        self.index = index;
        self.clamp(len);
    }

    /// Pull the index back into `[0, len)` after the view changed
    pub fn clamp(&mut self, len: usize) {
        self.index = self.index.min(len.saturating_sub(1));
    }
}

/// Practice view state: the drawn card and whether its answer is shown
#[derive(Debug, Clone)]
pub struct PracticeSession {
    current: Option<FlashcardEntry>,
    revealed: bool,
    max_redraws: usize,
}

impl Default for PracticeSession {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REDRAWS)
    }
}

impl PracticeSession {
    pub fn new(max_redraws: usize) -> Self {
        Self {
            current: None,
            revealed: false,
            max_redraws,
        }
    }

    pub fn current(&self) -> Option<&FlashcardEntry> {
        self.current.as_ref()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn max_redraws(&self) -> usize {
        self.max_redraws
    }

    /// Draw a random card, hiding the answer.
    ///
    /// With more than one card the draw is repeated up to `max_redraws` times
    /// while it lands on the previous card; a repeat is still possible once
    /// that budget runs out.
    pub fn draw<R: Rng>(&mut self, view: &FilteredView, rng: &mut R) -> Option<&FlashcardEntry> {
        self.revealed = false;

        if view.is_empty() {
            self.current = None;
            return None;
        }

        let len = view.len();
        let mut pick = rng.gen_range(0..len);

        if let Some(previous) = &self.current {
            if len > 1 {
                let mut tries = 0;
                while view.entries()[pick].id == previous.id && tries < self.max_redraws {
                    pick = rng.gen_range(0..len);
                    tries += 1;
                }
                if tries > 0 {
                    log::debug!("Practice draw needed {} re-draws", tries);
                }
            }
        }

        self.current = Some(view.entries()[pick].clone());
        self.current.as_ref()
    }

    /// Show or hide the answer; ignored when nothing is drawn
    pub fn toggle_reveal(&mut self) {
        if self.current.is_some() {
            self.revealed = !self.revealed;
        }
    }

    /// Show the answer; ignored when nothing is drawn
    pub fn reveal(&mut self) {
        if self.current.is_some() {
            self.revealed = true;
        }
    }
}
