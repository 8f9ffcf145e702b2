//! The starter library installed on first run or after a reset

use super::models::FlashcardEntry;

/// (word, meaning, category, difficulty, tip)
const DEFAULT_CARDS: [(&str, &str, &str, &str, &str); 13] = [
    ("Hello", "Greeting", "Basics", "Easy", "Smile and wave."),
    ("Thank you", "Gratitude", "Basics", "Easy", "Hand from chin outward."),
    ("Please", "Polite request", "Basics", "Easy", "Circular motion on chest."),
    ("Yes", "Agree", "Basics", "Easy", "Make a fist and nod it."),
    ("No", "Disagree", "Basics", "Easy", "Index+middle finger tap thumb."),
    ("Help", "Need assistance", "Needs", "Easy", "Thumb up on palm; lift."),
    ("Water", "Ask for a drink", "Needs", "Easy", "W handshape near mouth."),
    ("Eat", "I want food", "Needs", "Easy", "Bring fingers to mouth."),
    ("Toilet", "Bathroom", "Needs", "Medium", "T handshake wiggle."),
    ("Mom", "Mother", "Family", "Easy", "Thumb to chin."),
    ("Dad", "Father", "Family", "Easy", "Thumb to forehead."),
    ("Sad", "Feeling down", "Feelings", "Easy", "Hands pull down cheeks."),
    ("Happy", "Feeling good", "Feelings", "Easy", "Brush chest upward."),
];

/// Fresh copy of the default cards, each with a new id
pub fn default_library() -> Vec<FlashcardEntry> {
    DEFAULT_CARDS
        .iter()
        .map(|(word, meaning, category, difficulty, note)| {
            FlashcardEntry::new(word, meaning, category, difficulty, note, None)
        })
        .collect()
}
