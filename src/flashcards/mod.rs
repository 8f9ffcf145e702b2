//! Flashcard library for signcoach
//!
//! This module provides:
//! - The flashcard entry model and the default starter cards
//! - The library repository (ordered CRUD, persisted as one JSON document)
//! - Search and category filtering
//! - Browse and practice cursors over a filtered view

pub mod cursor;
pub mod filter;
pub mod models;
pub mod repository;
pub mod seed;

pub use cursor::{BrowseCursor, PracticeSession, DEFAULT_MAX_REDRAWS};
pub use filter::{apply, available_categories, reconcile, CategoryFilter, FilterState, FilteredView, ALL_CATEGORIES};
pub use models::*;
pub use repository::{LibraryRepository, RepositoryError};
pub use seed::default_library;
