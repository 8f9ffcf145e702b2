//! signcoach: offline sign-language flashcards for teaching a child.
//!
//! The library holds everything except drawing: persistence, the card
//! repository, filtering, browse/practice cursors, the child's profile and the
//! [`session::Session`] that ties them together for the Learn, Practice and
//! Manage views. The `signcoach-cli` binary is the shell on top.

pub mod config;
pub mod flashcards;
pub mod image;
pub mod profile;
pub mod session;
pub mod shell;
pub mod store;

pub use config::AppConfig;
pub use session::{Session, SessionError, ViewMode};
