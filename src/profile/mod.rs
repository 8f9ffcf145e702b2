//! The child's profile: display name and optional photo

mod models;
mod storage;

pub use models::Profile;
pub use storage::{ProfileError, ProfileManager};
