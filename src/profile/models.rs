use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::image::ImageData;

/// Shown under the title when no name is set
pub const DEFAULT_SUBTITLE: &str = "Personalized learning";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "photoDataUrl")]
    pub photo: Option<ImageData>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(name: &str, photo: Option<ImageData>) -> Self {
        Self {
            name: name.trim().to_string(),
            photo,
            updated_at: Utc::now(),
        }
    }

    /// Header line for the app, e.g. "Teaching Ana"
    pub fn subtitle(profile: Option<&Profile>) -> String {
        match profile {
            Some(p) if !p.name.is_empty() => format!("Teaching {}", p.name),
            _ => DEFAULT_SUBTITLE.to_string(),
        }
    }
}
