//! Image inputs for card pictures and the profile photo.
//!
//! An [`ImageInput`] (a file on disk or raw bytes) is resolved into an
//! [`ImageData`] data URL that is stored inline in the JSON documents and can
//! be handed straight to a renderer.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to read image {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image is empty")]
    Empty,
}

/// Known image extensions and their MIME types
const IMAGE_MIME_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("svg", "image/svg+xml"),
];

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// A picture supplied by the user, not yet resolved into storable form
#[derive(Debug, Clone)]
pub enum ImageInput {
    /// Image file on disk
    File(PathBuf),
    /// Raw bytes with an optional MIME type (sniffed when absent)
    Bytes { data: Vec<u8>, mime_type: Option<String> },
}

impl ImageInput {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Read the input and encode it as a data URL.
    ///
    /// Nothing is returned until the whole input has been read, so callers can
    /// resolve first and only then mutate their state.
    pub fn resolve(&self) -> Result<ImageData, ImageError> {
        let (data, mime_type) = match self {
            ImageInput::File(path) => {
                let data = fs::read(path).map_err(|source| ImageError::Read {
                    path: path.clone(),
                    source,
                })?;
                let mime_type = mime_type_for_path(path)
                    .or_else(|| sniff_mime_type(&data))
                    .unwrap_or(FALLBACK_MIME_TYPE)
                    .to_string();
                (data, mime_type)
            }
            ImageInput::Bytes { data, mime_type } => {
                let mime_type = mime_type
                    .clone()
                    .or_else(|| sniff_mime_type(data).map(str::to_string))
                    .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string());
                (data.clone(), mime_type)
            }
        };

        if data.is_empty() {
            return Err(ImageError::Empty);
        }

        Ok(ImageData(format!(
            "data:{};base64,{}",
            mime_type,
            BASE64.encode(&data)
        )))
    }
}

/// Self-contained `data:` URL holding an image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageData(String);

impl ImageData {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// MIME type embedded in the URL, if it has one
    pub fn mime_type(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let end = rest.find(|c| c == ';' || c == ',')?;
        let mime = &rest[..end];
        if mime.is_empty() {
            None
        } else {
            Some(mime)
        }
    }

    /// Approximate decoded size in bytes
    pub fn byte_len(&self) -> usize {
        match self.0.split_once(',') {
            Some((_, payload)) => payload.len() / 4 * 3,
            None => 0,
        }
    }
}

impl fmt::Display for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mime_type() {
            Some(mime) => write!(f, "[{} image, {} bytes]", mime, self.byte_len()),
            None => write!(f, "[image]"),
        }
    }
}

fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    IMAGE_MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

fn sniff_mime_type(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        Some("image/webp")
    } else if data.starts_with(b"BM") {
        Some("image/bmp")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    #[test]
    fn test_resolve_file_uses_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wave.JPG");
        fs::write(&path, b"not really a jpeg").unwrap();

        let data = ImageInput::from_path(&path).resolve().unwrap();
        assert!(data.as_str().starts_with("data:image/jpeg;base64,"));
        assert_eq!(data.mime_type(), Some("image/jpeg"));
    }

    #[test]
    fn test_resolve_bytes_sniffs_png() {
        let input = ImageInput::Bytes {
            data: PNG_HEADER.to_vec(),
            mime_type: None,
        };
        let data = input.resolve().unwrap();
        assert_eq!(data.mime_type(), Some("image/png"));
        assert_eq!(
            data.as_str(),
            format!("data:image/png;base64,{}", BASE64.encode(PNG_HEADER))
        );
    }

    #[test]
    fn test_resolve_unknown_bytes_fall_back() {
        let input = ImageInput::Bytes {
            data: vec![1, 2, 3],
            mime_type: None,
        };
        let data = input.resolve().unwrap();
        assert_eq!(data.mime_type(), Some(FALLBACK_MIME_TYPE));
    }

    #[test]
    fn test_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let result = ImageInput::from_path(temp.path().join("missing.png")).resolve();
        assert!(matches!(result, Err(ImageError::Read { .. })));
    }

    #[test]
    fn test_empty_input_fails() {
        let input = ImageInput::Bytes {
            data: Vec::new(),
            mime_type: Some("image/png".to_string()),
        };
        assert!(matches!(input.resolve(), Err(ImageError::Empty)));
    }

    #[test]
    fn test_display_summarizes() {
        let input = ImageInput::Bytes {
            data: vec![0u8; 30],
            mime_type: Some("image/gif".to_string()),
        };
        let data = input.resolve().unwrap();
        assert_eq!(data.to_string(), "[image/gif image, 30 bytes]");
    }
}
