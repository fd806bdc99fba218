//! Image-source acceptance
//!
//! Dropped files, pasted image data, URIs and the empty placeholder are all
//! normalized to one string before they reach an image commit. Non-image
//! input is rejected here, so it never changes any state.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::Path;
use thiserror::Error;

/// An image offered by the user
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// No source yet
    Placeholder,

    /// A URL, path or data URI used verbatim
    Uri(String),

    /// Pasted image data
    Data { mime: Option<String>, bytes: Vec<u8> },

    /// A dropped file
    File {
        name: String,
        mime: Option<String>,
        bytes: Vec<u8>,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImageError {
    #[error("{name} is not an image (type: {})", .mime.as_deref().unwrap_or("unknown"))]
    NotAnImage { name: String, mime: Option<String> },

    #[error("Data URI does not contain an image: {0}")]
    NotAnImageUri(String),
}

impl ImageSource {
    /// Read a dropped file from disk
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(ImageSource::File {
            name,
            mime: None,
            bytes,
        })
    }

    /// Normalize to the string stored as the image source
    pub fn normalize(&self) -> Result<String, ImageError> {
        match self {
            ImageSource::Placeholder => Ok(String::new()),
            ImageSource::Uri(uri) => normalize_uri(uri),
            ImageSource::Data { mime, bytes } => {
                let mime = resolve_mime(mime.as_deref(), None, bytes).ok_or_else(|| {
                    ImageError::NotAnImage {
                        name: "pasted data".to_string(),
                        mime: mime.clone(),
                    }
                })?;
                Ok(data_uri(&mime, bytes))
            }
            ImageSource::File { name, mime, bytes } => {
                let resolved = resolve_mime(mime.as_deref(), Some(name), bytes).ok_or_else(|| {
                    ImageError::NotAnImage {
                        name: name.clone(),
                        mime: mime.clone(),
                    }
                })?;
                Ok(data_uri(&resolved, bytes))
            }
        }
    }
}

fn normalize_uri(uri: &str) -> Result<String, ImageError> {
    let uri = uri.trim();

    if let Some(rest) = strip_prefix_ignore_case(uri, "data:") {
        if !rest.to_ascii_lowercase().starts_with("image/") {
            let shown: String = uri.chars().take(32).collect();
            return Err(ImageError::NotAnImageUri(shown));
        }
    }

    Ok(uri.to_string())
}

/// A declared type decides on its own; without one, file extension then magic bytes
fn resolve_mime(declared: Option<&str>, name: Option<&str>, bytes: &[u8]) -> Option<String> {
    if let Some(mime) = declared {
        let mime = mime.trim().to_ascii_lowercase();
        return mime.starts_with("image/").then_some(mime);
    }

    if let Some(mime) = name.and_then(mime_from_extension) {
        return Some(mime.to_string());
    }

    image::guess_format(bytes)
        .ok()
        .map(|format| format.to_mime_type().to_string())
}

fn mime_from_extension(name: &str) -> Option<&'static str> {
    let extension = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();

    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        _ => return None,
    };
    Some(mime)
}

fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    let head = value.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &value[prefix.len()..])
}
