//! Image payloads for the analyzer.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::AnalysisError;

const DEFAULT_MIME: &str = "image/jpeg";

/// Raw image bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageInput {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Result<Self, AnalysisError> {
        if data.is_empty() {
            return Err(AnalysisError::InvalidImage("image is empty".into()));
        }
        Ok(Self {
            mime_type: mime_type.into(),
            data,
        })
    }

    /// Read an image file; the MIME type comes from the extension.
    pub fn from_path(path: &Path) -> Result<Self, AnalysisError> {
        let data = std::fs::read(path).map_err(|e| AnalysisError::ImageRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::new(mime_for_path(path), data)
    }

    /// Decode a `data:<mime>;base64,<payload>` URL or a bare base64 string.
    pub fn from_data_url(text: &str) -> Result<Self, AnalysisError> {
        let (mime, payload) = match text.split_once(',') {
            Some((header, payload)) => {
                let mime = header
                    .strip_prefix("data:")
                    .and_then(|rest| rest.split(';').next())
                    .filter(|m| !m.is_empty())
                    .unwrap_or(DEFAULT_MIME);
                (mime, payload)
            }
            None => (DEFAULT_MIME, text),
        };

        let data = STANDARD
            .decode(payload.trim())
            .map_err(|e| AnalysisError::InvalidImage(format!("base64 decode: {e}")))?;
        Self::new(mime, data)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

/// MIME type for a file extension; unknown extensions default to JPEG.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => DEFAULT_MIME,
    }
}
