use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::domain::DomainError;

pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Standard alphabet, padding optional.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decoded image bytes ready to be attached to a generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    mime_type: String,
    data: Vec<u8>,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Decode either bare base64 or a `data:<mime>;base64,<data>` URL as
    /// produced by a browser file reader. The URL's MIME type is kept
    /// without its parameters; bare base64 is assumed to be JPEG. Padding
    /// is optional and embedded whitespace (line wrapping) is ignored.
    pub fn from_base64(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        let (mime_type, encoded) = match raw.strip_prefix("data:") {
            Some(rest) => {
                let (header, data) = rest.split_once(',').ok_or_else(|| {
                    DomainError::invalid_input("data URL has no ',' separator")
                })?;
                let mime = header
                    .split(';')
                    .next()
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .unwrap_or(DEFAULT_IMAGE_MIME);
                (mime, data)
            }
            None => (DEFAULT_IMAGE_MIME, raw),
        };

        let encoded: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
        if encoded.is_empty() {
            return Err(DomainError::invalid_input("image payload is empty"));
        }

        let data = LENIENT_BASE64.decode(&encoded).map_err(|e| {
            DomainError::invalid_input(format!("image payload is not base64: {e}"))
        })?;

        Ok(Self::new(mime_type, data))
    }

    /// Guess the MIME type from a file extension, defaulting to JPEG.
    pub fn mime_for_extension(ext: &str) -> &'static str {
        match ext.to_lowercase().as_str() {
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "heic" => "image/heic",
            _ => DEFAULT_IMAGE_MIME,
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
