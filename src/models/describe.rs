use crate::error::{GenerationError, Result};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

/// An image description request carrying the photo as a data URI in the form
/// `data:<mimetype>;base64,<encoded_data>`.
#[derive(Debug, Clone, Deserialize)]
pub struct DescribeRequest {
    pub photo_data_uri: String,
}

/// The decoded parts of a validated data URI, ready to be sent as
/// `inlineData` to the vision model.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl DescribeRequest {
    pub fn new(photo_data_uri: impl Into<String>) -> Self {
        Self {
            photo_data_uri: photo_data_uri.into(),
        }
    }

    /// Builds a request from raw image bytes and a declared MIME type.
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        let encoded = general_purpose::STANDARD.encode(bytes);
        Self {
            photo_data_uri: format!("data:{};base64,{}", mime_type, encoded),
        }
    }

    /// Validates the data URI and splits it into MIME type and base64
    /// payload. Fails with `InvalidImageFormat` when the `data:` prefix, the
    /// MIME type, the `;base64,` marker, or base64 validity is missing. This
    /// runs locally, before any network call.
    pub fn image_payload(&self) -> Result<ImagePayload> {
        let uri = self.photo_data_uri.trim();
        let rest = uri.strip_prefix("data:").ok_or_else(|| {
            GenerationError::InvalidImageFormat(
                "expected a 'data:<mimetype>;base64,<data>' URI".to_string(),
            )
        })?;

        let (mime_type, data) = rest.split_once(";base64,").ok_or_else(|| {
            GenerationError::InvalidImageFormat("missing ';base64,' marker".to_string())
        })?;

        if mime_type.is_empty() {
            return Err(GenerationError::InvalidImageFormat(
                "missing MIME type".to_string(),
            ));
        }

        general_purpose::STANDARD.decode(data).map_err(|e| {
            GenerationError::InvalidImageFormat(format!("payload is not valid base64: {}", e))
        })?;

        Ok(ImagePayload {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeResult {
    pub description: String,
}
