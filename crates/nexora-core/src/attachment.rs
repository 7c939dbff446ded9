//! Attachment blob codec
//!
//! Transactions may carry one attachment (a receipt photo or bill scan)
//! stored inline as a self-describing data URL:
//! `data:<mime>;base64,<payload>`. The blob travels with the record through
//! both backends, so the size cap is enforced before encoding.

use base64::Engine;

use crate::error::{Error, Result};

/// Largest accepted attachment payload (5 MB, matching the reference UI cap)
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// A decoded attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// MIME type, e.g. `image/png` or `application/pdf`
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// Encode as a data URL, rejecting oversized payloads
    pub fn to_data_url(&self) -> Result<String> {
        if self.bytes.len() > MAX_ATTACHMENT_BYTES {
            return Err(Error::Attachment(format!(
                "File too large: {} bytes (max {} allowed)",
                self.bytes.len(),
                MAX_ATTACHMENT_BYTES
            )));
        }
        let payload = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        Ok(format!("data:{};base64,{}", self.mime, payload))
    }

    /// Parse a data URL produced by [`Attachment::to_data_url`]
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| Error::Attachment("Not a data URL".to_string()))?;
        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| Error::Attachment("Missing base64 payload".to_string()))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| Error::Attachment(format!("Invalid base64 payload: {}", e)))?;
        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }
}
