//! Response envelope schemas and generated-text extraction.
//!
//! The backend proxy wraps the model output in the upstream API's candidate
//! envelope. That shape is owned by a third party, so the envelope is
//! selectable: the typed Gemini schema by default, or a JSON pointer for
//! proxies that answer in a different shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FormatError;

/// JSON pointer equivalent of the Gemini candidate path.
pub const GEMINI_TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

/// How to locate the generated text in a response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeFormat {
    /// `candidates[0].content.parts[0].text`, validated against a typed schema.
    #[default]
    Gemini,
    /// An RFC 6901 JSON pointer that must resolve to a non-empty string.
    Pointer(String),
}

// ---------------------------------------------------------------------------
// Wire types (pub for integration testing)
// ---------------------------------------------------------------------------

/// Gemini `generateContent` response body.
#[doc(hidden)]
#[derive(Debug, Default, Deserialize)]
pub struct GeminiEnvelope {
    /// Generated candidates, best first.
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// A single generated candidate.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    /// Candidate content; absent when the candidate was blocked.
    #[serde(default)]
    pub content: Option<GeminiContent>,
}

/// Candidate content made of parts.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct GeminiContent {
    /// Content parts.
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// One content part.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct GeminiPart {
    /// Text payload, if this is a text part.
    #[serde(default)]
    pub text: Option<String>,
}

impl GeminiEnvelope {
    /// Text of the first part of the first candidate.
    ///
    /// # Errors
    ///
    /// Returns the name of the first missing segment.
    pub fn first_text(self) -> Result<String, &'static str> {
        let candidate = self.candidates.into_iter().next().ok_or("no candidates")?;
        let content = candidate.content.ok_or("candidate has no content")?;
        let part = content.parts.into_iter().next().ok_or("candidate has no parts")?;
        let text = part.text.ok_or("first part has no text")?;
        if text.is_empty() {
            return Err("first part text is empty");
        }
        Ok(text)
    }
}

impl EnvelopeFormat {
    /// Extract the generated text from a raw response body.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::MalformedResponse` if the body is not JSON, a
    /// segment has the wrong type, or the text is missing, null or empty.
    pub fn extract_text(&self, body: &str) -> Result<String, FormatError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| FormatError::malformed(format!("invalid JSON: {e}"), body))?;

        match self {
            Self::Gemini => {
                let envelope = GeminiEnvelope::deserialize(value).map_err(|e| {
                    FormatError::malformed(format!("unexpected envelope shape: {e}"), body)
                })?;
                envelope
                    .first_text()
                    .map_err(|reason| FormatError::malformed(reason, body))
            }
            Self::Pointer(pointer) => {
                match value.pointer(pointer) {
                    Some(Value::String(text)) if !text.is_empty() => Ok(text.clone()),
                    Some(Value::String(_)) => {
                        Err(FormatError::malformed(format!("{pointer} is empty"), body))
                    }
                    Some(_) => Err(FormatError::malformed(
                        format!("{pointer} is not a string"),
                        body,
                    )),
                    None => Err(FormatError::malformed(format!("{pointer} not found"), body)),
                }
            }
        }
    }
}
