//! HTTP client for the formatting backend proxy.
//!
//! One call, one POST: `{"prompt": "..."}` goes out, the candidate envelope
//! comes back and the generated markdown is pulled out of it.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::envelope::EnvelopeFormat;
use crate::error::{sanitize_body, FormatError};
use crate::options::FormattingOptions;
use crate::prompt::build_prompt;

/// Request body sent to the backend.
#[doc(hidden)]
#[derive(Debug, Serialize)]
pub struct PromptRequest<'a> {
    /// The full instruction payload.
    pub prompt: &'a str,
}

/// Anything that can turn a raw message into Discord markdown.
///
/// Implementations must be `Send + Sync` so a session can hold one behind a
/// shared reference across await points.
#[async_trait]
pub trait MessageFormatter: Send + Sync {
    /// Reformat `raw_message` according to `options`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] for empty input or any backend failure.
    async fn format(
        &self,
        raw_message: &str,
        options: &FormattingOptions,
    ) -> Result<String, FormatError>;
}

/// Formatting client bound to a single backend endpoint.
#[derive(Debug, Clone)]
pub struct FormattingClient {
    url: String,
    envelope: EnvelopeFormat,
    client: reqwest::Client,
}

impl FormattingClient {
    /// Build a client for the given backend.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::Client` if the HTTP client cannot be constructed.
    pub fn new(backend: &BackendConfig) -> Result<Self, FormatError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = backend.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| FormatError::Client(e.to_string()))?;

        Ok(Self {
            url: backend.url.clone(),
            envelope: backend.envelope.clone(),
            client,
        })
    }

    /// The endpoint this client posts to.
    pub fn backend_url(&self) -> &str {
        &self.url
    }

    /// The envelope used to read responses.
    pub fn envelope(&self) -> &EnvelopeFormat {
        &self.envelope
    }

    async fn send(&self, prompt: &str) -> Result<String, FormatError> {
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(&PromptRequest { prompt })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // A body that fails to read must not hide the status.
            let body = response.text().await.unwrap_or_default();
            debug!(backend = %self.url, status = status.as_u16(), body = %body, "backend error response");
            return Err(FormatError::Backend {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_owned(),
                body: sanitize_body(&body),
            });
        }

        let body = response.text().await?;
        debug!(backend = %self.url, status = status.as_u16(), bytes = body.len(), body = %body, "backend response");
        self.envelope.extract_text(&body)
    }
}

#[async_trait]
impl MessageFormatter for FormattingClient {
    async fn format(
        &self,
        raw_message: &str,
        options: &FormattingOptions,
    ) -> Result<String, FormatError> {
        if raw_message.trim().is_empty() {
            return Err(FormatError::InvalidInput);
        }

        let prompt = build_prompt(raw_message, options);
        debug!(backend = %self.url, prompt_chars = prompt.chars().count(), "sending format request");

        match self.send(&prompt).await {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(backend = %self.url, kind = ?e.kind(), error = %e, "formatting failed");
                Err(e)
            }
        }
    }
}
