//! Failure taxonomy for a formatting request.
//!
//! Callers branch on [`FormatError::kind`]; end users only ever see
//! [`FormatError::user_message`]. The `Display` output carries the
//! diagnostic detail and is meant for logs.

use regex::Regex;

/// Shown to the user for every failure other than empty input.
pub const UNAVAILABLE_MESSAGE: &str = "Failed to get a formatted message. Please try again later.";

/// Shown to the user when there is nothing to format.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a message to format.";

const MAX_ERROR_BODY_CHARS: usize = 256;

/// Errors returned by the formatting client.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The raw message is empty after trimming.
    #[error("raw message is empty")]
    InvalidInput,
    /// The HTTP request could not be completed.
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("backend error: {status} {status_text}: {body}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
        /// Sanitized response body.
        body: String,
    },
    /// The body was not JSON or did not contain the generated text.
    #[error("no valid response from backend: {reason}")]
    MalformedResponse {
        /// Which part of the envelope was missing or invalid.
        reason: String,
        /// Sanitized response body.
        body: String,
    },
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

/// Coarse classification of a [`FormatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Empty input.
    InvalidInput,
    /// Network-level failure or client setup failure.
    Transport,
    /// Non-2xx response.
    Backend,
    /// Unexpected response shape.
    MalformedResponse,
}

impl FormatError {
    /// Classification for programmatic branching.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidInput => FailureKind::InvalidInput,
            Self::Transport(_) | Self::Client(_) => FailureKind::Transport,
            Self::Backend { .. } => FailureKind::Backend,
            Self::MalformedResponse { .. } => FailureKind::MalformedResponse,
        }
    }

    /// The single human-readable message shown to end users.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput => EMPTY_INPUT_MESSAGE,
            _ => UNAVAILABLE_MESSAGE,
        }
    }

    /// HTTP status code, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>, raw_body: &str) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
            body: sanitize_body(raw_body),
        }
    }
}

/// Collapse whitespace, redact token-like values and truncate a response
/// body so it can be carried in an error and logged.
pub fn sanitize_body(raw: &str) -> String {
    let mut sanitized = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    for pattern in [
        r"AIza[0-9A-Za-z_\-]{20,}",
        r"sk-ant-[A-Za-z0-9_\-]{10,}",
        r"sk-[A-Za-z0-9]{32,}",
        r"ghp_[A-Za-z0-9]{20,}",
        r"xoxb-[A-Za-z0-9\-]{20,}",
        r"(?i)bearer\s+[A-Za-z0-9._\-]{16,}",
    ] {
        if let Ok(regex) = Regex::new(pattern) {
            sanitized = regex.replace_all(&sanitized, "[REDACTED]").into_owned();
        }
    }

    if sanitized.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened = sanitized
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect::<String>();
        return format!("{shortened}...[truncated]");
    }

    sanitized
}
