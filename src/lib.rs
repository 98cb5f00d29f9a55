//! discord-formatter — reformat raw text into Discord-flavored markdown.
//!
//! The rewriting is done by a remote LLM proxy. This crate builds the
//! instruction prompt, posts it, and pulls the generated text out of the
//! response envelope. A small view-state model covers the loading/error
//! presentation of a front end.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod logging;
pub mod options;
pub mod prompt;
pub mod ui;

pub use client::{FormattingClient, MessageFormatter};
pub use error::{FailureKind, FormatError};
pub use options::{FormattingOptions, FormattingStyle, MessageLength, Tone};
