//! Formatting options selected by the user for a single request.
//!
//! Every enum serializes to the same lowercase value that ends up in the
//! prompt, so config files, CLI flags and the instruction payload all agree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How densely bold/italic markup should be applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormattingStyle {
    /// Lots of bold and italics.
    #[default]
    Expressive,
    /// Markup used sparingly.
    Minimal,
}

impl FormattingStyle {
    /// All variants, in display order.
    pub const ALL: [Self; 2] = [Self::Expressive, Self::Minimal];

    /// Wire value used in the prompt and config.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expressive => "expressive",
            Self::Minimal => "minimal",
        }
    }
}

/// Voice of the rewritten text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Relaxed, conversational.
    #[default]
    Casual,
    /// Upbeat and excited.
    Enthusiastic,
    /// Professional.
    Formal,
}

impl Tone {
    /// All variants, in display order.
    pub const ALL: [Self; 3] = [Self::Casual, Self::Enthusiastic, Self::Formal];

    /// Wire value used in the prompt and config.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Enthusiastic => "enthusiastic",
            Self::Formal => "formal",
        }
    }
}

/// Target output length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLength {
    /// Shorter than the input.
    Concise,
    /// Roughly the input's length.
    #[default]
    Default,
    /// Expanded with more detail.
    Detailed,
}

impl MessageLength {
    /// All variants, in display order.
    pub const ALL: [Self; 3] = [Self::Concise, Self::Default, Self::Detailed];

    /// Wire value used in the prompt and config.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concise => "concise",
            Self::Default => "default",
            Self::Detailed => "detailed",
        }
    }
}

macro_rules! impl_wire_value {
    ($($ty:ident),+ $(,)?) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase();
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| {
                        let expected: Vec<&str> = Self::ALL.iter().map(|v| v.as_str()).collect();
                        format!("unknown value {s:?}, expected one of: {}", expected.join(", "))
                    })
            }
        }
    )+};
}

impl_wire_value!(FormattingStyle, Tone, MessageLength);

/// The five user-selectable formatting toggles.
///
/// Defaults match the initial state of the formatting controls: emojis on,
/// hashtags off, expressive style, casual tone, default length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingOptions {
    /// Whether the output should include emojis.
    pub use_emojis: bool,
    /// Whether 2–3 relevant hashtags should be appended.
    pub add_hashtags: bool,
    /// Density of bold/italic markup.
    pub formatting_style: FormattingStyle,
    /// Voice of the rewritten text.
    pub tone: Tone,
    /// Target output length.
    pub message_length: MessageLength,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            use_emojis: true,
            add_hashtags: false,
            formatting_style: FormattingStyle::default(),
            tone: Tone::default(),
            message_length: MessageLength::default(),
        }
    }
}
