//! Instruction payload construction.
//!
//! The backend is an opaque LLM proxy that takes a single prompt string, so
//! the task, the option values, the output constraints and the raw message
//! are all encoded in natural language here.

use std::fmt::Write as _;

use crate::options::FormattingOptions;

/// Sentinel line placed before and after the raw message.
pub const MESSAGE_DELIMITER: &str = "---";

/// Constraint that keeps the model from adding commentary.
pub const ONLY_OUTPUT_CONSTRAINT: &str = "ONLY output the formatted message. Do not include any other text, explanations, or pleasantries.";

/// Markdown dialect the model must use.
pub const MARKDOWN_DIALECT: &str = "Use Discord-flavored markdown (e.g., **bold**, *italics*, __underline__, ~~strikethrough~~, > quote, `code`).";

/// Hashtag policy, present only when hashtags are requested.
pub const HASHTAG_CONSTRAINT: &str =
    "Add 2–3 relevant hashtags at the very end of the message.";

const TASK: &str = "You are an expert at formatting messages for Discord. Your task is to take a raw text message and reformat it to be engaging and clear, using Discord's markdown.";

/// Build the prompt sent to the backend for `raw_message` and `options`.
///
/// The message is trimmed and embedded verbatim between two
/// [`MESSAGE_DELIMITER`] lines. Option values appear exactly as their wire
/// representation.
pub fn build_prompt(raw_message: &str, options: &FormattingOptions) -> String {
    let mut prompt = String::with_capacity(raw_message.len().saturating_add(1024));

    // `write!` into a String cannot fail.
    let _ = writeln!(prompt, "{TASK}");
    prompt.push('\n');

    let _ = writeln!(prompt, "Please adhere to the following formatting options:");
    let _ = writeln!(prompt, "- Use Emojis: {}", options.use_emojis);
    let _ = writeln!(
        prompt,
        "- Add Hashtags: {} (related to the content, at the end)",
        options.add_hashtags
    );
    let _ = writeln!(
        prompt,
        "- Formatting Style: {} (e.g., 'expressive' means using lots of bold/italics, 'minimal' means using them sparingly)",
        options.formatting_style
    );
    let _ = writeln!(
        prompt,
        "- Tone: {} (e.g., casual, enthusiastic, formal)",
        options.tone
    );
    let _ = writeln!(
        prompt,
        "- Desired Length: {} (keep it 'concise', 'default' length, or make it more 'detailed')",
        options.message_length
    );
    prompt.push('\n');

    let _ = writeln!(prompt, "Constraints:");
    let _ = writeln!(prompt, "- {ONLY_OUTPUT_CONSTRAINT}");
    let _ = writeln!(prompt, "- {MARKDOWN_DIALECT}");
    if options.add_hashtags {
        let _ = writeln!(prompt, "- {HASHTAG_CONSTRAINT}");
    }
    prompt.push('\n');

    let _ = writeln!(prompt, "Here is the raw message:");
    let _ = writeln!(prompt, "{MESSAGE_DELIMITER}");
    let _ = writeln!(prompt, "{}", raw_message.trim());
    prompt.push_str(MESSAGE_DELIMITER);

    prompt
}
