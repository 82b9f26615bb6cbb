//! Input policy and prompt template for AI summaries.

/// Inputs shorter than this never reach the model.
pub const MIN_SUMMARY_CHARS: usize = 100;
/// Characters of input forwarded to the model; the rest is dropped.
pub const MAX_SUMMARY_INPUT_CHARS: usize = 30_000;

pub const TOO_SHORT_SUMMARY: &str =
    "Text is too short to summarize. Please provide at least 100 characters.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedText {
    pub text: String,
    pub original_length: usize,
    pub truncated: bool,
}

impl PreparedText {
    pub fn processed_length(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_too_short(&self) -> bool {
        self.original_length < MIN_SUMMARY_CHARS
    }
}

/// Trims `text` and cuts it to [`MAX_SUMMARY_INPUT_CHARS`] characters.
///
/// Inputs at or above the budget are flagged as truncated.
pub fn prepare_input(text: &str) -> PreparedText {
    let trimmed = text.trim();
    let original_length = trimmed.chars().count();
    let truncated = original_length >= MAX_SUMMARY_INPUT_CHARS;

    let text = match trimmed.char_indices().nth(MAX_SUMMARY_INPUT_CHARS) {
        Some((cut, _)) => trimmed[..cut].to_owned(),
        None => trimmed.to_owned(),
    };

    PreparedText {
        text,
        original_length,
        truncated,
    }
}

pub fn build_prompt(text: &str) -> String {
    format!(
        "Please provide a clear and concise summary of the following text. \
Focus on the main ideas, key points and important details. \
Use short paragraphs, and bullet points where they help readability.\n\n\
Text to summarize:\n{text}\n\nSummary:"
    )
}
