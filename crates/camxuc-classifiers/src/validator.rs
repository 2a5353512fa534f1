//! Input eligibility checks
//!
//! Decides whether raw user input may be sent to the classifier at all.
//! Rules are applied in order and the first failure wins:
//!
//! 1. Blank input is rejected.
//! 2. A single word is only accepted when it is a recognized emotion word.
//! 3. Input shorter than [`MIN_CHARS`] characters is rejected.

use camxuc_core::{RejectReason, ValidationOutcome};

/// Minimum number of characters after trimming
pub const MIN_CHARS: usize = 2;

/// Emotion words accepted on their own.
///
/// Multi-word idioms are members too and are matched against the whole
/// trimmed, lowercased input.
pub const EMOTION_WORDS: &[&str] = &[
    "vui",
    "buồn",
    "chán",
    "cười",
    "buon",
    "chan",
    "cuoi",
    "vui vẻ",
    "buồn bã",
    "chán nản",
    "cười vui",
    "hạnh phúc",
    "tức giận",
    "sợ hãi",
    "ngạc nhiên",
    "yêu",
    "ghét",
    "thích",
    "không thích",
];

/// Whether `text` (already trimmed and lowercased) is an allow-listed emotion word
pub fn is_emotion_word(text: &str) -> bool {
    EMOTION_WORDS.contains(&text)
}

/// Validate raw input. Pure; never touches the classifier.
pub fn validate(raw_input: &str) -> ValidationOutcome {
    let text = raw_input.trim();
    if text.is_empty() {
        return ValidationOutcome::Rejected(RejectReason::Empty);
    }

    let word_count = text.split_whitespace().count();
    if word_count < 2 {
        if word_count == 0 {
            return ValidationOutcome::Rejected(RejectReason::Empty);
        }
        if !is_emotion_word(&text.to_lowercase()) {
            return ValidationOutcome::Rejected(RejectReason::TooFewWords);
        }
    }

    if text.chars().count() < MIN_CHARS {
        return ValidationOutcome::Rejected(RejectReason::TooShort);
    }

    ValidationOutcome::Accepted
}
