//! Core types for camxuc

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// `strftime` layout of history timestamps (local time, second precision)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Canonical sentiment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// All categories, in display order
    pub const ALL: [Sentiment; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    /// Canonical English name as stored in history
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "POSITIVE",
            Self::Neutral => "NEUTRAL",
            Self::Negative => "NEGATIVE",
        }
    }

    /// Vietnamese label shown to users
    pub fn vietnamese_label(&self) -> &'static str {
        match self {
            Self::Positive => "Tích cực",
            Self::Neutral => "Trung tính",
            Self::Negative => "Tiêu cực",
        }
    }

    /// Emoji shown next to the label
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Positive => "😊",
            Self::Neutral => "😐",
            Self::Negative => "😞",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    /// Strict parse of the canonical names. Classifier labels go through the
    /// reconciler instead, which is total.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POSITIVE" => Ok(Self::Positive),
            "NEUTRAL" => Ok(Self::Neutral),
            "NEGATIVE" => Ok(Self::Negative),
            other => Err(format!("unknown sentiment: {other}")),
        }
    }
}

/// Why an input was not eligible for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Nothing but whitespace
    Empty,
    /// A single word that is not a recognized emotion word
    TooFewWords,
    /// Fewer than two characters after trimming
    TooShort,
}

impl RejectReason {
    /// Message shown to Vietnamese-speaking users
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Empty => "Vui lòng nhập câu cần phân tích!",
            Self::TooFewWords => {
                "Vui lòng nhập ít nhất 2 từ hoặc một từ cảm xúc! \
                 Ví dụ: 'Tôi vui', 'Hôm nay tôi rất vui', hoặc 'vui', 'buồn', 'chán', 'cười'"
            }
            Self::TooShort => "Câu quá ngắn, vui lòng nhập câu đầy đủ hơn!",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Empty => "empty input",
            Self::TooFewWords => "need at least two words or a recognized single emotion word",
            Self::TooShort => "input too short",
        };
        f.write_str(reason)
    }
}

/// Result of input validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted,
    Rejected(RejectReason),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Rejection reason, if any
    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            Self::Accepted => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

/// A persisted classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Store-assigned, monotonically increasing identifier
    pub id: u64,

    /// Original input as typed (trimmed), not the normalized form
    pub text: String,

    pub sentiment: Sentiment,

    /// Local time formatted with [`TIMESTAMP_FORMAT`]
    pub timestamp: String,
}

/// Success payload handed to presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationPayload {
    /// Input text (trimmed)
    pub text: String,

    /// Canonical sentiment chosen from the classifier's label
    pub sentiment: Sentiment,

    /// Classifier confidence, carried through for display only
    pub confidence_score: f32,

    /// Text that was actually sent to the classifier
    pub normalized_text: String,
}

impl ClassificationPayload {
    /// Confidence as a percentage rounded to two decimals
    pub fn confidence_percent(&self) -> f64 {
        (f64::from(self.confidence_score) * 10_000.0).round() / 100.0
    }

    /// Compact `{text, sentiment}` form of the result
    pub fn result_dict(&self) -> serde_json::Value {
        serde_json::json!({
            "text": self.text,
            "sentiment": self.sentiment,
        })
    }
}
