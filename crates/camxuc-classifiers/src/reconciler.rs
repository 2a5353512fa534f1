//! Label reconciliation
//!
//! Maps whatever label a classifier produced onto a [`Sentiment`]. Total:
//! anything unrecognized becomes [`Sentiment::Neutral`].
//!
//! The confidence score is deliberately not an input here. The classifier's
//! own label is authoritative no matter how confident it was.

use crate::classifier::ClassificationResult;
use camxuc_core::Sentiment;

/// Labels with a fixed meaning: numbered classes and plain-English names
pub const KNOWN_LABELS: &[(&str, Sentiment)] = &[
    ("LABEL_0", Sentiment::Negative),
    ("LABEL_1", Sentiment::Neutral),
    ("LABEL_2", Sentiment::Positive),
    ("NEGATIVE", Sentiment::Negative),
    ("NEUTRAL", Sentiment::Neutral),
    ("POSITIVE", Sentiment::Positive),
    ("negative", Sentiment::Negative),
    ("neutral", Sentiment::Neutral),
    ("positive", Sentiment::Positive),
    ("NEG", Sentiment::Negative),
    ("POS", Sentiment::Positive),
    ("neg", Sentiment::Negative),
    ("pos", Sentiment::Positive),
];

/// Substring markers searched in the uppercased label, in precedence order.
///
/// A label containing markers for several categories resolves to the first
/// one listed, so "NOT POSITIVE, NEGATIVE" is POSITIVE. Existing history was
/// produced with this order; keep it.
pub const LABEL_MARKERS: &[(Sentiment, &[&str])] = &[
    (Sentiment::Positive, &["POS", "TÍCH CỰC", "TICH CUC"]),
    (Sentiment::Negative, &["NEG", "TIÊU CỰC", "TIEU CUC"]),
    (Sentiment::Neutral, &["NEU", "TRUNG TÍNH", "TRUNG TINH"]),
];

/// Look `label` up in [`KNOWN_LABELS`], case-sensitive first
pub fn known_label(label: &str) -> Option<Sentiment> {
    KNOWN_LABELS
        .iter()
        .find(|(known, _)| *known == label)
        .or_else(|| {
            KNOWN_LABELS
                .iter()
                .find(|(known, _)| known.eq_ignore_ascii_case(label))
        })
        .map(|(_, sentiment)| *sentiment)
}

/// Best-effort guess from marker substrings
fn guess_from_markers(label: &str) -> Option<Sentiment> {
    let upper = label.to_uppercase();
    LABEL_MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|marker| upper.contains(marker)))
        .map(|(sentiment, _)| *sentiment)
}

/// Map a raw classifier label to its canonical sentiment
pub fn reconcile(raw_label: &str) -> Sentiment {
    if raw_label.is_empty() {
        return Sentiment::Neutral;
    }

    known_label(raw_label)
        .or_else(|| guess_from_markers(raw_label))
        .unwrap_or(Sentiment::Neutral)
}

/// Reconcile a full classifier result. Only the label is consulted.
pub fn reconcile_result(result: &ClassificationResult) -> Sentiment {
    reconcile(&result.label)
}
