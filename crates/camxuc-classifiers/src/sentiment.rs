//! Lexicon-based Vietnamese sentiment classifier
//!
//! Offline backend used when no inference endpoint is configured. It speaks
//! the numbered-class convention of the PhoBERT sentiment models
//! (`LABEL_0` negative, `LABEL_1` neutral, `LABEL_2` positive) so it can be
//! swapped for a real model without touching the reconciler.

use crate::classifier::{ClassificationMetadata, ClassificationResult, Classifier};
use aho_corasick::{AhoCorasick, MatchKind};
use camxuc_core::Result;
use std::time::Instant;

const NEGATIVE_LABEL: &str = "LABEL_0";
const NEUTRAL_LABEL: &str = "LABEL_1";
const POSITIVE_LABEL: &str = "LABEL_2";

const POSITIVE_TERMS: &[&str] = &[
    "vui",
    "vui vẻ",
    "cười",
    "cười vui",
    "hài hước",
    "hạnh phúc",
    "thích",
    "yêu",
    "tốt",
    "hay",
    "đẹp",
    "ngon",
    "tuyệt",
    "tuyệt vời",
    "thú vị",
    "xuất sắc",
    "hài lòng",
    "tuyệt quá",
];

// Negated positives come first in leftmost-longest order and so win over the
// positive term they contain.
const NEGATIVE_TERMS: &[&str] = &[
    "buồn",
    "buồn bã",
    "chán",
    "chán nản",
    "ghét",
    "giận",
    "tức giận",
    "sợ",
    "sợ hãi",
    "tệ",
    "dở",
    "tồi",
    "mệt",
    "đau",
    "thất vọng",
    "khó chịu",
    "không thích",
    "không vui",
    "không tốt",
    "không hay",
    "không ngon",
];

pub struct SentimentClassifier {
    name: String,
    lexicon: AhoCorasick,
    positive_count: usize,
}

impl SentimentClassifier {
    pub fn new() -> Result<Self> {
        Self::with_name("lexicon")
    }

    pub fn with_name(name: impl Into<String>) -> Result<Self> {
        let terms: Vec<&str> = POSITIVE_TERMS
            .iter()
            .chain(NEGATIVE_TERMS.iter())
            .copied()
            .collect();

        let lexicon = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(terms)
            .map_err(|e| {
                camxuc_core::Error::classifier(format!(
                    "Failed to build sentiment lexicon matcher: {e}"
                ))
            })?;

        Ok(Self {
            name: name.into(),
            lexicon,
            positive_count: POSITIVE_TERMS.len(),
        })
    }

    /// Count whole-word positive and negative hits
    fn count_hits(&self, text: &str) -> (usize, usize) {
        let mut positive = 0;
        let mut negative = 0;

        for hit in self.lexicon.find_iter(text) {
            if !is_word_boundary(text, hit.start(), hit.end()) {
                continue;
            }
            if hit.pattern().as_usize() < self.positive_count {
                positive += 1;
            } else {
                negative += 1;
            }
        }

        (positive, negative)
    }
}

fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

#[async_trait::async_trait]
impl Classifier for SentimentClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let start = Instant::now();

        let lowered = text.to_lowercase();
        let (positive_hits, negative_hits) = self.count_hits(&lowered);
        let total = (positive_hits + negative_hits) as f32;

        let positive_ratio = if total == 0.0 {
            0.5
        } else {
            positive_hits as f32 / total
        };

        let (label, score) = if positive_ratio > 0.5 {
            (POSITIVE_LABEL, positive_ratio)
        } else if positive_ratio < 0.5 {
            (NEGATIVE_LABEL, 1.0 - positive_ratio)
        } else {
            (NEUTRAL_LABEL, 0.5)
        };

        let neutral_score = 1.0 - (positive_ratio - 0.5).abs() * 2.0;

        Ok(ClassificationResult {
            label: label.to_string(),
            score,
            metadata: ClassificationMetadata {
                model: Some("vietnamese-sentiment-lexicon".to_string()),
                all_scores: Some(vec![
                    (NEGATIVE_LABEL.to_string(), 1.0 - positive_ratio),
                    (NEUTRAL_LABEL.to_string(), neutral_score),
                    (POSITIVE_LABEL.to_string(), positive_ratio),
                ]),
            },
            latency_us: start.elapsed().as_micros() as u64,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_positive_sentence() {
        let classifier = SentimentClassifier::new().unwrap();

        let result = classifier.classify("hôm nay tôi rất vui").await.unwrap();
        assert_eq!(result.label, "LABEL_2");
        assert!(result.score > 0.5);
    }

    #[tokio::test]
    async fn test_negative_sentence() {
        let classifier = SentimentClassifier::new().unwrap();

        let result = classifier.classify("tôi buồn và thất vọng").await.unwrap();
        assert_eq!(result.label, "LABEL_0");
        assert_eq!(result.score, 1.0);
    }

    #[tokio::test]
    async fn test_negation_wins_over_embedded_positive() {
        let classifier = SentimentClassifier::new().unwrap();

        let result = classifier.classify("tôi không thích phim này").await.unwrap();
        assert_eq!(result.label, "LABEL_0");
    }

    #[tokio::test]
    async fn test_no_emotion_words_is_neutral() {
        let classifier = SentimentClassifier::new().unwrap();

        let result = classifier.classify("tôi đi học").await.unwrap();
        assert_eq!(result.label, "LABEL_1");
        assert_eq!(result.score, 0.5);
    }

    #[tokio::test]
    async fn test_terms_only_match_whole_words() {
        let classifier = SentimentClassifier::new().unwrap();

        // "hay" inside "thay" must not count
        let result = classifier.classify("thay đổi lịch").await.unwrap();
        assert_eq!(result.label, "LABEL_1");
    }

    #[tokio::test]
    async fn test_humorous_rewrite_reads_positive() {
        let classifier = SentimentClassifier::new().unwrap();

        let result = classifier.classify("phim này hài hước quá").await.unwrap();
        assert_eq!(result.label, "LABEL_2");
        assert_eq!(
            result.metadata.model.as_deref(),
            Some("vietnamese-sentiment-lexicon")
        );
    }
}
