//! camxuc Classifiers
//!
//! Everything between raw user input and a canonical sentiment:
//! - Input validation (which inputs may be classified at all)
//! - Vietnamese text normalization (informal spellings, idioms)
//! - The classifier seam and its backends (offline lexicon, HTTP inference)
//! - Label reconciliation (producer labels to canonical sentiment)

pub mod classifier;
pub mod config;
pub mod http;
pub mod lazy;
pub mod normalizer;
pub mod reconciler;
pub mod sentiment;
pub mod validator;

pub use classifier::{ClassificationMetadata, ClassificationResult, Classifier};
pub use config::{ClassifierBackend, ClassifierConfig, NormalizerConfig};
pub use http::HttpClassifier;
pub use lazy::LazyClassifier;
pub use normalizer::{normalize, Normalizer, ReplacementRule, RULES_VERSION};
pub use reconciler::{reconcile, reconcile_result};
pub use sentiment::SentimentClassifier;
pub use validator::{is_emotion_word, validate};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassificationResult, Classifier};
    pub use crate::lazy::LazyClassifier;
    pub use crate::normalizer::{normalize, Normalizer};
    pub use crate::reconciler::reconcile;
    pub use crate::sentiment::SentimentClassifier;
    pub use crate::validator::validate;
}
