//! Configuration for classifier backends and normalization rules

use crate::http::HttpClassifier;
use crate::normalizer::{Normalizer, ReplacementRule};
use crate::sentiment::SentimentClassifier;
use crate::Classifier;
use camxuc_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Which classifier implementation to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierBackend {
    /// Built-in Vietnamese lexicon, no network
    #[default]
    Lexicon,
    /// Remote text-classification endpoint
    Http,
}

impl std::str::FromStr for ClassifierBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lexicon" => Ok(Self::Lexicon),
            "http" => Ok(Self::Http),
            other => Err(format!("unknown classifier backend: {other}")),
        }
    }
}

/// Classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Backend implementation
    #[serde(default)]
    pub backend: ClassifierBackend,

    /// Inference endpoint URL (required for the http backend)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Model identifier, reported in result metadata
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout for the http backend
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Name of the environment variable holding a bearer token
    #[serde(default)]
    pub api_token_env: Option<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            backend: ClassifierBackend::default(),
            endpoint: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            api_token_env: None,
        }
    }
}

fn default_model() -> String {
    "wonrax/phobert-base-vietnamese-sentiment".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClassifierConfig {
    /// Construct the configured classifier
    pub fn build(&self) -> Result<Arc<dyn Classifier>> {
        match self.backend {
            ClassifierBackend::Lexicon => {
                info!("Using built-in lexicon classifier");
                Ok(Arc::new(SentimentClassifier::new()?))
            }
            ClassifierBackend::Http => {
                let endpoint = self.endpoint.as_deref().ok_or_else(|| {
                    Error::config("classifier.endpoint is required for the http backend")
                })?;

                let mut classifier = HttpClassifier::new(
                    endpoint,
                    self.model.as_str(),
                    Duration::from_secs(self.timeout_secs),
                )?;

                if let Some(var) = &self.api_token_env {
                    match std::env::var(var) {
                        Ok(token) => classifier = classifier.with_api_token(token),
                        Err(_) => warn!("API token variable {} is not set", var),
                    }
                }

                info!("Using remote classifier at {} ({})", endpoint, self.model);
                Ok(Arc::new(classifier))
            }
        }
    }
}

/// Extra normalization rules, appended after the built-in tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizerConfig {
    #[serde(default)]
    pub extra_phrases: Vec<ReplacementRule>,

    #[serde(default)]
    pub extra_tokens: Vec<ReplacementRule>,
}

impl NormalizerConfig {
    pub fn build(&self) -> Result<Normalizer> {
        Normalizer::with_extra_rules(self.extra_phrases.clone(), self.extra_tokens.clone())
    }
}
