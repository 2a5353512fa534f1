//! Remote inference classifier
//!
//! Posts `{"inputs": text}` to a text-classification endpoint (Hugging Face
//! Inference API or a compatible server) and accepts any of the response
//! shapes those servers emit:
//!
//! ```text
//! {"label": "POS", "score": 0.98}
//! [{"label": "POS", "score": 0.98}, ...]
//! [[{"label": "NEG", "score": 0.01}, {"label": "POS", "score": 0.98}, ...]]
//! ```

use crate::classifier::{ClassificationMetadata, ClassificationResult, Classifier};
use camxuc_core::{Error, Result};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::debug;

/// One `{label, score}` entry. Missing fields default to `""` and `0.0`.
#[derive(Debug, Clone, Default, Deserialize)]
struct LabelScore {
    #[serde(default)]
    label: String,
    #[serde(default)]
    score: f32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Failure { error: String },
    Single(LabelScore),
}

/// Pick the `(label, score)` pair out of an inference response body
pub fn parse_response(body: &str) -> Result<(String, f32)> {
    let response: InferenceResponse = serde_json::from_str(body)
        .map_err(|e| Error::classifier(format!("Malformed classifier response: {e}")))?;

    let best = match response {
        InferenceResponse::Nested(batches) => batches
            .into_iter()
            .next()
            .and_then(|scores| {
                scores
                    .into_iter()
                    .max_by(|a, b| a.score.total_cmp(&b.score))
            }),
        InferenceResponse::Flat(scores) => scores.into_iter().next(),
        InferenceResponse::Failure { error } => {
            return Err(Error::classifier(format!("Classifier reported: {error}")));
        }
        InferenceResponse::Single(score) => Some(score),
    };

    best.map(|entry| (entry.label, entry.score))
        .ok_or_else(|| Error::classifier("Empty classifier response"))
}

/// Classifier backed by an HTTP inference endpoint
pub struct HttpClassifier {
    name: String,
    model: String,
    endpoint: String,
    api_token: Option<String>,
    client: reqwest::Client,
}

impl HttpClassifier {
    /// Create a classifier for `endpoint`, reporting `model` in metadata
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            name: "http".to_string(),
            model: model.into(),
            endpoint: endpoint.into(),
            api_token: None,
            client,
        })
    }

    /// Send `token` as a bearer token
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let start = Instant::now();

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::http(format!("Classifier request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::http(format!("Failed to read classifier response: {e}")))?;

        if !status.is_success() {
            return Err(Error::classifier(format!(
                "Classifier returned {status}: {body}"
            )));
        }

        let (label, score) = parse_response(&body)?;
        debug!(label = %label, score, "Remote classification complete");

        Ok(ClassificationResult {
            label,
            score,
            metadata: ClassificationMetadata {
                model: Some(self.model.clone()),
                all_scores: None,
            },
            latency_us: start.elapsed().as_micros() as u64,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
