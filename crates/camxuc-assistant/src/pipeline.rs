//! Request pipeline
//!
//! One request walks these states and ends back in `Idle`:
//!
//! ```text
//! Idle -> Validating -> Rejected
//!                    -> Normalizing -> Classifying -> Failed
//!                                                  -> Reconciling -> Persisting -> Presenting -> Idle
//! ```
//!
//! Nothing carries over between requests. A rejected or failed request
//! writes no history, and a failed append is reported without discarding
//! the classification.

use crate::config::AppConfig;
use crate::presentation::Presenter;
use camxuc_classifiers::{reconcile_result, validate, Classifier, LazyClassifier, Normalizer};
use camxuc_core::{
    ClassificationPayload, HistoryRecord, RejectReason, Result, ValidationOutcome,
};
use camxuc_telemetry::{timestamp_now, HistoryStore, JsonlHistoryStore, MetricsCollector};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Pipeline state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Validating,
    Rejected,
    Normalizing,
    Classifying,
    Failed,
    Reconciling,
    Persisting,
    Presenting,
}

/// How a request ended
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// Input was not eligible; the classifier was never called
    Rejected(RejectReason),

    /// The classifier raised an error; nothing was persisted
    Failed { message: String },

    /// Classification succeeded
    Classified {
        payload: ClassificationPayload,
        /// Stored record, absent when the append failed
        record: Option<HistoryRecord>,
        /// Why the append failed, if it did
        persist_error: Option<String>,
    },
}

impl RequestOutcome {
    /// State [`RequestPipeline::process`] stops in: `Rejected`, `Failed` or
    /// `Persisting` (also when the append itself failed).
    ///
    /// [`RequestPipeline::handle`] continues from here through `Presenting`
    /// and always returns to `Idle`.
    pub fn final_state(&self) -> PipelineState {
        match self {
            Self::Rejected(_) => PipelineState::Rejected,
            Self::Failed { .. } => PipelineState::Failed,
            Self::Classified { .. } => PipelineState::Persisting,
        }
    }

    pub fn payload(&self) -> Option<&ClassificationPayload> {
        match self {
            Self::Classified { payload, .. } => Some(payload),
            _ => None,
        }
    }
}

/// Validation, normalization, classification, reconciliation and persistence
/// for one request at a time
pub struct RequestPipeline {
    classifier: Arc<dyn Classifier>,
    store: Arc<dyn HistoryStore>,
    normalizer: Normalizer,
    metrics: MetricsCollector,
    history_limit: usize,
}

impl RequestPipeline {
    /// Create a pipeline from pre-built collaborators
    pub fn new(
        classifier: Arc<dyn Classifier>,
        store: Arc<dyn HistoryStore>,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            classifier,
            store,
            normalizer,
            metrics: MetricsCollector::new(),
            history_limit: camxuc_telemetry::DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Build the pipeline described by `config`.
    ///
    /// The classifier is built lazily on the first accepted request.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let classifier = Arc::new(LazyClassifier::from_config(config.classifier.clone()));
        let store = Arc::new(JsonlHistoryStore::from_config(&config.history)?);
        let normalizer = config.normalizer.build()?;

        info!(
            "Normalizer loaded: {} phrase rules, {} token rules (table v{})",
            normalizer.phrase_count(),
            normalizer.token_count(),
            camxuc_classifiers::RULES_VERSION
        );

        Ok(Self::new(classifier, store, normalizer).with_history_limit(config.history.limit))
    }

    /// Number of records shown after each request
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Share an existing metrics collector
    pub fn with_metrics(mut self, metrics: MetricsCollector) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    fn enter(&self, state: PipelineState) {
        debug!(?state, "Pipeline transition");
    }

    /// Run a request up to (and including) persistence
    pub async fn process(&self, raw_input: &str) -> RequestOutcome {
        self.metrics.record_request();
        self.enter(PipelineState::Validating);

        if let ValidationOutcome::Rejected(reason) = validate(raw_input) {
            self.enter(PipelineState::Rejected);
            self.metrics.record_rejected();
            info!(%reason, "Input rejected");
            return RequestOutcome::Rejected(reason);
        }

        let text = raw_input.trim();

        self.enter(PipelineState::Normalizing);
        let normalized = self.normalizer.normalize(text);
        debug!(normalized = %normalized, "Normalized input");

        self.enter(PipelineState::Classifying);
        let start = Instant::now();
        let result = self.classifier.classify(&normalized).await;
        self.metrics
            .record_classifier_latency(start.elapsed().as_micros() as u64);

        let result = match result {
            Ok(result) => result,
            Err(e) => {
                self.enter(PipelineState::Failed);
                self.metrics.record_failed();
                warn!("Classification failed: {}", e);
                return RequestOutcome::Failed {
                    message: e.to_string(),
                };
            }
        };

        self.enter(PipelineState::Reconciling);
        let sentiment = reconcile_result(&result);
        info!(
            label = %result.label,
            score = result.score,
            %sentiment,
            "Classified input"
        );

        self.enter(PipelineState::Persisting);
        let (record, persist_error) = match self.store.append(text, sentiment, &timestamp_now()) {
            Ok(record) => (Some(record), None),
            Err(e) => {
                self.metrics.record_persist_failure();
                warn!("Failed to save history: {}", e);
                (None, Some(e.to_string()))
            }
        };
        self.metrics.record_classified(sentiment);

        RequestOutcome::Classified {
            payload: ClassificationPayload {
                text: text.to_string(),
                sentiment,
                confidence_score: result.score,
                normalized_text: normalized,
            },
            record,
            persist_error,
        }
    }

    /// Recent history for display
    pub fn recent_history(&self) -> Result<Vec<HistoryRecord>> {
        self.store.query_recent(self.history_limit)
    }

    /// Run a full request, including presentation of the outcome and history
    pub async fn handle<P>(&self, raw_input: &str, presenter: &mut P) -> RequestOutcome
    where
        P: Presenter + ?Sized,
    {
        let outcome = self.process(raw_input).await;

        self.enter(PipelineState::Presenting);
        let shown = match &outcome {
            RequestOutcome::Rejected(reason) => presenter.show_rejected(*reason),
            RequestOutcome::Failed { message } => {
                presenter.show_error(&format!("Lỗi khi phân tích: {message}"))
            }
            RequestOutcome::Classified {
                payload,
                persist_error,
                ..
            } => presenter.show_result(payload).and_then(|_| match persist_error {
                Some(e) => presenter.show_error(&format!("Không lưu được lịch sử: {e}")),
                None => Ok(()),
            }),
        };
        if let Err(e) = shown {
            warn!("Failed to present outcome: {}", e);
        }

        self.present_history(presenter);
        self.enter(PipelineState::Idle);

        outcome
    }

    /// Query and present recent history. Failures are reported, not raised.
    pub fn present_history<P>(&self, presenter: &mut P)
    where
        P: Presenter + ?Sized,
    {
        let shown = match self.recent_history() {
            Ok(records) => presenter.show_history(&records),
            Err(e) => {
                warn!("Failed to load history: {}", e);
                presenter.show_error(&format!("Không tải được lịch sử: {e}"))
            }
        };
        if let Err(e) = shown {
            warn!("Failed to present history: {}", e);
        }
    }
}
