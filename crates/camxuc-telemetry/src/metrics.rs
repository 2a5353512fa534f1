//! Request counters and latency totals

use camxuc_core::Sentiment;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics collector for the classification pipeline.
///
/// Counters are kept locally for `snapshot()` and mirrored to the `metrics`
/// facade, which is a no-op unless a recorder is installed.
#[derive(Clone)]
pub struct MetricsCollector {
    inner: Arc<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    total_requests: AtomicU64,
    rejected: AtomicU64,
    failed: AtomicU64,
    classified: AtomicU64,
    positive: AtomicU64,
    neutral: AtomicU64,
    negative: AtomicU64,
    persist_failures: AtomicU64,
    classifier_latency_us: AtomicU64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner::default()),
        }
    }

    /// Record an incoming request
    pub fn record_request(&self) {
        self.inner.total_requests.fetch_add(1, Ordering::Relaxed);
        ::metrics::counter!("camxuc_requests_total").increment(1);
    }

    /// Record a validation rejection
    pub fn record_rejected(&self) {
        self.inner.rejected.fetch_add(1, Ordering::Relaxed);
        ::metrics::counter!("camxuc_rejected_total").increment(1);
    }

    /// Record a classifier failure
    pub fn record_failed(&self) {
        self.inner.failed.fetch_add(1, Ordering::Relaxed);
        ::metrics::counter!("camxuc_failed_total").increment(1);
    }

    /// Record a successful classification
    pub fn record_classified(&self, sentiment: Sentiment) {
        self.inner.classified.fetch_add(1, Ordering::Relaxed);
        let counter = match sentiment {
            Sentiment::Positive => &self.inner.positive,
            Sentiment::Neutral => &self.inner.neutral,
            Sentiment::Negative => &self.inner.negative,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        ::metrics::counter!("camxuc_sentiment_total", "sentiment" => sentiment.as_str())
            .increment(1);
    }

    /// Record a history append failure
    pub fn record_persist_failure(&self) {
        self.inner.persist_failures.fetch_add(1, Ordering::Relaxed);
        ::metrics::counter!("camxuc_persist_failures_total").increment(1);
    }

    /// Record classifier latency
    pub fn record_classifier_latency(&self, latency_us: u64) {
        self.inner
            .classifier_latency_us
            .fetch_add(latency_us, Ordering::Relaxed);
        ::metrics::histogram!("camxuc_classifier_latency_us").record(latency_us as f64);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: self.inner.total_requests.load(Ordering::Relaxed),
            rejected: self.inner.rejected.load(Ordering::Relaxed),
            failed: self.inner.failed.load(Ordering::Relaxed),
            classified: self.inner.classified.load(Ordering::Relaxed),
            positive: self.inner.positive.load(Ordering::Relaxed),
            neutral: self.inner.neutral.load(Ordering::Relaxed),
            negative: self.inner.negative.load(Ordering::Relaxed),
            persist_failures: self.inner.persist_failures.load(Ordering::Relaxed),
            classifier_latency_us: self.inner.classifier_latency_us.load(Ordering::Relaxed),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub rejected: u64,
    pub failed: u64,
    pub classified: u64,
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
    pub persist_failures: u64,
    pub classifier_latency_us: u64,
}

impl MetricsSnapshot {
    /// Average classifier latency over classifier calls (successful or not)
    pub fn avg_classifier_latency_us(&self) -> u64 {
        let calls = self.classified + self.failed;
        if calls == 0 {
            0
        } else {
            self.classifier_latency_us / calls
        }
    }

    /// Share of requests that were rejected by validation
    pub fn rejection_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.rejected as f64 / self.total_requests as f64
        }
    }
}
