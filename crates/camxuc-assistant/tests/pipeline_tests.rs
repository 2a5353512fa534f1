//! End-to-end request pipeline tests with mock collaborators

use async_trait::async_trait;
use camxuc_assistant::{PipelineState, Presenter, RequestOutcome, RequestPipeline};
use camxuc_classifiers::{ClassificationResult, Classifier, Normalizer, SentimentClassifier};
use camxuc_core::{
    ClassificationPayload, Error, HistoryRecord, RejectReason, Result, Sentiment,
};
use camxuc_telemetry::{HistoryStore, JsonlHistoryStore, MemoryHistoryStore};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// Returns a fixed label and remembers what it was asked to classify
struct MockClassifier {
    label: String,
    score: f32,
    calls: AtomicU32,
    seen: Mutex<Vec<String>>,
}

impl MockClassifier {
    fn new(label: &str, score: f32) -> Self {
        Self {
            label: label.to_string(),
            score,
            calls: AtomicU32::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_seen(&self) -> Option<String> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(text.to_string());
        Ok(ClassificationResult::new(self.label.clone(), self.score))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Fails every call
struct FailingClassifier;

#[async_trait]
impl Classifier for FailingClassifier {
    async fn classify(&self, _text: &str) -> Result<ClassificationResult> {
        Err(Error::classifier("Empty classifier response"))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Store that is always unavailable
struct UnavailableStore;

impl HistoryStore for UnavailableStore {
    fn append(&self, _text: &str, _sentiment: Sentiment, _timestamp: &str) -> Result<HistoryRecord> {
        Err(Error::history("store unavailable"))
    }

    fn query_recent(&self, _limit: usize) -> Result<Vec<HistoryRecord>> {
        Err(Error::history("store unavailable"))
    }
}

#[derive(Default)]
struct RecordingPresenter {
    rejected: Vec<RejectReason>,
    errors: Vec<String>,
    results: Vec<ClassificationPayload>,
    histories: Vec<Vec<HistoryRecord>>,
}

impl Presenter for RecordingPresenter {
    fn show_rejected(&mut self, reason: RejectReason) -> Result<()> {
        self.rejected.push(reason);
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> Result<()> {
        self.errors.push(message.to_string());
        Ok(())
    }

    fn show_result(&mut self, payload: &ClassificationPayload) -> Result<()> {
        self.results.push(payload.clone());
        Ok(())
    }

    fn show_history(&mut self, records: &[HistoryRecord]) -> Result<()> {
        self.histories.push(records.to_vec());
        Ok(())
    }
}

fn pipeline_with(
    classifier: Arc<dyn Classifier>,
    store: Arc<dyn HistoryStore>,
) -> RequestPipeline {
    RequestPipeline::new(classifier, store, Normalizer::new().unwrap())
}

#[tokio::test]
async fn test_end_to_end_positive_sentence() {
    let classifier = Arc::new(MockClassifier::new("LABEL_2", 0.97));
    let store = Arc::new(MemoryHistoryStore::new());
    let pipeline = pipeline_with(classifier.clone(), store.clone());
    let mut presenter = RecordingPresenter::default();

    let outcome = pipeline.handle("Hôm nay tôi rất vui", &mut presenter).await;

    assert_eq!(outcome.final_state(), PipelineState::Persisting);
    assert_eq!(classifier.calls(), 1);
    assert_eq!(classifier.last_seen().as_deref(), Some("hôm nay tôi rất vui"));

    let payload = outcome.payload().unwrap();
    assert_eq!(payload.text, "Hôm nay tôi rất vui");
    assert_eq!(payload.sentiment, Sentiment::Positive);
    assert_eq!(payload.confidence_score, 0.97);
    assert_eq!(payload.normalized_text, "hôm nay tôi rất vui");

    assert_eq!(presenter.results.len(), 1);
    let history = presenter.histories.last().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].text, "Hôm nay tôi rất vui");
    assert_eq!(history[0].sentiment, Sentiment::Positive);
}

#[tokio::test]
async fn test_rejected_input_skips_classifier_and_store() {
    let classifier = Arc::new(MockClassifier::new("LABEL_2", 0.9));
    let store = Arc::new(MemoryHistoryStore::new());
    let pipeline = pipeline_with(classifier.clone(), store.clone());
    let mut presenter = RecordingPresenter::default();

    let outcome = pipeline.handle("   ", &mut presenter).await;
    assert_eq!(outcome, RequestOutcome::Rejected(RejectReason::Empty));

    let outcome = pipeline.handle("xyz", &mut presenter).await;
    assert_eq!(outcome, RequestOutcome::Rejected(RejectReason::TooFewWords));
    assert_eq!(outcome.final_state(), PipelineState::Rejected);

    assert_eq!(classifier.calls(), 0);
    assert!(store.is_empty());
    assert_eq!(
        presenter.rejected,
        vec![RejectReason::Empty, RejectReason::TooFewWords]
    );
    assert_eq!(pipeline.metrics().snapshot().rejected, 2);
}

#[tokio::test]
async fn test_single_emotion_word_is_classified() {
    let classifier = Arc::new(MockClassifier::new("NEG", 0.8));
    let store = Arc::new(MemoryHistoryStore::new());
    let pipeline = pipeline_with(classifier.clone(), store.clone());

    let outcome = pipeline.process("buồn").await;
    assert_eq!(outcome.payload().unwrap().sentiment, Sentiment::Negative);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_idiom_is_normalized_before_classification() {
    let classifier = Arc::new(MockClassifier::new("POS", 0.6));
    let store = Arc::new(MemoryHistoryStore::new());
    let pipeline = pipeline_with(classifier.clone(), store.clone());

    let outcome = pipeline.process("Phim này buồn cười quá").await;

    assert_eq!(classifier.last_seen().as_deref(), Some("phim này hài hước quá"));
    let payload = outcome.payload().unwrap();
    assert_eq!(payload.text, "Phim này buồn cười quá");
    assert!(!payload.normalized_text.contains("buồn cười"));

    // History keeps the text as typed
    let history = pipeline.recent_history().unwrap();
    assert_eq!(history[0].text, "Phim này buồn cười quá");
}

#[tokio::test]
async fn test_classifier_failure_writes_nothing_and_pipeline_recovers() {
    let store = Arc::new(MemoryHistoryStore::new());
    let failing = pipeline_with(Arc::new(FailingClassifier), store.clone());
    let mut presenter = RecordingPresenter::default();

    let outcome = failing.handle("tôi rất vui", &mut presenter).await;
    assert_eq!(outcome.final_state(), PipelineState::Failed);
    assert!(store.is_empty());
    assert_eq!(presenter.errors.len(), 1);
    assert!(presenter.errors[0].starts_with("Lỗi khi phân tích:"));
    assert_eq!(failing.metrics().snapshot().failed, 1);

    // A later valid request on the same store is unaffected
    let working = pipeline_with(Arc::new(MockClassifier::new("LABEL_0", 0.7)), store.clone());
    let outcome = working.process("tôi rất buồn").await;
    assert_eq!(outcome.payload().unwrap().sentiment, Sentiment::Negative);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_store_failure_is_reported_not_fatal() {
    let pipeline = pipeline_with(
        Arc::new(MockClassifier::new("LABEL_1", 0.4)),
        Arc::new(UnavailableStore),
    );
    let mut presenter = RecordingPresenter::default();

    let outcome = pipeline.handle("thời tiết bình thường", &mut presenter).await;
    assert_eq!(outcome.final_state(), PipelineState::Persisting);

    match &outcome {
        RequestOutcome::Classified {
            payload,
            record,
            persist_error,
        } => {
            assert_eq!(payload.sentiment, Sentiment::Neutral);
            assert!(record.is_none());
            assert!(persist_error.as_deref().unwrap().contains("store unavailable"));
        }
        other => panic!("expected classified outcome, got {other:?}"),
    }

    assert_eq!(presenter.results.len(), 1);
    // One for the failed append, one for the failed history query
    assert_eq!(presenter.errors.len(), 2);
    assert!(presenter.histories.is_empty());
    assert_eq!(pipeline.metrics().snapshot().persist_failures, 1);
}

#[tokio::test]
async fn test_unrecognized_label_defaults_to_neutral() {
    let pipeline = pipeline_with(
        Arc::new(MockClassifier::new("mystery", 0.99)),
        Arc::new(MemoryHistoryStore::new()),
    );

    let outcome = pipeline.process("tôi đi học").await;
    assert_eq!(outcome.payload().unwrap().sentiment, Sentiment::Neutral);
}

#[tokio::test]
async fn test_history_shows_fifty_most_recent() {
    let store = Arc::new(MemoryHistoryStore::new());
    let pipeline = pipeline_with(Arc::new(MockClassifier::new("LABEL_2", 0.9)), store.clone());

    for i in 0..55 {
        pipeline.process(&format!("câu số {i}")).await;
    }

    let mut presenter = RecordingPresenter::default();
    pipeline.handle("câu cuối cùng", &mut presenter).await;

    let history = presenter.histories.last().unwrap();
    assert_eq!(store.len(), 56);
    assert_eq!(history.len(), 50);
    assert_eq!(history[0].text, "câu cuối cùng");
    assert_eq!(history[0].id, 56);
}

#[tokio::test]
async fn test_lexicon_backend_with_file_store() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let store = Arc::new(JsonlHistoryStore::open(temp_dir.path().join("sentiments.jsonl")).unwrap());
    let pipeline = pipeline_with(Arc::new(SentimentClassifier::new().unwrap()), store);

    let happy = pipeline.process("Hôm nay tôi rất vui").await;
    assert_eq!(happy.payload().unwrap().sentiment, Sentiment::Positive);

    let funny = pipeline.process("phim này buồn cười quá").await;
    assert_eq!(funny.payload().unwrap().sentiment, Sentiment::Positive);

    let sad = pipeline.process("tôi k thích phim này").await;
    assert_eq!(sad.payload().unwrap().sentiment, Sentiment::Negative);

    let history = pipeline.recent_history().unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].text, "tôi k thích phim này");

    let snapshot = pipeline.metrics().snapshot();
    assert_eq!(snapshot.classified, 3);
    assert_eq!(snapshot.positive, 2);
    assert_eq!(snapshot.negative, 1);
}
