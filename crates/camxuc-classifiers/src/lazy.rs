//! Lazily constructed classifier
//!
//! Model backends are expensive to build. [`LazyClassifier`] builds its inner
//! classifier on the first `classify` call and reuses it for the rest of the
//! process. There is no teardown.

use crate::config::ClassifierConfig;
use crate::{ClassificationResult, Classifier};
use camxuc_core::Result;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

type Factory = Box<dyn Fn() -> Result<Arc<dyn Classifier>> + Send + Sync>;

pub struct LazyClassifier {
    name: String,
    factory: Factory,
    inner: OnceCell<Arc<dyn Classifier>>,
}

impl LazyClassifier {
    /// Wrap an arbitrary factory
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn Classifier>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            factory: Box::new(factory),
            inner: OnceCell::new(),
        }
    }

    /// Build from configuration on first use
    pub fn from_config(config: ClassifierConfig) -> Self {
        Self::new("lazy", move || config.build())
    }

    /// Whether the inner classifier has been built yet
    pub fn is_initialized(&self) -> bool {
        self.inner.initialized()
    }

    /// Get the inner classifier, building it if needed.
    ///
    /// A failed build is not cached; the next call tries again.
    pub async fn get(&self) -> Result<&Arc<dyn Classifier>> {
        self.inner
            .get_or_try_init(|| async {
                info!("Initializing classifier");
                (self.factory)()
            })
            .await
    }
}

#[async_trait::async_trait]
impl Classifier for LazyClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult> {
        self.get().await?.classify(text).await
    }

    fn name(&self) -> &str {
        self.inner
            .get()
            .map(|classifier| classifier.name())
            .unwrap_or(self.name.as_str())
    }
}
