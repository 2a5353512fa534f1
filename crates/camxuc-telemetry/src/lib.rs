//! camxuc Telemetry
//!
//! Persistence and observability for camxuc.
//!
//! Provides:
//! - The history store seam with file-backed and in-memory implementations
//! - Request and sentiment counters

pub mod history;
pub mod metrics;

pub use history::{
    timestamp_now, HistoryConfig, HistoryStore, JsonlHistoryStore, MemoryHistoryStore,
    DEFAULT_HISTORY_LIMIT,
};
pub use metrics::{MetricsCollector, MetricsSnapshot};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::history::{HistoryStore, JsonlHistoryStore, MemoryHistoryStore};
    pub use crate::metrics::MetricsCollector;
}
