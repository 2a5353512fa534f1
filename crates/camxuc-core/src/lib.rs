//! camxuc Core
//!
//! Types shared across the camxuc components.
//!
//! This crate provides:
//! - The canonical sentiment categories and their display forms
//! - Validation outcomes and rejection reasons
//! - History records and the success payload handed to presentation
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    ClassificationPayload, HistoryRecord, RejectReason, Sentiment, ValidationOutcome,
    TIMESTAMP_FORMAT,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        ClassificationPayload, HistoryRecord, RejectReason, Sentiment, ValidationOutcome,
    };
}
