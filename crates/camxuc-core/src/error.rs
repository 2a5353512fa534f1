//! Error types for camxuc

/// Result type alias using camxuc's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for camxuc operations
///
/// Input validation never produces an `Error`; rejected input is reported
/// through [`crate::ValidationOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Classifier unavailable or returned an unusable response
    #[error("classifier error: {0}")]
    Classifier(String),

    /// History store errors
    #[error("history error: {0}")]
    History(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Remote inference transport errors
    #[error("http error: {0}")]
    Http(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new history error
    pub fn history(msg: impl Into<String>) -> Self {
        Self::History(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new http error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
