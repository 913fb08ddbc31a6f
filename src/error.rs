//! Error types for the money tracker library.

/// All errors that can occur when using the money tracker.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage backend failed to read or write the transaction slot.
    #[error("storage error: {0}")]
    Storage(Box<dyn core::error::Error + Send + Sync>),

    /// A month string did not match the `YYYY-MM` format.
    #[error("invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    /// A category label did not name one of the twelve known categories.
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

/// Convenience alias for results produced by this crate.
pub type Result<T, E = TrackerError> = core::result::Result<T, E>;
