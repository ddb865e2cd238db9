//! Error types for spam-rs

use thiserror::Error;

/// Result type alias for spam filter operations
pub type Result<T> = std::result::Result<T, SpamError>;

/// Spam filter error types
#[derive(Error, Debug)]
pub enum SpamError {
    /// Malformed input to training, encoding, splitting or scoring
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Prediction or evaluation requested before training
    #[error("Model has not been trained")]
    UntrainedModel,

    /// Label outside of {spam, ham}
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Dataset ingestion error
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// CSV parsing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
