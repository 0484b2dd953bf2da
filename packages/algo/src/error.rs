//! Error types shared by the engine modules.

use thiserror::Error;

/// Caller-supplied input the engine refuses to interpret.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("level {0} is outside 1..=5")]
    LevelOutOfRange(i64),
    #[error("response time must be a positive number of seconds, got {0}")]
    InvalidResponseTime(f64),
    #[error("subject must not be empty")]
    EmptySubject,
    #[error("decay must be within (0, 1), got {0}")]
    InvalidDecay(f64),
}

/// Failure of the statistical predictor. Always recoverable by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("predictor not loaded")]
    NotLoaded,
    #[error("unknown subject label: {0}")]
    UnknownSubject(String),
    #[error("malformed features: {0}")]
    MalformedInput(String),
    #[error("predictor timed out after {0} ms")]
    Timeout(u64),
    #[error("predictor failed: {0}")]
    Internal(String),
}

/// Failure to load a pre-trained model artifact.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model decode failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("model has no centroids")]
    Empty,
    #[error("time scale must be positive, got {0}")]
    InvalidTimeScale(f64),
    #[error("centroid for subject {subject} has invalid level {level}")]
    InvalidCentroid { subject: String, level: u8 },
}
