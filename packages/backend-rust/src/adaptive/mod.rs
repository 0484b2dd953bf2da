pub mod config;
pub mod engine;
pub mod predictor;
pub mod store;

pub use config::AdaptiveConfig;
pub use engine::{validate_learner_id, AdaptiveEngine};
pub use predictor::PredictorHandle;
pub use store::ProfileStore;

use adaptive_quiz_algo::{ModelError, ValidationError};
use thiserror::Error;

/// Caller-facing failures of the engine API. All of them are input problems;
/// predictor and selection failures are recovered internally.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("unknown subject: {0}")]
    UnknownSubject(String),
    #[error("learner id must not be empty")]
    EmptyLearnerId,
}

/// Failure to read a JSON artifact (model or question bank) from disk.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Model(#[from] ModelError),
}
