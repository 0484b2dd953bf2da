use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use adaptive_quiz_algo::{
    AnswerFeatures, AnswerRecord, CentroidPredictor, DifficultyPredictor, Estimate, PredictError,
};

use crate::adaptive::{AdaptiveConfig, ArtifactError};

/// Bounded-latency wrapper around the difficulty predictor.
///
/// Predictions run on the blocking pool; a call that does not finish within
/// the timeout, or panics, comes back as an unavailable estimate.
#[derive(Clone)]
pub struct PredictorHandle {
    predictor: Option<Arc<dyn DifficultyPredictor>>,
    timeout: Duration,
}

impl PredictorHandle {
    pub fn new(predictor: Arc<dyn DifficultyPredictor>, timeout: Duration) -> Self {
        Self {
            predictor: Some(predictor),
            timeout,
        }
    }

    pub fn disabled() -> Self {
        Self {
            predictor: None,
            timeout: Duration::ZERO,
        }
    }

    /// Loads the centroid model named by the config. Any failure leaves the
    /// engine on the rule-based fallback.
    pub fn from_config(config: &AdaptiveConfig) -> Self {
        if !config.predictor_enabled {
            tracing::info!("difficulty predictor disabled by configuration");
            return Self::disabled();
        }

        match load_model(&config.model_path) {
            Ok(model) => {
                tracing::info!(
                    path = %config.model_path.display(),
                    centroids = model.centroid_count(),
                    "difficulty predictor loaded"
                );
                Self::new(Arc::new(model), config.predictor_timeout)
            }
            Err(err) => {
                tracing::warn!(
                    path = %config.model_path.display(),
                    error = %err,
                    "difficulty predictor unavailable, using fallback rule"
                );
                Self::disabled()
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.predictor.is_some()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn estimate(&self, record: &AnswerRecord) -> Estimate {
        let Some(predictor) = self.predictor.clone() else {
            return Estimate::Unavailable(PredictError::NotLoaded);
        };

        let features = AnswerFeatures::from(record);
        let task = tokio::task::spawn_blocking(move || predictor.predict(&features));

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result.into(),
            Ok(Err(join_err)) => Estimate::Unavailable(PredictError::Internal(join_err.to_string())),
            Err(_) => Estimate::Unavailable(PredictError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

pub fn load_model(path: &Path) -> Result<CentroidPredictor, ArtifactError> {
    let file = File::open(path)?;
    Ok(CentroidPredictor::from_reader(BufReader::new(file))?)
}
