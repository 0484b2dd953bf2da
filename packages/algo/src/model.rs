//! Pre-trained Difficulty Model
//!
//! Nearest-centroid classifier over `(score, response_time)` per subject. The
//! centroids come from an offline training run and are shipped as JSON:
//!
//! ```json
//! {
//!   "timeScale": 10.0,
//!   "subjects": ["python", "math"],
//!   "centroids": [
//!     { "subject": "python", "level": 1, "score": 1.0, "responseTimeSecs": 23.0 }
//!   ]
//! }
//! ```
//!
//! `subjects` lists every label the model was fitted with; it defaults to the
//! subjects that have centroids.

use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, PredictError};
use crate::estimator::{AnswerFeatures, DifficultyPredictor};
use crate::types::Level;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Centroid {
    pub subject: String,
    pub level: u8,
    pub score: f64,
    pub response_time_secs: f64,
}

/// On-disk artifact layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentroidArtifact {
    pub time_scale: f64,
    #[serde(default)]
    pub subjects: Vec<String>,
    pub centroids: Vec<Centroid>,
}

#[derive(Debug, Clone, Copy)]
struct Point {
    level: Level,
    score: f64,
    time: f64,
}

#[derive(Debug, Clone)]
pub struct CentroidPredictor {
    time_scale: f64,
    by_subject: BTreeMap<String, Vec<Point>>,
}

impl CentroidPredictor {
    pub fn from_artifact(artifact: CentroidArtifact) -> Result<Self, ModelError> {
        if !artifact.time_scale.is_finite() || artifact.time_scale <= 0.0 {
            return Err(ModelError::InvalidTimeScale(artifact.time_scale));
        }
        if artifact.centroids.is_empty() {
            return Err(ModelError::Empty);
        }

        let mut by_subject: BTreeMap<String, Vec<Point>> = artifact
            .subjects
            .into_iter()
            .map(|subject| (subject, Vec::new()))
            .collect();

        for centroid in artifact.centroids {
            let level = Level::new(centroid.level).map_err(|_| ModelError::InvalidCentroid {
                subject: centroid.subject.clone(),
                level: centroid.level,
            })?;
            by_subject.entry(centroid.subject).or_default().push(Point {
                level,
                score: centroid.score,
                time: centroid.response_time_secs,
            });
        }
        for points in by_subject.values_mut() {
            points.sort_by_key(|p| p.level);
        }

        Ok(Self {
            time_scale: artifact.time_scale,
            by_subject,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        Self::from_artifact(serde_json::from_str(raw)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        Self::from_artifact(serde_json::from_reader(reader)?)
    }

    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.by_subject.keys().map(String::as_str)
    }

    pub fn centroid_count(&self) -> usize {
        self.by_subject.values().map(Vec::len).sum()
    }
}

impl DifficultyPredictor for CentroidPredictor {
    fn predict(&self, features: &AnswerFeatures) -> Result<Level, PredictError> {
        if !features.score.is_finite() || !(0.0..=1.0).contains(&features.score) {
            return Err(PredictError::MalformedInput(format!("score {}", features.score)));
        }
        if !features.response_time_secs.is_finite() || features.response_time_secs < 0.0 {
            return Err(PredictError::MalformedInput(format!(
                "response time {}",
                features.response_time_secs
            )));
        }

        let points = self
            .by_subject
            .get(&features.subject)
            .ok_or_else(|| PredictError::UnknownSubject(features.subject.clone()))?;

        let mut best: Option<(Level, f64)> = None;
        for point in points {
            let ds = features.score - point.score;
            let dt = (features.response_time_secs - point.time) / self.time_scale;
            let distance = ds * ds + dt * dt;
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((point.level, distance));
            }
        }

        best.map(|(level, _)| level).ok_or_else(|| {
            PredictError::Internal(format!("no centroids for subject {}", features.subject))
        })
    }
}
