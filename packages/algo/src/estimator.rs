//! Level Estimation
//!
//! Two ways of moving a learner's level after an answer:
//!
//! - [`SmoothedPrediction`] blends a statistical prediction into the running
//!   estimate with a fixed weight.
//! - [`RecentStreakRule`] is the rule-based fallback looking at the last three
//!   answers, used whenever no prediction is available.
//!
//! Which one runs is decided by [`Estimate`], the typed outcome of asking a
//! [`DifficultyPredictor`].

use serde::{Deserialize, Serialize};

use crate::error::PredictError;
use crate::history::AnswerHistory;
use crate::types::{
    AnswerRecord, Level, FALLBACK_DEMOTE_THRESHOLD, FALLBACK_WINDOW, SMOOTHING_WEIGHT,
};

/// Inputs the statistical predictor sees for one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerFeatures {
    pub score: f64,
    pub response_time_secs: f64,
    pub subject: String,
}

impl From<&AnswerRecord> for AnswerFeatures {
    fn from(record: &AnswerRecord) -> Self {
        Self {
            score: record.score(),
            response_time_secs: record.response_time_secs(),
            subject: record.subject().to_string(),
        }
    }
}

/// Pre-trained model mapping one answer to a suggested level.
pub trait DifficultyPredictor: Send + Sync {
    fn predict(&self, features: &AnswerFeatures) -> Result<Level, PredictError>;
}

/// Outcome of consulting the predictor for one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Estimate {
    Predicted(Level),
    Unavailable(PredictError),
}

impl From<Result<Level, PredictError>> for Estimate {
    fn from(result: Result<Level, PredictError>) -> Self {
        match result {
            Ok(level) => Estimate::Predicted(level),
            Err(err) => Estimate::Unavailable(err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelSource {
    Predictor,
    Fallback,
}

impl LevelSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Predictor => "predictor",
            Self::Fallback => "fallback",
        }
    }
}

/// Produces the next level from the current one and the updated history.
pub trait LevelEstimator {
    fn source(&self) -> LevelSource;

    fn next_level(&self, current: Level, history: &AnswerHistory) -> Level;
}

/// Exponential smoothing toward a predicted level.
#[derive(Debug, Clone, Copy)]
pub struct SmoothedPrediction {
    predicted: Level,
    weight: f64,
}

impl SmoothedPrediction {
    pub fn new(predicted: Level) -> Self {
        Self {
            predicted,
            weight: SMOOTHING_WEIGHT,
        }
    }
}

impl LevelEstimator for SmoothedPrediction {
    fn source(&self) -> LevelSource {
        LevelSource::Predictor
    }

    fn next_level(&self, current: Level, _history: &AnswerHistory) -> Level {
        smooth_level(current, self.predicted, self.weight)
    }
}

/// `round((1 - w) * current + w * predicted)`, clamped to the level range.
pub fn smooth_level(current: Level, predicted: Level, weight: f64) -> Level {
    let blended =
        (1.0 - weight) * f64::from(current.get()) + weight * f64::from(predicted.get());
    Level::clamped(blended.round() as i64)
}

/// Rule-based fallback over the last three answers: all correct goes up a
/// level, a success rate under 0.34 goes down one.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecentStreakRule;

impl LevelEstimator for RecentStreakRule {
    fn source(&self) -> LevelSource {
        LevelSource::Fallback
    }

    fn next_level(&self, current: Level, history: &AnswerHistory) -> Level {
        if history.len() < FALLBACK_WINDOW {
            return current;
        }
        let Some(rate) = history.recent_success_rate(FALLBACK_WINDOW) else {
            return current;
        };

        if rate >= 1.0 {
            current.raised()
        } else if rate < FALLBACK_DEMOTE_THRESHOLD {
            current.lowered()
        } else {
            current
        }
    }
}

/// Picks the estimator matching `estimate`.
pub fn estimator_for(estimate: &Estimate) -> Box<dyn LevelEstimator> {
    match estimate {
        Estimate::Predicted(level) => Box::new(SmoothedPrediction::new(*level)),
        Estimate::Unavailable(_) => Box::new(RecentStreakRule),
    }
}
