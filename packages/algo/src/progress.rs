//! Progress Reporting
//!
//! Read-only views over a profile: the progression label and the summary
//! served to learners.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::history::{validate_decay, AnswerHistory};
use crate::profile::LearnerProfile;
use crate::types::{Level, PROGRESSION_MIN_HISTORY, PROGRESSION_WINDOW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progression {
    #[serde(rename = "insufficient data")]
    InsufficientData,
    #[serde(rename = "excellent")]
    Excellent,
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "fair")]
    Fair,
    #[serde(rename = "needs effort")]
    NeedsEffort,
}

impl Progression {
    pub fn label(&self) -> &'static str {
        match self {
            Self::InsufficientData => "insufficient data",
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsEffort => "needs effort",
        }
    }

    fn from_rate(rate: f64) -> Self {
        if rate >= 0.8 {
            Self::Excellent
        } else if rate >= 0.6 {
            Self::Good
        } else if rate >= 0.4 {
            Self::Fair
        } else {
            Self::NeedsEffort
        }
    }
}

pub fn classify_progression(history: &AnswerHistory) -> Progression {
    if history.len() < PROGRESSION_MIN_HISTORY {
        return Progression::InsufficientData;
    }
    history
        .recent_success_rate(PROGRESSION_WINDOW)
        .map_or(Progression::InsufficientData, Progression::from_rate)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub level: Level,
    pub level_label: String,
    pub total_answered: u64,
    /// Rounded to one decimal place.
    pub accuracy_pct: f64,
    pub weak_subjects: Vec<String>,
    pub progression: Progression,
    pub weighted_score: f64,
}

pub fn summarize(profile: &LearnerProfile, decay: f64) -> Result<ProgressSummary, ValidationError> {
    let decay = validate_decay(decay)?;
    let level = profile.current_level();

    Ok(ProgressSummary {
        level,
        level_label: level.label().to_string(),
        total_answered: profile.total_answered(),
        accuracy_pct: round_to_tenth(profile.accuracy_pct()),
        weak_subjects: profile.weak_subjects().as_slice().to_vec(),
        progression: classify_progression(profile.history()),
        weighted_score: profile.history().weighted_score(decay),
    })
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
