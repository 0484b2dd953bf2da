//! Common Types and Constants
//!
//! Shared data structures used across all engine modules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ==================== Constants ====================

/// Lowest difficulty level
pub const MIN_LEVEL: u8 = 1;

/// Highest difficulty level
pub const MAX_LEVEL: u8 = 5;

/// Level assigned to a freshly created profile (intermediate)
pub const DEFAULT_LEVEL: u8 = 2;

/// Number of answers retained per learner
pub const HISTORY_CAPACITY: usize = 50;

/// Weight given to the predicted level when blending with the running estimate
pub const SMOOTHING_WEIGHT: f64 = 0.3;

/// Minimum answers in a subject before it can be flagged or cleared
pub const WEAK_SUBJECT_MIN_SAMPLES: usize = 3;

/// Success rate below which a subject becomes weak
pub const WEAK_FLAG_THRESHOLD: f64 = 0.4;

/// Success rate at or above which a weak subject is cleared
pub const WEAK_CLEAR_THRESHOLD: f64 = 0.6;

/// Answers inspected by the fallback heuristic
pub const FALLBACK_WINDOW: usize = 3;

/// Success rate (strict) below which the fallback heuristic lowers the level
pub const FALLBACK_DEMOTE_THRESHOLD: f64 = 0.34;

/// Answers required before progression is classified
pub const PROGRESSION_MIN_HISTORY: usize = 5;

/// Answers inspected when classifying progression
pub const PROGRESSION_WINDOW: usize = 10;

/// Default decay for the recency-weighted score
pub const DEFAULT_DECAY: f64 = 0.9;

/// Question id of the designated fallback item
pub const FALLBACK_QUESTION_ID: i64 = -1;

/// Subject used by the fallback item
pub const DEFAULT_SUBJECT: &str = "python";

// ==================== Level ====================

/// Difficulty level in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const MIN: Level = Level(MIN_LEVEL);
    pub const MAX: Level = Level(MAX_LEVEL);

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if (MIN_LEVEL..=MAX_LEVEL).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::LevelOutOfRange(i64::from(value)))
        }
    }

    /// Builds a level from any integer, clamping into `1..=5`.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(i64::from(MIN_LEVEL), i64::from(MAX_LEVEL)) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn raised(self) -> Self {
        Self::clamped(i64::from(self.0) + 1)
    }

    pub fn lowered(self) -> Self {
        Self::clamped(i64::from(self.0) - 1)
    }

    /// Accepted selection window `{L-1, L, L+1}` clamped to the valid range.
    pub fn window(self) -> (Level, Level) {
        (self.lowered(), self.raised())
    }

    pub fn in_window_of(self, center: Level) -> bool {
        let (low, high) = center.window();
        self >= low && self <= high
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Beginner",
            2 => "Intermediate",
            3 => "Advanced",
            4 => "Expert",
            _ => "Master",
        }
    }

    pub fn all() -> impl Iterator<Item = Level> {
        (MIN_LEVEL..=MAX_LEVEL).map(Level)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self(DEFAULT_LEVEL)
    }
}

impl TryFrom<u8> for Level {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==================== Answer Types ====================

/// One answered question. Immutable once appended to a history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    question_id: i64,
    correct: bool,
    response_time_secs: f64,
    subject: String,
}

impl AnswerRecord {
    pub fn new(
        question_id: i64,
        correct: bool,
        response_time_secs: f64,
        subject: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if !response_time_secs.is_finite() || response_time_secs <= 0.0 {
            return Err(ValidationError::InvalidResponseTime(response_time_secs));
        }
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(ValidationError::EmptySubject);
        }
        Ok(Self {
            question_id,
            correct,
            response_time_secs,
            subject,
        })
    }

    pub fn question_id(&self) -> i64 {
        self.question_id
    }

    pub fn is_correct(&self) -> bool {
        self.correct
    }

    /// Correctness as a 0.0/1.0 score.
    pub fn score(&self) -> f64 {
        if self.correct {
            1.0
        } else {
            0.0
        }
    }

    pub fn response_time_secs(&self) -> f64 {
        self.response_time_secs
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}

/// Attempt counters for one subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectStats {
    pub attempts: usize,
    pub correct: usize,
}

impl SubjectStats {
    pub fn success_rate(&self) -> Option<f64> {
        if self.attempts == 0 {
            None
        } else {
            Some(self.correct as f64 / self.attempts as f64)
        }
    }
}
