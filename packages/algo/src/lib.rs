//! # adaptive-quiz-algo - Adaptive difficulty core
//!
//! Pure Rust engine behind the adaptive quiz service. No I/O, no async, no
//! logging: every operation works on in-memory state and reports what it did
//! through typed return values.
//!
//! ## Module Layout
//!
//! - [`types`] - levels, answer records, constants
//! - [`history`] - bounded answer history and the recency-weighted score
//! - [`weak_subjects`] - weak-subject flags with hysteresis
//! - [`estimator`] - level estimators (smoothed prediction, streak fallback)
//! - [`model`] - nearest-centroid difficulty predictor loaded from JSON
//! - [`profile`] - learner profile and the answer-update rule
//! - [`selection`] - question pool and next-item selection
//! - [`progress`] - progression label and learner summary
//! - [`content`] - question text rendering
//! - [`feedback`] - post-answer feedback strings
//!
//! ## Example
//!
//! ```rust
//! use adaptive_quiz_algo::{
//!     select_item, AnswerRecord, Estimate, Item, LearnerProfile, Level, PredictError,
//! };
//! use rand::SeedableRng;
//!
//! let mut profile = LearnerProfile::new();
//! let record = AnswerRecord::new(1, true, 12.0, "math").unwrap();
//! profile.record_answer(record, Estimate::Unavailable(PredictError::NotLoaded));
//!
//! let pool = vec![Item { id: 1, subject: "math".into(), level: Level::new(2).unwrap() }];
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
//! let selection = select_item(&profile, &pool, None, &mut rng);
//! assert_eq!(selection.item.id, 1);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod content;
pub mod error;
pub mod estimator;
pub mod feedback;
pub mod history;
pub mod model;
pub mod profile;
pub mod progress;
pub mod selection;
pub mod types;
pub mod weak_subjects;

// ============================================================================
// Re-exports
// ============================================================================

pub use types::*;

pub use error::{ModelError, PredictError, ValidationError};

pub use history::{validate_decay, weighted_score, AnswerHistory};

pub use weak_subjects::{WeakSubjectChange, WeakSubjects};

pub use estimator::{
    estimator_for, smooth_level, AnswerFeatures, DifficultyPredictor, Estimate, LevelEstimator,
    LevelSource, RecentStreakRule, SmoothedPrediction,
};

pub use model::{Centroid, CentroidArtifact, CentroidPredictor};

pub use profile::{LearnerProfile, LevelUpdate};

pub use selection::{select_item, Item, QuestionBank, QuestionPool, Selection, SelectionBasis};

pub use progress::{classify_progression, summarize, ProgressSummary, Progression};

pub use content::{Question, CORRECT_OPTION_INDEX, OPTION_COUNT};

pub use feedback::{answer_feedback, format_duration};
