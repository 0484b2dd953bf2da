//! Learner Profile
//!
//! Per-learner state and the answer-update rule:
//!
//! 1. bump counters
//! 2. append to the bounded history
//! 3. re-evaluate the answered subject's weak flag
//! 4. move the level, by smoothing toward the prediction when there is one or
//!    by the recent-streak rule otherwise

use serde::Serialize;

use crate::error::PredictError;
use crate::estimator::{estimator_for, Estimate, LevelSource};
use crate::history::AnswerHistory;
use crate::types::{AnswerRecord, Level};
use crate::weak_subjects::{WeakSubjectChange, WeakSubjects};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProfile {
    current_level: Level,
    total_answered: u64,
    total_correct: u64,
    history: AnswerHistory,
    weak_subjects: WeakSubjects,
}

/// What a single `record_answer` call changed.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelUpdate {
    pub previous: Level,
    pub current: Level,
    pub source: LevelSource,
    pub weak_subject: WeakSubjectChange,
    /// Flags dropped because their answers left the history window.
    pub expired_weak_subjects: Vec<String>,
    /// Why the predictor could not be used, when it could not.
    pub predictor_error: Option<PredictError>,
}

impl LevelUpdate {
    pub fn level_changed(&self) -> bool {
        self.previous != self.current
    }
}

impl LearnerProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(level: Level) -> Self {
        Self {
            current_level: level,
            ..Self::default()
        }
    }

    pub fn current_level(&self) -> Level {
        self.current_level
    }

    pub fn total_answered(&self) -> u64 {
        self.total_answered
    }

    pub fn total_correct(&self) -> u64 {
        self.total_correct
    }

    pub fn history(&self) -> &AnswerHistory {
        &self.history
    }

    pub fn weak_subjects(&self) -> &WeakSubjects {
        &self.weak_subjects
    }

    /// Lifetime accuracy as a percentage; 0.0 before the first answer.
    pub fn accuracy_pct(&self) -> f64 {
        if self.total_answered == 0 {
            0.0
        } else {
            self.total_correct as f64 / self.total_answered as f64 * 100.0
        }
    }

    pub fn record_answer(&mut self, record: AnswerRecord, estimate: Estimate) -> LevelUpdate {
        self.total_answered += 1;
        if record.is_correct() {
            self.total_correct += 1;
        }

        let subject = record.subject().to_string();
        self.history.push(record);

        let expired_weak_subjects = self.weak_subjects.retain_observed(&self.history);
        let weak_subject = self.weak_subjects.observe(&subject, &self.history);

        let estimator = estimator_for(&estimate);
        let previous = self.current_level;
        self.current_level = estimator.next_level(previous, &self.history);

        LevelUpdate {
            previous,
            current: self.current_level,
            source: estimator.source(),
            weak_subject,
            expired_weak_subjects,
            predictor_error: match estimate {
                Estimate::Unavailable(err) => Some(err),
                Estimate::Predicted(_) => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_LEVEL;
    use proptest::prelude::*;

    fn answer(id: i64, correct: bool, subject: &str) -> AnswerRecord {
        AnswerRecord::new(id, correct, 30.0, subject).unwrap()
    }

    fn no_predictor() -> Estimate {
        Estimate::Unavailable(PredictError::NotLoaded)
    }

    #[test]
    fn test_new_profile_defaults() {
        let profile = LearnerProfile::new();
        assert_eq!(profile.current_level().get(), DEFAULT_LEVEL);
        assert_eq!(profile.total_answered(), 0);
        assert_eq!(profile.total_correct(), 0);
        assert!(profile.history().is_empty());
        assert!(profile.weak_subjects().is_empty());
        assert_eq!(profile.accuracy_pct(), 0.0);
    }

    #[test]
    fn test_counters_track_answers() {
        let mut profile = LearnerProfile::new();
        profile.record_answer(answer(1, true, "math"), no_predictor());
        profile.record_answer(answer(2, false, "math"), no_predictor());
        profile.record_answer(answer(3, true, "algo"), no_predictor());

        assert_eq!(profile.total_answered(), 3);
        assert_eq!(profile.total_correct(), 2);
        assert!((profile.accuracy_pct() - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_promotes_after_three_correct() {
        let mut profile = LearnerProfile::new();
        let first = profile.record_answer(answer(1, true, "math"), no_predictor());
        profile.record_answer(answer(2, true, "math"), no_predictor());
        let third = profile.record_answer(answer(3, true, "math"), no_predictor());

        assert!(!first.level_changed());
        assert_eq!(third.source, LevelSource::Fallback);
        assert_eq!(third.previous.get(), 2);
        assert_eq!(third.current.get(), 3);
        assert_eq!(third.predictor_error, Some(PredictError::NotLoaded));
    }

    #[test]
    fn test_fallback_demotes_and_floors() {
        let mut profile = LearnerProfile::with_level(Level::MIN);
        for id in 0..3 {
            profile.record_answer(answer(id, false, "python"), no_predictor());
        }
        assert_eq!(profile.current_level(), Level::MIN);

        let mut profile = LearnerProfile::new();
        for id in 0..3 {
            profile.record_answer(answer(id, false, "python"), no_predictor());
        }
        assert_eq!(profile.current_level().get(), 1);
    }

    #[test]
    fn test_fallback_holds_on_two_of_three() {
        let mut profile = LearnerProfile::new();
        profile.record_answer(answer(1, true, "math"), no_predictor());
        profile.record_answer(answer(2, true, "math"), no_predictor());
        let update = profile.record_answer(answer(3, false, "math"), no_predictor());
        assert!(!update.level_changed());
        assert_eq!(profile.current_level().get(), 2);
    }

    #[test]
    fn test_prediction_is_smoothed() {
        let mut profile = LearnerProfile::new();
        let update = profile.record_answer(
            answer(1, true, "math"),
            Estimate::Predicted(Level::new(5).unwrap()),
        );
        assert_eq!(update.source, LevelSource::Predictor);
        assert_eq!(update.current.get(), 3);
        assert_eq!(update.predictor_error, None);
    }

    #[test]
    fn test_predictor_failure_uses_fallback_for_that_event_only() {
        let mut profile = LearnerProfile::new();
        profile.record_answer(answer(1, true, "math"), no_predictor());
        profile.record_answer(answer(2, true, "math"), no_predictor());
        let failed = profile.record_answer(
            answer(3, true, "math"),
            Estimate::Unavailable(PredictError::Internal("boom".into())),
        );
        assert_eq!(failed.source, LevelSource::Fallback);
        assert_eq!(failed.current.get(), 3);

        let predicted = profile.record_answer(
            answer(4, true, "math"),
            Estimate::Predicted(Level::new(3).unwrap()),
        );
        assert_eq!(predicted.source, LevelSource::Predictor);
        assert_eq!(predicted.current.get(), 3);
    }

    #[test]
    fn test_weak_subject_flagged_in_update() {
        let mut profile = LearnerProfile::new();
        profile.record_answer(answer(1, false, "algo"), no_predictor());
        profile.record_answer(answer(2, false, "algo"), no_predictor());
        let update = profile.record_answer(answer(3, false, "algo"), no_predictor());
        assert_eq!(update.weak_subject, WeakSubjectChange::Flagged);
        assert_eq!(profile.weak_subjects().first(), Some("algo"));
    }

    #[test]
    fn test_history_keeps_latest_fifty() {
        let mut profile = LearnerProfile::new();
        for id in 0..51 {
            profile.record_answer(answer(id, id % 2 == 0, "math"), no_predictor());
        }
        let history = profile.history();
        assert_eq!(history.len(), AnswerHistory::CAPACITY);
        assert!(history.iter().all(|r| r.question_id() != 0));
        assert_eq!(history.last().unwrap().question_id(), 50);
        assert_eq!(profile.total_answered(), 51);
    }

    #[test]
    fn test_snapshot_serializes_capped_history() {
        let mut profile = LearnerProfile::new();
        for id in 0..60 {
            profile.record_answer(answer(id, true, "algo"), no_predictor());
        }
        let snapshot = serde_json::to_value(&profile).unwrap();
        assert_eq!(snapshot["totalAnswered"], 60);
        let history = snapshot["history"].as_array().unwrap();
        assert_eq!(history.len(), AnswerHistory::CAPACITY);
        assert_eq!(history[0]["questionId"], 10);
        assert_eq!(history[0]["responseTimeSecs"], 30.0);
    }

    fn arb_event() -> impl Strategy<Value = (bool, Option<u8>, usize)> {
        (any::<bool>(), proptest::option::of(1u8..=5), 0usize..4)
    }

    proptest! {
        #[test]
        fn prop_level_and_history_invariants(events in proptest::collection::vec(arb_event(), 0..120)) {
            let subjects = ["python", "algo", "math", "database"];
            let mut profile = LearnerProfile::new();

            for (i, (correct, predicted, subject_idx)) in events.into_iter().enumerate() {
                let estimate = match predicted {
                    Some(level) => Estimate::Predicted(Level::new(level).unwrap()),
                    None => Estimate::Unavailable(PredictError::NotLoaded),
                };
                profile.record_answer(answer(i as i64, correct, subjects[subject_idx]), estimate);

                let level = profile.current_level().get();
                prop_assert!((1..=5).contains(&level));
                prop_assert!(profile.history().len() <= AnswerHistory::CAPACITY);
                for weak in profile.weak_subjects().iter() {
                    prop_assert!(profile.history().subject_stats(weak).attempts >= 3);
                }
            }
        }
    }
}
