//! Weak Subject Tracker
//!
//! Flags subjects where a learner keeps failing. A subject is flagged when its
//! success rate drops below 0.4 and cleared only once it climbs back to 0.6;
//! rates in between keep whatever state the subject already had, so borderline
//! performance does not make the flag flicker.

use serde::{Deserialize, Serialize};

use crate::history::AnswerHistory;
use crate::types::{WEAK_CLEAR_THRESHOLD, WEAK_FLAG_THRESHOLD, WEAK_SUBJECT_MIN_SAMPLES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeakSubjectChange {
    Flagged,
    Cleared,
    Unchanged,
}

/// Flagged subjects in flag order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeakSubjects {
    subjects: Vec<String>,
}

impl WeakSubjects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-evaluates `subject` against the answers currently in `history`.
    pub fn observe(&mut self, subject: &str, history: &AnswerHistory) -> WeakSubjectChange {
        let stats = history.subject_stats(subject);
        if stats.attempts < WEAK_SUBJECT_MIN_SAMPLES {
            return WeakSubjectChange::Unchanged;
        }
        let Some(rate) = stats.success_rate() else {
            return WeakSubjectChange::Unchanged;
        };

        let flagged = self.contains(subject);
        if rate < WEAK_FLAG_THRESHOLD && !flagged {
            self.subjects.push(subject.to_string());
            WeakSubjectChange::Flagged
        } else if rate >= WEAK_CLEAR_THRESHOLD && flagged {
            self.subjects.retain(|s| s != subject);
            WeakSubjectChange::Cleared
        } else {
            WeakSubjectChange::Unchanged
        }
    }

    /// Drops flags whose evidence has aged out of the history window.
    pub fn retain_observed(&mut self, history: &AnswerHistory) -> Vec<String> {
        let mut dropped = Vec::new();
        self.subjects.retain(|subject| {
            let keep = history.subject_stats(subject).attempts >= WEAK_SUBJECT_MIN_SAMPLES;
            if !keep {
                dropped.push(subject.clone());
            }
            keep
        });
        dropped
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    /// Highest-priority weak subject.
    pub fn first(&self) -> Option<&str> {
        self.subjects.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}
