//! Answer History
//!
//! Bounded, most-recent-last log of a learner's answers. Inserting past
//! capacity evicts the oldest entry.

use std::collections::VecDeque;

use serde::Serialize;

use crate::error::ValidationError;
use crate::types::{AnswerRecord, SubjectStats, HISTORY_CAPACITY};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnswerHistory {
    entries: VecDeque<AnswerRecord>,
}

impl AnswerHistory {
    pub const CAPACITY: usize = HISTORY_CAPACITY;

    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(Self::CAPACITY),
        }
    }

    /// Appends a record, returning the evicted oldest entry when full.
    pub fn push(&mut self, record: AnswerRecord) -> Option<AnswerRecord> {
        let evicted = if self.entries.len() >= Self::CAPACITY {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(record);
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest-first iteration.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &AnswerRecord> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn first(&self) -> Option<&AnswerRecord> {
        self.entries.front()
    }

    pub fn last(&self) -> Option<&AnswerRecord> {
        self.entries.back()
    }

    /// The last `n` entries (fewer if the history is shorter), oldest-first.
    pub fn recent(&self, n: usize) -> impl DoubleEndedIterator<Item = &AnswerRecord> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip)
    }

    /// Success rate over the last `n` entries; `None` when empty.
    pub fn recent_success_rate(&self, n: usize) -> Option<f64> {
        let (attempts, correct) = self
            .recent(n)
            .fold((0usize, 0usize), |(attempts, correct), record| {
                (attempts + 1, correct + usize::from(record.is_correct()))
            });
        if attempts == 0 {
            None
        } else {
            Some(correct as f64 / attempts as f64)
        }
    }

    pub fn subject_stats(&self, subject: &str) -> SubjectStats {
        self.entries
            .iter()
            .filter(|record| record.subject() == subject)
            .fold(SubjectStats::default(), |mut stats, record| {
                stats.attempts += 1;
                stats.correct += usize::from(record.is_correct());
                stats
            })
    }

    pub fn weighted_score(&self, decay: f64) -> f64 {
        weighted_score(self.entries.iter(), decay)
    }
}

/// Recency-weighted success rate: the most recent entry weighs 1, the one
/// before it `decay`, then `decay^2`, and so on. Returns 0.0 for no entries.
pub fn weighted_score<'a, I>(records: I, decay: f64) -> f64
where
    I: IntoIterator<Item = &'a AnswerRecord>,
    I::IntoIter: DoubleEndedIterator,
{
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut weight = 1.0;

    for record in records.into_iter().rev() {
        weighted_sum += record.score() * weight;
        weight_total += weight;
        weight *= decay;
    }

    if weight_total > 0.0 {
        weighted_sum / weight_total
    } else {
        0.0
    }
}

pub fn validate_decay(decay: f64) -> Result<f64, ValidationError> {
    if decay.is_finite() && decay > 0.0 && decay < 1.0 {
        Ok(decay)
    } else {
        Err(ValidationError::InvalidDecay(decay))
    }
}
