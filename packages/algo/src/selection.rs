//! Question Selection
//!
//! Picks the next item for a learner from a pool:
//!
//! 1. keep items within one level of the learner's current level
//! 2. narrow to the requested subject when the pool knows it, otherwise
//!    prefer the learner's first weak subject if any candidate has it
//! 3. pick uniformly at random; an empty candidate set yields the fallback item

use std::collections::BTreeSet;
use std::io::Read;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::profile::LearnerProfile;
use crate::types::{Level, DEFAULT_SUBJECT, FALLBACK_QUESTION_ID};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub subject: String,
    pub level: Level,
}

impl Item {
    /// Synthetic item served when nothing in the pool fits.
    pub fn fallback(level: Level) -> Self {
        Self {
            id: FALLBACK_QUESTION_ID,
            subject: DEFAULT_SUBJECT.to_string(),
            level,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.id == FALLBACK_QUESTION_ID
    }
}

pub trait QuestionPool {
    fn items(&self) -> &[Item];

    fn has_subject(&self, subject: &str) -> bool {
        self.items().iter().any(|item| item.subject == subject)
    }
}

impl QuestionPool for Vec<Item> {
    fn items(&self) -> &[Item] {
        self
    }
}

/// In-memory question bank loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    items: Vec<Item>,
    subjects: BTreeSet<String>,
}

#[derive(Deserialize)]
struct BankFile {
    items: Vec<Item>,
}

impl QuestionBank {
    pub fn new(items: Vec<Item>) -> Self {
        let subjects = items.iter().map(|item| item.subject.clone()).collect();
        Self { items, subjects }
    }

    /// Parses `{"items": [{"id": 1, "subject": "math", "level": 2}, ...]}`.
    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let file: BankFile = serde_json::from_str(raw)?;
        Ok(Self::new(file.items))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        let file: BankFile = serde_json::from_reader(reader)?;
        Ok(Self::new(file.items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.subjects.iter().map(String::as_str)
    }
}

impl QuestionPool for QuestionBank {
    fn items(&self) -> &[Item] {
        &self.items
    }

    fn has_subject(&self, subject: &str) -> bool {
        self.subjects.contains(subject)
    }
}

/// Which filter decided the candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionBasis {
    RequestedSubject,
    WeakSubject,
    LevelWindow,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub item: Item,
    pub basis: SelectionBasis,
    /// Size of the set the item was drawn from.
    pub candidates: usize,
}

pub fn select_item<P, R>(
    profile: &LearnerProfile,
    pool: &P,
    requested: Option<&str>,
    rng: &mut R,
) -> Selection
where
    P: QuestionPool + ?Sized,
    R: Rng + ?Sized,
{
    let level = profile.current_level();
    let mut candidates: Vec<&Item> = pool
        .items()
        .iter()
        .filter(|item| item.level.in_window_of(level))
        .collect();
    let mut basis = SelectionBasis::LevelWindow;

    match requested.filter(|subject| pool.has_subject(subject)) {
        Some(subject) => {
            candidates.retain(|item| item.subject == subject);
            basis = SelectionBasis::RequestedSubject;
        }
        None => {
            if let Some(weak) = profile.weak_subjects().first() {
                let focused: Vec<&Item> = candidates
                    .iter()
                    .copied()
                    .filter(|item| item.subject == weak)
                    .collect();
                if !focused.is_empty() {
                    candidates = focused;
                    basis = SelectionBasis::WeakSubject;
                }
            }
        }
    }

    match candidates.choose(rng) {
        Some(item) => Selection {
            item: (*item).clone(),
            basis,
            candidates: candidates.len(),
        },
        None => Selection {
            item: Item::fallback(level),
            basis: SelectionBasis::Fallback,
            candidates: 0,
        },
    }
}
