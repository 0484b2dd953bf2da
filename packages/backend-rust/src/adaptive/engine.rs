use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use adaptive_quiz_algo::{
    select_item, summarize, AnswerRecord, LearnerProfile, LevelUpdate, PredictError,
    ProgressSummary, Question, QuestionBank, WeakSubjectChange, DEFAULT_DECAY,
};

use crate::adaptive::{AdaptiveConfig, ArtifactError, EngineError, PredictorHandle, ProfileStore};

pub struct AdaptiveEngine {
    config: AdaptiveConfig,
    store: ProfileStore,
    predictor: PredictorHandle,
    bank: QuestionBank,
}

impl AdaptiveEngine {
    pub fn new(config: AdaptiveConfig, predictor: PredictorHandle, bank: QuestionBank) -> Self {
        Self {
            config,
            store: ProfileStore::new(),
            predictor,
            bank,
        }
    }

    /// Loads the predictor and question bank named by `config`. Missing or
    /// broken artifacts degrade to the fallback rule and an empty pool.
    pub fn from_config(config: AdaptiveConfig) -> Self {
        let predictor = PredictorHandle::from_config(&config);
        let bank = match load_question_bank(&config.question_bank_path) {
            Ok(bank) => {
                tracing::info!(
                    path = %config.question_bank_path.display(),
                    items = bank.len(),
                    "question bank loaded"
                );
                bank
            }
            Err(err) => {
                tracing::warn!(
                    path = %config.question_bank_path.display(),
                    error = %err,
                    "question bank unavailable, serving fallback questions only"
                );
                QuestionBank::default()
            }
        };
        Self::new(config, predictor, bank)
    }

    pub fn config(&self) -> &AdaptiveConfig {
        &self.config
    }

    pub fn predictor(&self) -> &PredictorHandle {
        &self.predictor
    }

    pub fn bank_size(&self) -> usize {
        self.bank.len()
    }

    pub fn learner_count(&self) -> usize {
        self.store.len()
    }

    pub fn profile(&self, learner_id: &str) -> Result<LearnerProfile, EngineError> {
        let learner_id = validate_learner_id(learner_id)?;
        Ok(self.store.get_or_create(learner_id))
    }

    /// Returns whether the learner existed before the reset.
    pub fn reset_profile(&self, learner_id: &str) -> Result<bool, EngineError> {
        let learner_id = validate_learner_id(learner_id)?;
        let existed = self.store.reset(learner_id);
        tracing::info!(learner_id, existed, "profile reset");
        Ok(existed)
    }

    pub async fn record_answer(
        &self,
        learner_id: &str,
        record: AnswerRecord,
    ) -> Result<LevelUpdate, EngineError> {
        let learner_id = validate_learner_id(learner_id)?;
        self.require_subject(record.subject())?;

        // Consulted before taking the learner lock; it only needs the event.
        let estimate = self.predictor.estimate(&record).await;

        let subject = record.subject().to_string();
        let update = self
            .store
            .with_profile(learner_id, |profile| profile.record_answer(record, estimate));

        match &update.predictor_error {
            None | Some(PredictError::NotLoaded) => {}
            Some(err) => {
                tracing::warn!(learner_id, subject = %subject, error = %err, "prediction failed, used fallback rule");
            }
        }
        match update.weak_subject {
            WeakSubjectChange::Flagged => {
                tracing::info!(learner_id, subject = %subject, "subject flagged as weak");
            }
            WeakSubjectChange::Cleared => {
                tracing::info!(learner_id, subject = %subject, "weak subject cleared");
            }
            WeakSubjectChange::Unchanged => {}
        }
        if !update.expired_weak_subjects.is_empty() {
            tracing::debug!(learner_id, expired = ?update.expired_weak_subjects, "weak flags aged out");
        }
        if update.level_changed() {
            tracing::info!(
                learner_id,
                from = update.previous.get(),
                to = update.current.get(),
                source = update.source.as_str(),
                "level changed"
            );
        }

        Ok(update)
    }

    /// Picks and renders the next question. Never fails for an empty or
    /// exhausted pool; an explicitly requested unknown subject is rejected.
    pub fn next_question(
        &self,
        learner_id: &str,
        subject: Option<&str>,
    ) -> Result<Question, EngineError> {
        let learner_id = validate_learner_id(learner_id)?;
        if let Some(subject) = subject {
            self.require_subject(subject)?;
        }

        let selection = self.store.with_profile(learner_id, |profile| {
            select_item(profile, &self.bank, subject, &mut rand::thread_rng())
        });

        tracing::debug!(
            learner_id,
            question_id = selection.item.id,
            basis = ?selection.basis,
            candidates = selection.candidates,
            "question selected"
        );
        if selection.item.is_fallback() && !self.bank.is_empty() {
            tracing::debug!(learner_id, ?subject, "no candidate in level window");
        }

        Ok(Question::render(&selection.item))
    }

    pub fn summarize(
        &self,
        learner_id: &str,
        decay: Option<f64>,
    ) -> Result<ProgressSummary, EngineError> {
        let learner_id = validate_learner_id(learner_id)?;
        let decay = decay.unwrap_or(DEFAULT_DECAY);
        let summary = self
            .store
            .with_profile(learner_id, |profile| summarize(profile, decay))?;
        Ok(summary)
    }

    fn require_subject(&self, subject: &str) -> Result<(), EngineError> {
        if self.config.is_known_subject(subject) {
            Ok(())
        } else {
            Err(EngineError::UnknownSubject(subject.to_string()))
        }
    }
}

/// Trims the learner id; the result is the key profiles are stored under.
pub fn validate_learner_id(learner_id: &str) -> Result<&str, EngineError> {
    let trimmed = learner_id.trim();
    if trimmed.is_empty() {
        Err(EngineError::EmptyLearnerId)
    } else {
        Ok(trimmed)
    }
}

pub fn load_question_bank(path: &Path) -> Result<QuestionBank, ArtifactError> {
    let file = File::open(path)?;
    Ok(QuestionBank::from_reader(BufReader::new(file))?)
}
