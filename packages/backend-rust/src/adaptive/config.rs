use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SUBJECTS: [&str; 4] = ["python", "algo", "math", "database"];

#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveConfig {
    pub model_path: PathBuf,
    pub question_bank_path: PathBuf,
    pub predictor_enabled: bool,
    pub predictor_timeout: Duration,
    /// Subjects accepted from callers.
    pub subjects: Vec<String>,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("data/level_model.json"),
            question_bank_path: PathBuf::from("data/question_bank.json"),
            predictor_enabled: true,
            predictor_timeout: Duration::from_millis(200),
            subjects: DEFAULT_SUBJECTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AdaptiveConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("LEVEL_MODEL_PATH") {
            if !val.trim().is_empty() {
                config.model_path = PathBuf::from(val.trim());
            }
        }
        if let Ok(val) = std::env::var("QUESTION_BANK_PATH") {
            if !val.trim().is_empty() {
                config.question_bank_path = PathBuf::from(val.trim());
            }
        }
        if let Ok(val) = std::env::var("PREDICTOR_ENABLED") {
            config.predictor_enabled = val.trim().parse().unwrap_or(true);
        }
        if let Ok(val) = std::env::var("PREDICTOR_TIMEOUT_MS") {
            if let Ok(ms) = val.trim().parse::<u64>() {
                if ms > 0 {
                    config.predictor_timeout = Duration::from_millis(ms);
                }
            }
        }
        if let Ok(val) = std::env::var("QUIZ_SUBJECTS") {
            let subjects = parse_subjects(&val);
            if !subjects.is_empty() {
                config.subjects = subjects;
            }
        }

        config
    }

    pub fn is_known_subject(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }
}

fn parse_subjects(raw: &str) -> Vec<String> {
    let mut subjects: Vec<String> = Vec::new();
    for subject in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !subjects.iter().any(|s| s == subject) {
            subjects.push(subject.to_string());
        }
    }
    subjects
}
