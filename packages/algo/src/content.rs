//! Question Content
//!
//! Display text for a `(subject, level)` pair. Purely presentational and
//! deterministic: the same pair always renders the same statement and options.

use serde::{Deserialize, Serialize};

use crate::selection::Item;
use crate::types::Level;

/// Position of the right answer among the rendered options.
pub const CORRECT_OPTION_INDEX: usize = 0;

/// Number of options rendered per question.
pub const OPTION_COUNT: usize = 4;

/// A question ready to be shown to a learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub subject: String,
    pub level: Level,
    pub statement: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl Question {
    pub fn render(item: &Item) -> Self {
        let (statement, options) = if item.is_fallback() {
            (fallback_statement(item.level), fallback_options())
        } else {
            (
                statement_for(&item.subject, item.level),
                options_for(&item.subject, item.level),
            )
        };
        Self {
            id: item.id,
            subject: item.subject.clone(),
            level: item.level,
            statement,
            options,
            correct_index: CORRECT_OPTION_INDEX,
        }
    }
}

pub fn statement_for(subject: &str, level: Level) -> String {
    let catalogue: Option<[&str; 5]> = match subject {
        "python" => Some([
            "What is the syntax to print 'Hello' in Python?",
            "What is a list comprehension in Python?",
            "Explain the difference between `*args` and `**kwargs`.",
            "How does the @property decorator work in Python?",
            "What is the GIL (Global Interpreter Lock) and when does it become a problem?",
        ]),
        "algo" => Some([
            "What is the complexity of a linear search?",
            "Explain how bubble sort works.",
            "What is the difference between BFS and DFS?",
            "Explain dynamic programming with an example.",
            "How does Dijkstra's algorithm work?",
        ]),
        "math" => Some([
            "What is the derivative of a function?",
            "Explain what a diagonal matrix is.",
            "What is an eigendecomposition?",
            "Explain the difference between variance and covariance.",
            "How does stochastic gradient descent work?",
        ]),
        "database" => Some([
            "What is a primary key in SQL?",
            "What is the difference between INNER JOIN and LEFT JOIN?",
            "What is a database index and why use one?",
            "Explain the ACID properties of a transaction.",
            "How would you optimise a slow SQL query?",
        ]),
        _ => None,
    };

    match catalogue {
        Some(statements) => statements[usize::from(level.get() - 1)].to_string(),
        None => format!("Level {level} question on {subject}."),
    }
}

// TODO: load real distractors once the question bank stores them per item.
pub fn options_for(_subject: &str, _level: Level) -> Vec<String> {
    vec![
        "Correct answer (simulated)".to_string(),
        "Wrong answer A".to_string(),
        "Wrong answer B".to_string(),
        "Wrong answer C".to_string(),
    ]
}

pub fn fallback_statement(level: Level) -> String {
    format!("[Offline mode] Python question of level {level}")
}

pub fn fallback_options() -> Vec<String> {
    ["Option A", "Option B", "Option C", "Option D"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
