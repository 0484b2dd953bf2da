//! Learner-facing feedback strings.

use crate::types::Level;

const QUICK_ANSWER_SECS: f64 = 15.0;
const STEADY_ANSWER_SECS: f64 = 40.0;
const HARD_LEVEL: u8 = 4;

/// Short message shown after an answer, based on correctness, speed and the
/// difficulty of the question that was answered.
pub fn answer_feedback(correct: bool, response_time_secs: f64, question_level: Level) -> &'static str {
    if correct {
        if response_time_secs < QUICK_ANSWER_SECS {
            "Excellent! Quick and correct answer."
        } else if response_time_secs < STEADY_ANSWER_SECS {
            "Well done! Correct answer."
        } else {
            "Correct! Try to answer a little faster next time."
        }
    } else if question_level.get() >= HARD_LEVEL {
        "No worries, that was a hard one. Keep going."
    } else {
        "Not quite. Review this topic and try again."
    }
}

/// `"42s"` under a minute, `"2min 5s"` otherwise.
pub fn format_duration(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    if total < 60 {
        format!("{total}s")
    } else {
        format!("{}min {}s", total / 60, total % 60)
    }
}
