use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use adaptive_quiz_algo::{
    answer_feedback, format_duration, AnswerRecord, Level, LevelSource, ProgressSummary, Question,
    ValidationError, CORRECT_OPTION_INDEX, OPTION_COUNT,
};

use crate::adaptive::validate_learner_id;
use crate::response::AppError;
use crate::routes::fallback_handler;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/questions", get(next_question).fallback(fallback_handler))
        .route("/answers", post(submit_answer).fallback(fallback_handler))
        .route("/stats/:user_id", get(stats).fallback(fallback_handler))
        .route("/reset/:user_id", post(reset).fallback(fallback_handler))
}

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

fn ok<T: Serialize>(data: T) -> Json<SuccessResponse<T>> {
    Json(SuccessResponse {
        success: true,
        data,
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionQuery {
    user_id: String,
    #[serde(default)]
    subject: Option<String>,
}

/// A question as shown to the learner; the answer key stays server-side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuestionResponse {
    question_id: i64,
    subject: String,
    difficulty_level: u8,
    level_label: &'static str,
    statement: String,
    options: Vec<String>,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            question_id: question.id,
            subject: question.subject,
            difficulty_level: question.level.get(),
            level_label: question.level.label(),
            statement: question.statement,
            options: question.options,
        }
    }
}

async fn next_question(
    State(state): State<AppState>,
    Query(query): Query<QuestionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let subject = query
        .subject
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let question = state.engine().next_question(&query.user_id, subject)?;
    Ok(ok(QuestionResponse::from(question)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerRequest {
    user_id: String,
    question_id: i64,
    answer_index: i64,
    subject: String,
    difficulty_level: i64,
    response_time_secs: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnswerResponse {
    correct: bool,
    feedback: &'static str,
    new_level: u8,
    level_label: &'static str,
    level_source: LevelSource,
    correct_answer_index: usize,
    response_time: String,
}

async fn submit_answer(
    State(state): State<AppState>,
    Json(payload): Json<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !(0..OPTION_COUNT as i64).contains(&payload.answer_index) {
        return Err(AppError::validation(format!(
            "answerIndex must be between 0 and {}, got {}",
            OPTION_COUNT - 1,
            payload.answer_index
        )));
    }
    let question_level = u8::try_from(payload.difficulty_level)
        .map_err(|_| ValidationError::LevelOutOfRange(payload.difficulty_level))
        .and_then(Level::new)?;

    let correct = payload.answer_index as usize == CORRECT_OPTION_INDEX;
    let record = AnswerRecord::new(
        payload.question_id,
        correct,
        payload.response_time_secs,
        payload.subject.trim(),
    )?;

    let update = state.engine().record_answer(&payload.user_id, record).await?;

    Ok(ok(AnswerResponse {
        correct,
        feedback: answer_feedback(correct, payload.response_time_secs, question_level),
        new_level: update.current.get(),
        level_label: update.current.label(),
        level_source: update.source,
        correct_answer_index: CORRECT_OPTION_INDEX,
        response_time: format_duration(payload.response_time_secs),
    }))
}

#[derive(Debug, Deserialize)]
struct StatsQuery {
    #[serde(default)]
    decay: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsResponse {
    user_id: String,
    #[serde(flatten)]
    summary: ProgressSummary,
}

async fn stats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<StatsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = validate_learner_id(&user_id)?.to_string();
    let summary = state.engine().summarize(&user_id, query.decay)?;
    Ok(ok(StatsResponse { user_id, summary }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetResponse {
    message: String,
    user_id: String,
}

async fn reset(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = validate_learner_id(&user_id)?.to_string();
    let existed = state.engine().reset_profile(&user_id)?;
    let message = if existed {
        format!("Profile of {user_id} reset.")
    } else {
        format!("Profile of {user_id} created (new profile).")
    };
    Ok(ok(ResetResponse { message, user_id }))
}
