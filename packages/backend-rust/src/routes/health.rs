use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/info", get(info))
        .route("/live", get(live))
        .route("/ready", get(ready))
}

#[derive(Serialize)]
struct BannerResponse {
    message: &'static str,
    status: &'static str,
}

pub async fn banner() -> Response {
    Json(BannerResponse {
        message: "Adaptive Learning API v1.0",
        status: "ok",
    })
    .into_response()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
}

async fn root() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: now_iso(),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthInfoResponse {
    service: &'static str,
    version: &'static str,
    start_time: String,
    uptime: u64,
}

async fn info(State(state): State<AppState>) -> Json<HealthInfoResponse> {
    Json(HealthInfoResponse {
        service: "adaptive-quiz-backend",
        version: env!("CARGO_PKG_VERSION"),
        start_time: system_time_iso(state.started_at_system()),
        uptime: state.uptime_seconds(),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LivenessResponse {
    status: &'static str,
    timestamp: String,
    uptime: u64,
}

async fn live(State(state): State<AppState>) -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "healthy",
        timestamp: now_iso(),
        uptime: state.uptime_seconds(),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadinessResponse {
    status: &'static str,
    timestamp: String,
    checks: ReadinessChecks,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReadinessChecks {
    predictor_loaded: bool,
    predictor_timeout_ms: u64,
    question_bank_items: usize,
    learners: usize,
}

/// Always 200: a missing model or bank degrades answers, it does not stop them.
async fn ready(State(state): State<AppState>) -> Response {
    let engine = state.engine();
    let checks = ReadinessChecks {
        predictor_loaded: engine.predictor().is_loaded(),
        predictor_timeout_ms: engine.predictor().timeout().as_millis() as u64,
        question_bank_items: engine.bank_size(),
        learners: engine.learner_count(),
    };

    let status = if checks.predictor_loaded && checks.question_bank_items > 0 {
        "healthy"
    } else {
        "degraded"
    };

    let response = ReadinessResponse {
        status,
        timestamp: now_iso(),
        checks,
    };
    (StatusCode::OK, Json(response)).into_response()
}

fn system_time_iso(time: std::time::SystemTime) -> String {
    let datetime: chrono::DateTime<chrono::Utc> = time.into();
    datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
