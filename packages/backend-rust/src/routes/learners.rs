use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use adaptive_quiz_algo::LearnerProfile;

use crate::adaptive::validate_learner_id;
use crate::response::AppError;
use crate::routes::fallback_handler;
use crate::services::learner_id::generate_learner_id;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_learner).fallback(fallback_handler))
        .route("/:user_id", get(get_learner).fallback(fallback_handler))
}

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

#[derive(Debug, Default, Deserialize)]
struct CreateLearnerRequest {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateLearnerResponse {
    user_id: String,
}

async fn create_learner(
    State(state): State<AppState>,
    payload: Result<Json<CreateLearnerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    // A request without a JSON body asks for an anonymous id.
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(JsonRejection::MissingJsonContentType(_)) => CreateLearnerRequest::default(),
        Err(rejection) => return Err(AppError::validation(rejection.body_text())),
    };
    let user_id = generate_learner_id(payload.name.as_deref());
    state.engine().profile(&user_id)?;

    Ok(Json(SuccessResponse {
        success: true,
        data: CreateLearnerResponse { user_id },
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LearnerResponse {
    user_id: String,
    level_label: &'static str,
    #[serde(flatten)]
    profile: LearnerProfile,
}

async fn get_learner(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = validate_learner_id(&user_id)?.to_string();
    let profile = state.engine().profile(&user_id)?;

    Ok(Json(SuccessResponse {
        success: true,
        data: LearnerResponse {
            user_id,
            level_label: profile.current_level().label(),
            profile,
        },
    }))
}
