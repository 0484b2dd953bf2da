use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

mod common;

use common::{get, post_empty, post_json, send};

fn answer_body(user_id: &str, answer_index: i64, subject: &str, secs: f64) -> serde_json::Value {
    json!({
        "userId": user_id,
        "questionId": 7,
        "answerIndex": answer_index,
        "subject": subject,
        "difficultyLevel": 2,
        "responseTimeSecs": secs,
    })
}

#[tokio::test]
async fn test_banner() {
    let app = common::create_test_app().await;
    let (status, body) = send(&app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_health_root() {
    let app = common::create_test_app().await;
    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_health_live() {
    let app = common::create_test_app().await;
    let (status, body) = send(&app, get("/health/live")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_ready_reports_artifacts() {
    let app = common::create_test_app().await;
    let (status, body) = send(&app, get("/health/ready")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["predictorLoaded"], true);
    assert_eq!(body["checks"]["questionBankItems"], 60);
}

#[tokio::test]
async fn test_health_info() {
    let app = common::create_test_app().await;
    let (status, body) = send(&app, get("/health/info")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "adaptive-quiz-backend");
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let app = common::create_test_app().await;

    let (status, body) = send(&app, get("/api/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, body) = send(&app, get("/api/answers")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_question_within_level_window() {
    let app = common::create_test_app().await;

    for _ in 0..20 {
        let (status, body) = send(&app, get("/api/questions?userId=alice")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let data = &body["data"];
        let level = data["difficultyLevel"].as_u64().unwrap();
        assert!((1..=3).contains(&level));
        assert_eq!(data["options"].as_array().unwrap().len(), 4);
        assert!(data.get("correctIndex").is_none());
    }
}

#[tokio::test]
async fn test_question_for_requested_subject() {
    let app = common::create_test_app().await;
    let (status, body) = send(&app, get("/api/questions?userId=bob&subject=algo")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["subject"], "algo");
}

#[tokio::test]
async fn test_question_rejects_unknown_subject() {
    let app = common::create_test_app().await;
    let (status, body) = send(&app, get("/api/questions?userId=bob&subject=chemistry")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_question_requires_user_id() {
    let app = common::create_test_app().await;
    let (status, _) = send(&app, get("/api/questions")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_answer_updates_level_with_predictor() {
    let app = common::create_test_app().await;
    let (status, body) = send(&app, post_json("/api/answers", answer_body("carol", 0, "python", 10.0))).await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["correct"], true);
    assert_eq!(data["feedback"], "Excellent! Quick and correct answer.");
    assert_eq!(data["newLevel"], 2);
    assert_eq!(data["levelLabel"], "Intermediate");
    assert_eq!(data["levelSource"], "predictor");
    assert_eq!(data["correctAnswerIndex"], 0);
    assert_eq!(data["responseTime"], "10s");
}

#[tokio::test]
async fn test_wrong_answer_feedback() {
    let app = common::create_test_app().await;
    let (status, body) = send(&app, post_json("/api/answers", answer_body("dave", 2, "math", 20.0))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["correct"], false);
    assert_eq!(body["data"]["feedback"], "Not quite. Review this topic and try again.");
}

#[tokio::test]
async fn test_answer_validation() {
    let app = common::create_test_app().await;

    let cases = [
        answer_body("erin", 4, "python", 10.0),
        answer_body("erin", -1, "python", 10.0),
        answer_body("erin", 0, "bdd", 10.0),
        answer_body("erin", 0, "python", 0.0),
        json!({
            "userId": "erin",
            "questionId": 1,
            "answerIndex": 0,
            "subject": "python",
            "difficultyLevel": 6,
            "responseTimeSecs": 10.0,
        }),
    ];

    for case in cases {
        let (status, body) = send(&app, post_json("/api/answers", case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "case {case}");
        assert_eq!(body["code"], "VALIDATION_ERROR", "case {case}");
    }

    let (_, body) = send(&app, get("/api/stats/erin")).await;
    assert_eq!(body["data"]["totalAnswered"], 0);
}

#[tokio::test]
async fn test_stats_summary() {
    let app = common::create_test_app().await;
    for (index, subject) in [(0, "python"), (0, "algo"), (1, "math")] {
        let (status, _) = send(&app, post_json("/api/answers", answer_body("frank", index, subject, 25.0))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, get("/api/stats/frank")).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["userId"], "frank");
    assert_eq!(data["totalAnswered"], 3);
    assert_eq!(data["accuracyPct"], 66.7);
    assert_eq!(data["progression"], "insufficient data");
    assert_eq!(data["weakSubjects"], json!([]));
    assert!(data["weightedScore"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_stats_rejects_bad_decay() {
    let app = common::create_test_app().await;
    let (status, body) = send(&app, get("/api/stats/gina?decay=1.5")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_stats_for_unknown_learner_creates_default() {
    let app = common::create_test_app().await;
    let (status, body) = send(&app, get("/api/stats/newcomer")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["level"], 2);
    assert_eq!(body["data"]["accuracyPct"], 0.0);
}

#[tokio::test]
async fn test_reset_profile() {
    let app = common::create_test_app().await;

    let (status, body) = send(&app, post_empty("/api/reset/ghost")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["message"], "Profile of ghost created (new profile).");
    assert_eq!(body["data"]["userId"], "ghost");

    send(&app, post_json("/api/answers", answer_body("ghost", 0, "python", 10.0))).await;

    let (_, body) = send(&app, post_empty("/api/reset/ghost")).await;
    assert_eq!(body["data"]["message"], "Profile of ghost reset.");

    let (_, body) = send(&app, get("/api/stats/ghost")).await;
    assert_eq!(body["data"]["totalAnswered"], 0);
    assert_eq!(body["data"]["level"], 2);
}

#[tokio::test]
async fn test_create_learner() {
    let app = common::create_test_app().await;

    let (status, body) = send(&app, post_json("/api/learners", json!({ "name": "alice" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userId"], "user_2bd806c9");

    let (status, body) = send(&app, post_empty("/api/learners")).await;
    assert_eq!(status, StatusCode::OK);
    let user_id = body["data"]["userId"].as_str().unwrap();
    assert!(user_id.starts_with("user_"));
    assert_eq!(user_id.len(), "user_".len() + 12);
}

#[tokio::test]
async fn test_create_learner_rejects_malformed_body() {
    let app = common::create_test_app().await;

    let (status, body) = send(&app, post_json("/api/learners", json!({ "name": 123 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let truncated = Request::builder()
        .method("POST")
        .uri("/api/learners")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\":"))
        .unwrap();
    let (status, body) = send(&app, truncated).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(&app, post_json("/api/learners", json!({ "name": null }))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_routes_echo_trimmed_learner_id() {
    let app = common::create_test_app().await;

    let (status, body) = send(&app, post_empty("/api/reset/%20bob")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userId"], "bob");
    assert_eq!(body["data"]["message"], "Profile of bob created (new profile).");

    send(&app, post_json("/api/answers", answer_body("bob", 0, "math", 12.0))).await;

    let (_, body) = send(&app, get("/api/learners/%20bob%20")).await;
    assert_eq!(body["data"]["userId"], "bob");
    assert_eq!(body["data"]["totalAnswered"], 1);

    let (_, body) = send(&app, get("/api/stats/%20bob")).await;
    assert_eq!(body["data"]["userId"], "bob");
    assert_eq!(body["data"]["totalAnswered"], 1);

    let (status, body) = send(&app, post_empty("/api/reset/%20%20")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_learner_snapshot() {
    let app = common::create_test_app().await;
    send(&app, post_json("/api/answers", answer_body("hana", 0, "database", 12.0))).await;

    let (status, body) = send(&app, get("/api/learners/hana")).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["userId"], "hana");
    assert_eq!(data["totalAnswered"], 1);
    assert_eq!(data["totalCorrect"], 1);
    assert_eq!(data["history"].as_array().unwrap().len(), 1);
    assert_eq!(data["history"][0]["subject"], "database");
    assert!(data["levelLabel"].is_string());
}
