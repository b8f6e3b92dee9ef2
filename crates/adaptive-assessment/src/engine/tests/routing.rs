use super::common::*;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::engine::router::{evaluate_handler, EvaluateRequest};
use crate::engine::{AnswerPayload, QuestionRecord};

#[tokio::test]
async fn features_route_returns_extracted_metrics() {
    let response = assessment_router_with_engine(engine())
        .oneshot(json_request(
            "/api/v1/assessment/features",
            &json!({ "text": "We shipped it. However, it broke." }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["sentence_count"], json!(2));
    assert_eq!(payload["coherence"], json!(100.0));
}

#[tokio::test]
async fn indicators_route_accepts_custom_sets() {
    let response = assessment_router_with_engine(engine())
        .oneshot(json_request(
            "/api/v1/assessment/indicators",
            &json!({
                "text": "I stayed calm",
                "indicators": { "sets": [
                    { "trait_name": "composure", "keywords": ["calm"] },
                    { "trait_name": "strain", "keywords": ["panic"] }
                ]}
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["dominant_trait"], json!("composure"));
    assert_eq!(payload["total_hits"], json!(1));
}

#[tokio::test]
async fn problem_solving_route_reports_approach_and_complexity() {
    let response = assessment_router_with_engine(engine())
        .oneshot(json_request(
            "/api/v1/assessment/problem-solving",
            &json!({ "text": "First I examine the data. However, several options remain." }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["approaches"]["dominant_trait"], json!("analytical"));
    assert_eq!(payload["approaches"]["total_hits"], json!(2));
    let complexity = payload["complexity"].as_f64().expect("complexity");
    assert!(complexity > 0.0 && complexity <= 100.0);
}

#[tokio::test]
async fn evaluate_handler_scores_multiple_choice() {
    let request = EvaluateRequest {
        question: QuestionRecord {
            id: "mc-1".to_string(),
            content: "Pick one".to_string(),
            question_type: "multiple_choice".to_string(),
            points: 5.0,
            category: "fundamentals".to_string(),
            options: vec!["A".to_string(), "B".to_string()],
            correct_answer: Some("B".to_string()),
            test_cases: Vec::new(),
        },
        answer: AnswerPayload::Choice("B".to_string()),
        features: None,
        traits: None,
    };

    let response = evaluate_handler(State(Arc::new(engine())), axum::Json(request))
        .await
        .expect("evaluation succeeds");

    assert_eq!(response.0.evaluation.total_score, 5.0);
    assert!(response.0.evaluation.is_correct);
}

#[tokio::test]
async fn evaluate_route_rejects_unknown_question_types() {
    let response = assessment_router_with_engine(engine())
        .oneshot(json_request(
            "/api/v1/assessment/evaluate",
            &json!({
                "question": {
                    "id": "x-1",
                    "type": "essay",
                    "points": 10.0,
                    "category": "writing"
                },
                "answer": { "text": "An essay." }
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    let message = payload["error"].as_str().expect("error message");
    assert!(message.contains("unsupported type 'essay'"), "{message}");
}

#[tokio::test]
async fn evaluate_route_uses_supplied_signals() {
    let response = assessment_router_with_engine(engine())
        .oneshot(json_request(
            "/api/v1/assessment/evaluate",
            &json!({
                "question": {
                    "id": "b-1",
                    "type": "behavioral",
                    "points": 20.0,
                    "category": "leadership"
                },
                "answer": { "text": "I led the migration." },
                "features": features_with(80.0, 70.0, 90.0),
                "traits": traits_with_leadership(60.0)
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["evaluation"]["total_score"], json!(14.0));
    assert_eq!(payload["evaluation"]["is_correct"], json!(true));
}

#[tokio::test]
async fn difficulty_route_reports_deltas() {
    let response = assessment_router_with_engine(engine())
        .oneshot(json_request(
            "/api/v1/assessment/difficulty",
            &json!({ "current_difficulty": "entry", "performance_score": 0.95 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["next"], json!("intermediate"));
    assert_eq!(payload["performance_delta"], json!(1.0));
}

#[tokio::test]
async fn difficulty_route_rejects_unknown_labels() {
    let response = assessment_router_with_engine(engine())
        .oneshot(json_request(
            "/api/v1/assessment/difficulty",
            &json!({ "current_difficulty": "master", "performance_score": 0.5 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn step_route_moves_one_level() {
    let history = serde_json::to_value(history(&[false, false, false])).expect("history json");

    let response = assessment_router_with_engine(engine())
        .oneshot(json_request(
            "/api/v1/assessment/difficulty/step",
            &json!({ "history": history, "current_difficulty": "hard" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["next_difficulty"], json!("medium"));
    assert_eq!(payload["changed"], json!(true));
}

#[tokio::test]
async fn themes_route_returns_ranked_terms() {
    let response = assessment_router_with_engine(engine())
        .oneshot(json_request(
            "/api/v1/assessment/themes",
            &json!({ "prior_texts": ["Latency latency budget", "Budget review"] }),
        ))
        .await
        .expect("route executes");

    let payload = read_json_body(response).await;
    assert_eq!(payload["themes"], json!(["latency", "budget", "review"]));
}

#[tokio::test]
async fn submission_routes_record_and_finish() {
    let router = assessment_router_with_engine(engine());
    let question = json!({
        "id": "q1",
        "type": "multiple_choice",
        "points": 10.0,
        "category": "fundamentals",
        "options": ["A", "B"],
        "correct_answer": "A"
    });

    let response = router
        .clone()
        .oneshot(json_request(
            "/api/v1/assessment/submissions/answer",
            &json!({
                "session": { "adaptive": true },
                "question": question,
                "answer": { "choice": "A" },
                "time_spent_seconds": 12.5
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let outcome: Value = read_json_body(response).await;
    assert_eq!(outcome["session"]["current_difficulty"], json!("easy"));
    assert_eq!(outcome["evaluation"]["total_score"], json!(10.0));

    let response = router
        .oneshot(json_request(
            "/api/v1/assessment/submissions/finish",
            &json!({
                "session": outcome["session"],
                "questions": [question],
                "rubric": { "passing_score": 60.0 }
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let score = read_json_body(response).await;
    assert_eq!(score["percentage"], json!(100.0));
    assert_eq!(score["passed"], json!(true));
    assert_eq!(score["strengths"], json!(["fundamentals"]));
}

#[tokio::test]
async fn scenario_request_route_renders_prompt() {
    let response = assessment_router_with_engine(engine())
        .oneshot(json_request(
            "/api/v1/assessment/scenarios/request",
            &json!({
                "role": "Site Reliability Engineer",
                "difficulty": "advanced",
                "skills": ["Kubernetes"],
                "prior_texts": ["Cluster upgrade stalls the cluster"]
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["request"]["avoid_themes"][0], json!("cluster"));
    let prompt = payload["prompt"].as_str().expect("prompt");
    assert!(prompt.contains("complex workplace scenario"));
}

#[tokio::test]
async fn scenario_questions_route_parses_generator_output() {
    let response = assessment_router_with_engine(engine())
        .oneshot(json_request(
            "/api/v1/assessment/scenarios/questions",
            &json!({
                "scenario": "Title: Pager Storm\n\nDescription: Alerts flood on-call.\n\nContext: Night shift.\n\nSilence noisy alerts",
                "difficulty": "intermediate",
                "role": "Team Lead"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["scenario"]["title"], json!("Pager Storm"));
    let questions = payload["questions"].as_array().expect("questions");
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[2]["category"], json!("leadership_skills"));
    assert_eq!(questions[1]["type"], json!("scenario"));
}

#[tokio::test]
async fn blank_generator_output_maps_to_bad_gateway() {
    let response = assessment_router_with_engine(engine())
        .oneshot(json_request(
            "/api/v1/assessment/scenarios/questions",
            &json!({ "scenario": "  ", "difficulty": "entry", "role": "Analyst" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn engine_errors_render_as_json() {
    let response = crate::error::AppError::from(crate::engine::EngineError::AnswerMismatch {
        question_id: "q1".to_string(),
        expected: "choice",
        received: "text",
    })
    .into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload["error"],
        json!("assessment error: question q1 expects a choice answer, received text")
    );
}
