use crate::infra::AppState;
use adaptive_assessment::engine::{
    adaptive_questions, assessment_router, AssessmentEngine, CodeEvaluation, GeneratedScenario,
    ProficiencyLevel, QuestionRecord, TestCase,
};
use adaptive_assessment::error::AppError;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateScenarioRequest {
    pub(crate) role: String,
    pub(crate) difficulty: String,
    #[serde(default)]
    pub(crate) skills: Vec<String>,
    #[serde(default)]
    pub(crate) prior_texts: Vec<String>,
    #[serde(default)]
    pub(crate) experience_years: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateScenarioResponse {
    pub(crate) avoid_themes: Vec<String>,
    pub(crate) scenario: GeneratedScenario,
    pub(crate) questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EvaluateCodeRequest {
    pub(crate) code: String,
    #[serde(default)]
    pub(crate) test_cases: Vec<TestCase>,
}

pub(crate) fn with_assessment_routes(engine: Arc<AssessmentEngine>) -> axum::Router {
    assessment_router(engine.clone())
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/assessment/scenarios/generate",
            axum::routing::post(generate_scenario_endpoint).layer(Extension(engine)),
        )
        .route(
            "/api/v1/assessment/code/evaluate",
            axum::routing::post(evaluate_code_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Build a request from prior texts, run the configured generator, derive the question set.
pub(crate) async fn generate_scenario_endpoint(
    Extension(state): Extension<AppState>,
    Extension(engine): Extension<Arc<AssessmentEngine>>,
    Json(payload): Json<GenerateScenarioRequest>,
) -> Result<Json<GenerateScenarioResponse>, AppError> {
    let difficulty = payload.difficulty.parse::<ProficiencyLevel>()?;
    let request = engine.scenario_request(
        &payload.role,
        difficulty,
        payload.skills,
        payload.prior_texts.as_slice(),
        payload.experience_years,
    );

    let scenario = state.scenarios.generate_scenario(&request)?;
    let questions = adaptive_questions(&scenario, difficulty, &request.role)
        .into_iter()
        .map(QuestionRecord::from)
        .collect();

    Ok(Json(GenerateScenarioResponse {
        avoid_themes: request.avoid_themes,
        scenario,
        questions,
    }))
}

pub(crate) async fn evaluate_code_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<EvaluateCodeRequest>,
) -> Result<Json<CodeEvaluation>, AppError> {
    let evaluation = state.code.evaluate_code(&payload.code, &payload.test_cases)?;
    Ok(Json(evaluation))
}
