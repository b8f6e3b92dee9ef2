use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::difficulty::{DifficultyAdjustment, ProficiencyLevel, StepDifficulty};
use super::domain::{AnswerPayload, AnswerRecord, CandidateProfile, Question, QuestionRecord};
use super::features::ResponseFeatures;
use super::indicators::{IndicatorConfig, ProblemSolvingAnalysis, TraitScores};
use super::scenario::{adaptive_questions, GeneratedScenario, ScenarioRequest};
use super::scoring::{AssessmentScore, Rubric, SubmissionEvaluation};
use super::session::{AnswerOutcome, SubmissionSession};
use super::AssessmentEngine;
use crate::error::AppError;

/// Router builder exposing the engine contracts over HTTP.
pub fn assessment_router(engine: Arc<AssessmentEngine>) -> Router {
    Router::new()
        .route("/api/v1/assessment/features", post(features_handler))
        .route("/api/v1/assessment/indicators", post(indicators_handler))
        .route(
            "/api/v1/assessment/problem-solving",
            post(problem_solving_handler),
        )
        .route("/api/v1/assessment/evaluate", post(evaluate_handler))
        .route("/api/v1/assessment/difficulty", post(difficulty_handler))
        .route(
            "/api/v1/assessment/difficulty/step",
            post(step_difficulty_handler),
        )
        .route("/api/v1/assessment/themes", post(themes_handler))
        .route(
            "/api/v1/assessment/submissions/answer",
            post(record_answer_handler),
        )
        .route(
            "/api/v1/assessment/submissions/finish",
            post(finish_handler),
        )
        .route(
            "/api/v1/assessment/scenarios/request",
            post(scenario_request_handler),
        )
        .route(
            "/api/v1/assessment/scenarios/questions",
            post(scenario_questions_handler),
        )
        .with_state(engine)
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct IndicatorRequest {
    pub text: String,
    #[serde(default)]
    pub indicators: Option<IndicatorConfig>,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub question: QuestionRecord,
    pub answer: AnswerPayload,
    /// Precomputed signals; derived from the answer text when omitted.
    #[serde(default)]
    pub features: Option<ResponseFeatures>,
    #[serde(default)]
    pub traits: Option<TraitScores>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub features: ResponseFeatures,
    pub traits: TraitScores,
    pub evaluation: SubmissionEvaluation,
}

#[derive(Debug, Deserialize)]
pub struct DifficultyRequest {
    #[serde(default)]
    pub history: Vec<AnswerRecord>,
    pub current_difficulty: String,
    pub performance_score: f64,
    #[serde(default)]
    pub profile: Option<CandidateProfile>,
}

#[derive(Debug, Deserialize)]
pub struct StepDifficultyRequest {
    #[serde(default)]
    pub history: Vec<AnswerRecord>,
    pub current_difficulty: String,
}

#[derive(Debug, Serialize)]
pub struct StepDifficultyResponse {
    pub next_difficulty: StepDifficulty,
    pub changed: bool,
}

#[derive(Debug, Deserialize)]
pub struct ThemesRequest {
    #[serde(default)]
    pub prior_texts: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ThemesResponse {
    pub themes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordAnswerRequest {
    #[serde(default)]
    pub session: SubmissionSession,
    pub question: QuestionRecord,
    pub answer: AnswerPayload,
    #[serde(default)]
    pub time_spent_seconds: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct FinishRequest {
    pub session: SubmissionSession,
    pub questions: Vec<QuestionRecord>,
    #[serde(default)]
    pub rubric: Rubric,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioRequestBody {
    pub role: String,
    pub difficulty: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub prior_texts: Vec<String>,
    #[serde(default)]
    pub experience_years: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ScenarioRequestResponse {
    pub request: ScenarioRequest,
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioQuestionsRequest {
    /// Raw generator output, JSON or sectioned text.
    pub scenario: String,
    pub difficulty: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct ScenarioQuestionsResponse {
    pub scenario: GeneratedScenario,
    pub questions: Vec<QuestionRecord>,
}

pub(crate) async fn features_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    Json(request): Json<TextRequest>,
) -> Json<ResponseFeatures> {
    Json(engine.extract_features(&request.text))
}

pub(crate) async fn indicators_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    Json(request): Json<IndicatorRequest>,
) -> Json<TraitScores> {
    Json(engine.scan_indicators(&request.text, request.indicators.as_ref()))
}

pub(crate) async fn problem_solving_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    Json(request): Json<TextRequest>,
) -> Json<ProblemSolvingAnalysis> {
    Json(engine.analyze_problem_solving(&request.text))
}

pub(crate) async fn evaluate_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let question = Question::try_from(request.question)?;
    let features = request
        .features
        .unwrap_or_else(|| engine.extract_features(request.answer.text()));
    let traits = request
        .traits
        .unwrap_or_else(|| engine.scan_indicators(request.answer.text(), None));
    let evaluation = engine.evaluate_answer(&question, &request.answer, &features, &traits)?;

    Ok(Json(EvaluateResponse {
        features,
        traits,
        evaluation,
    }))
}

pub(crate) async fn difficulty_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    Json(request): Json<DifficultyRequest>,
) -> Result<Json<DifficultyAdjustment>, AppError> {
    let adjustment = engine.adjust_difficulty(
        &request.history,
        &request.current_difficulty,
        request.performance_score,
        request.profile.as_ref(),
    )?;
    Ok(Json(adjustment))
}

pub(crate) async fn step_difficulty_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    Json(request): Json<StepDifficultyRequest>,
) -> Result<Json<StepDifficultyResponse>, AppError> {
    let current = request.current_difficulty.parse::<StepDifficulty>()?;
    let next = engine.next_step_difficulty(&request.history, current.label())?;
    Ok(Json(StepDifficultyResponse {
        next_difficulty: next,
        changed: next != current,
    }))
}

pub(crate) async fn themes_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    Json(request): Json<ThemesRequest>,
) -> Json<ThemesResponse> {
    Json(ThemesResponse {
        themes: engine.extract_themes(request.prior_texts.as_slice()),
    })
}

pub(crate) async fn record_answer_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    Json(request): Json<RecordAnswerRequest>,
) -> Result<Json<AnswerOutcome>, AppError> {
    let question = Question::try_from(request.question)?;
    let outcome = engine.record_answer(
        &request.session,
        &question,
        &request.answer,
        request.time_spent_seconds,
        Utc::now(),
    )?;
    Ok(Json(outcome))
}

pub(crate) async fn finish_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    Json(request): Json<FinishRequest>,
) -> Result<Json<AssessmentScore>, AppError> {
    let questions = request
        .questions
        .into_iter()
        .map(Question::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(engine.finish(&request.session, &questions, &request.rubric)))
}

pub(crate) async fn scenario_request_handler(
    State(engine): State<Arc<AssessmentEngine>>,
    Json(request): Json<ScenarioRequestBody>,
) -> Result<Json<ScenarioRequestResponse>, AppError> {
    let difficulty = request.difficulty.parse::<ProficiencyLevel>()?;
    let scenario_request = engine.scenario_request(
        &request.role,
        difficulty,
        request.skills,
        request.prior_texts.as_slice(),
        request.experience_years,
    );
    let prompt = scenario_request.prompt();
    Ok(Json(ScenarioRequestResponse {
        request: scenario_request,
        prompt,
    }))
}

pub(crate) async fn scenario_questions_handler(
    Json(request): Json<ScenarioQuestionsRequest>,
) -> Result<Json<ScenarioQuestionsResponse>, AppError> {
    let difficulty = request.difficulty.parse::<ProficiencyLevel>()?;
    let scenario = GeneratedScenario::parse(&request.scenario)?;
    let questions = adaptive_questions(&scenario, difficulty, &request.role)
        .into_iter()
        .map(QuestionRecord::from)
        .collect();
    Ok(Json(ScenarioQuestionsResponse {
        scenario,
        questions,
    }))
}
