use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::engine::{
    AnswerRecord, AssessmentEngine, Question, QuestionId, QuestionKind, ResponseFeatures,
    SentimentSummary, TraitScore, TraitScores,
};

pub(super) fn engine() -> AssessmentEngine {
    AssessmentEngine::default()
}

pub(super) fn submitted_at(offset_minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0)
        .single()
        .expect("valid timestamp")
        + Duration::minutes(offset_minutes)
}

pub(super) fn answer(index: usize, is_correct: bool, seconds: Option<f64>) -> AnswerRecord {
    AnswerRecord {
        question_id: QuestionId(format!("q-{index}")),
        is_correct,
        points: if is_correct { 10.0 } else { 0.0 },
        time_spent_seconds: seconds,
        submitted_at: submitted_at(index as i64),
    }
}

/// History with no timing data, one entry per flag.
pub(super) fn history(outcomes: &[bool]) -> Vec<AnswerRecord> {
    outcomes
        .iter()
        .enumerate()
        .map(|(index, correct)| answer(index, *correct, None))
        .collect()
}

pub(super) fn timed_history(entries: &[(bool, f64)]) -> Vec<AnswerRecord> {
    entries
        .iter()
        .enumerate()
        .map(|(index, (correct, seconds))| answer(index, *correct, Some(*seconds)))
        .collect()
}

pub(super) fn multiple_choice(id: &str, category: &str, points: f64, correct: &str) -> Question {
    Question {
        id: QuestionId::new(id),
        prompt: format!("Pick the right option for {id}"),
        kind: QuestionKind::MultipleChoice {
            options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            correct_answer: correct.to_string(),
        },
        points,
        category: category.to_string(),
    }
}

pub(super) fn behavioral(id: &str, category: &str, points: f64) -> Question {
    Question {
        id: QuestionId::new(id),
        prompt: "Describe a time you led a difficult project.".to_string(),
        kind: QuestionKind::Behavioral,
        points,
        category: category.to_string(),
    }
}

pub(super) fn coding(id: &str, points: f64) -> Question {
    Question {
        id: QuestionId::new(id),
        prompt: "Reverse a linked list.".to_string(),
        kind: QuestionKind::Coding {
            test_cases: Vec::new(),
        },
        points,
        category: "technical_expertise".to_string(),
    }
}

/// Features with the three free-text scoring inputs pinned.
pub(super) fn features_with(sentiment: f64, clarity: f64, coherence: f64) -> ResponseFeatures {
    ResponseFeatures {
        word_count: 40,
        sentence_count: 3,
        avg_word_length: 4.5,
        avg_sentence_length: 13.3,
        lexical_diversity: 0.7,
        sentiment: SentimentSummary {
            score: sentiment,
            comparative: sentiment / 40.0,
            positive_terms: Vec::new(),
            negative_terms: Vec::new(),
        },
        clarity,
        complexity: 60.0,
        coherence,
        formality: 50.0,
        assertiveness: 50.0,
    }
}

pub(super) fn traits_with_leadership(score: f64) -> TraitScores {
    TraitScores {
        traits: vec![TraitScore {
            trait_name: "leadership".to_string(),
            score,
            hits: 3,
            matched_keywords: vec!["lead".to_string()],
        }],
        total_hits: 3,
        dominant_trait: Some("leadership".to_string()),
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(super) fn approx(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-9
}

pub(super) fn assessment_router_with_engine(engine: AssessmentEngine) -> axum::Router {
    crate::engine::assessment_router(std::sync::Arc::new(engine))
}

pub(super) fn json_request(path: &str, payload: &Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(path)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(payload).expect("serialize payload"),
        ))
        .expect("build request")
}
