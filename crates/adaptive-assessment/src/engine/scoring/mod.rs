//! Converts extracted signals and question metadata into points and category scores.

mod rubric;
mod rules;

pub use rubric::{AggregationWarning, AssessmentScore, Rubric, ScoringCriterion};

use serde::{Deserialize, Serialize};

use super::domain::{AnswerPayload, Question, QuestionId, QuestionKind};
use super::error::EngineError;
use super::features::ResponseFeatures;
use super::indicators::TraitScores;
use crate::config::EngineConfig;

/// How the points of an evaluation were established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringBasis {
    ExactMatch,
    ExternalEvaluator,
    Heuristic,
    /// Placeholder credit awarded because no code evaluation was available.
    Unverified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: String,
    pub raw_points: f64,
    pub max_points: f64,
    pub percentage: f64,
    pub passed: bool,
}

impl CategoryScore {
    pub(crate) fn new(category: String, raw_points: f64, max_points: f64, threshold: f64) -> Self {
        let percentage = if max_points > 0.0 {
            (raw_points / max_points * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        Self {
            category,
            raw_points: raw_points.max(0.0),
            max_points,
            percentage,
            passed: percentage >= threshold,
        }
    }
}

/// Immutable result of scoring one answer. A resubmission produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionEvaluation {
    pub question_id: QuestionId,
    pub total_score: f64,
    pub max_score: f64,
    pub category_scores: Vec<CategoryScore>,
    pub is_correct: bool,
    pub basis: ScoringBasis,
}

impl SubmissionEvaluation {
    pub fn is_verified(&self) -> bool {
        self.basis != ScoringBasis::Unverified
    }
}

/// Stateless scorer holding the thresholds it applies.
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    category_threshold: f64,
    correctness_ratio: f64,
    coding_placeholder_ratio: f64,
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl ScoreAggregator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            category_threshold: config.category_threshold,
            correctness_ratio: config.correctness_ratio,
            coding_placeholder_ratio: config.coding_placeholder_ratio,
        }
    }

    pub fn category_threshold(&self) -> f64 {
        self.category_threshold
    }

    pub fn evaluate_answer(
        &self,
        question: &Question,
        answer: &AnswerPayload,
        features: &ResponseFeatures,
        traits: &TraitScores,
    ) -> Result<SubmissionEvaluation, EngineError> {
        let max_points = if question.points.is_finite() {
            question.points.max(0.0)
        } else {
            0.0
        };

        let awarded = match (&question.kind, answer) {
            (QuestionKind::MultipleChoice { correct_answer, .. }, AnswerPayload::Choice(choice)) => {
                rules::multiple_choice(max_points, correct_answer, choice)
            }
            (QuestionKind::Coding { .. }, AnswerPayload::Code { evaluation, .. }) => rules::coding(
                max_points,
                evaluation.as_ref(),
                self.coding_placeholder_ratio,
            ),
            (QuestionKind::Behavioral | QuestionKind::Scenario, AnswerPayload::Text(_)) => {
                rules::free_text(max_points, features, traits, self.correctness_ratio)
            }
            (kind, payload) => {
                return Err(EngineError::AnswerMismatch {
                    question_id: question.id.0.clone(),
                    expected: kind.expects(),
                    received: payload.shape(),
                })
            }
        };

        if awarded.basis == ScoringBasis::Unverified {
            tracing::warn!(question = %question.id.0, "no code evaluation attached; awarding unverified placeholder score");
        }

        tracing::debug!(
            question = %question.id.0,
            kind = question.kind.label(),
            points = awarded.points,
            max_points,
            "scored answer"
        );

        Ok(SubmissionEvaluation {
            question_id: question.id.clone(),
            total_score: awarded.points,
            max_score: max_points,
            category_scores: vec![CategoryScore::new(
                question.category.clone(),
                awarded.points,
                max_points,
                self.category_threshold,
            )],
            is_correct: awarded.is_correct,
            basis: awarded.basis,
        })
    }
}
