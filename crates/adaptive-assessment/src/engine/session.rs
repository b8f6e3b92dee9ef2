use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::difficulty::StepDifficulty;
use super::domain::{AnswerPayload, AnswerRecord, Question};
use super::error::EngineError;
use super::features::ResponseFeatures;
use super::indicators::TraitScores;
use super::scoring::{AssessmentScore, Rubric, SubmissionEvaluation};
use super::AssessmentEngine;

/// One candidate's attempt at one assessment, owned and persisted by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionSession {
    #[serde(default)]
    pub adaptive: bool,
    #[serde(default)]
    pub current_difficulty: StepDifficulty,
    #[serde(default)]
    pub answers: Vec<AnswerRecord>,
    #[serde(default)]
    pub evaluations: Vec<SubmissionEvaluation>,
}

impl SubmissionSession {
    pub fn new(adaptive: bool) -> Self {
        Self {
            adaptive,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub session: SubmissionSession,
    pub evaluation: SubmissionEvaluation,
    pub features: ResponseFeatures,
    pub traits: TraitScores,
    pub difficulty_changed: bool,
}

impl AssessmentEngine {
    /// Score one answer and append it to a copy of the session. Earlier evaluations are
    /// carried over untouched; resubmitting a question appends a new evaluation.
    pub fn record_answer(
        &self,
        session: &SubmissionSession,
        question: &Question,
        answer: &AnswerPayload,
        time_spent_seconds: Option<f64>,
        submitted_at: DateTime<Utc>,
    ) -> Result<AnswerOutcome, EngineError> {
        let features = self.extract_features(answer.text());
        let traits = self.scan_indicators(answer.text(), None);
        let evaluation = self.evaluate_answer(question, answer, &features, &traits)?;

        let mut next = session.clone();
        next.answers.push(AnswerRecord {
            question_id: question.id.clone(),
            is_correct: evaluation.is_correct,
            points: evaluation.total_score,
            time_spent_seconds,
            submitted_at,
        });
        next.evaluations.push(evaluation.clone());

        if next.adaptive {
            next.current_difficulty = self
                .difficulty
                .next_step_difficulty(&next.answers, session.current_difficulty);
        }
        let difficulty_changed = next.current_difficulty != session.current_difficulty;

        tracing::debug!(
            question = %question.id.0,
            answers = next.answers.len(),
            difficulty = %next.current_difficulty,
            difficulty_changed,
            "answer recorded"
        );

        Ok(AnswerOutcome {
            session: next,
            evaluation,
            features,
            traits,
            difficulty_changed,
        })
    }

    pub fn finish(
        &self,
        session: &SubmissionSession,
        questions: &[Question],
        rubric: &Rubric,
    ) -> AssessmentScore {
        self.aggregator
            .aggregate(questions, &session.evaluations, rubric)
    }
}
