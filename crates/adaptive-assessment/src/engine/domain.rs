use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::collaborators::{CodeEvaluation, TestCase};
use super::error::EngineError;

/// Identifier wrapper for assessment questions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

/// A scorable question. Each kind carries only what its scoring rule needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub kind: QuestionKind,
    pub points: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<String>,
        correct_answer: String,
    },
    Coding {
        #[serde(default)]
        test_cases: Vec<TestCase>,
    },
    Behavioral,
    Scenario,
}

impl QuestionKind {
    pub const fn label(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "multiple_choice",
            QuestionKind::Coding { .. } => "coding",
            QuestionKind::Behavioral => "behavioral",
            QuestionKind::Scenario => "scenario",
        }
    }

    pub const fn expects(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "choice",
            QuestionKind::Coding { .. } => "code",
            QuestionKind::Behavioral | QuestionKind::Scenario => "text",
        }
    }
}

/// Loosely typed question as stored by the document layer, keyed by a string `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub points: f64,
    pub category: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

impl TryFrom<QuestionRecord> for Question {
    type Error = EngineError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let id = QuestionId(record.id);
        let kind = match record.question_type.trim().to_ascii_lowercase().as_str() {
            "multiple_choice" => QuestionKind::MultipleChoice {
                options: record.options,
                correct_answer: record.correct_answer.ok_or_else(|| {
                    EngineError::MissingQuestionField {
                        question_id: id.0.clone(),
                        field: "correct_answer",
                    }
                })?,
            },
            "coding" => QuestionKind::Coding {
                test_cases: record.test_cases,
            },
            "behavioral" => QuestionKind::Behavioral,
            // Generated follow-ups are free text and score like scenario answers.
            "scenario" | "technical" | "leadership" => QuestionKind::Scenario,
            _ => {
                return Err(EngineError::UnsupportedQuestionType {
                    question_id: id.0,
                    kind: record.question_type,
                })
            }
        };

        Ok(Question {
            id,
            prompt: record.content,
            kind,
            points: record.points,
            category: record.category,
        })
    }
}

impl From<Question> for QuestionRecord {
    fn from(question: Question) -> Self {
        let question_type = question.kind.label().to_string();
        let (options, correct_answer, test_cases) = match question.kind {
            QuestionKind::MultipleChoice {
                options,
                correct_answer,
            } => (options, Some(correct_answer), Vec::new()),
            QuestionKind::Coding { test_cases } => (Vec::new(), None, test_cases),
            QuestionKind::Behavioral | QuestionKind::Scenario => (Vec::new(), None, Vec::new()),
        };

        QuestionRecord {
            id: question.id.0,
            content: question.prompt,
            question_type,
            points: question.points,
            category: question.category,
            options,
            correct_answer,
            test_cases,
        }
    }
}

/// Candidate answer as submitted, tagged by shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerPayload {
    Choice(String),
    Code {
        source: String,
        /// Result from the external code evaluator, attached by the caller when available.
        #[serde(default)]
        evaluation: Option<CodeEvaluation>,
    },
    Text(String),
}

impl AnswerPayload {
    pub fn text(&self) -> &str {
        match self {
            AnswerPayload::Choice(choice) => choice,
            AnswerPayload::Code { source, .. } => source,
            AnswerPayload::Text(text) => text,
        }
    }

    pub const fn shape(&self) -> &'static str {
        match self {
            AnswerPayload::Choice(_) => "choice",
            AnswerPayload::Code { .. } => "code",
            AnswerPayload::Text(_) => "text",
        }
    }
}

/// Append-only history unit for a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub is_correct: bool,
    pub points: f64,
    #[serde(default)]
    pub time_spent_seconds: Option<f64>,
    pub submitted_at: DateTime<Utc>,
}

/// Background the caller already holds about the candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub experience_years: Option<f64>,
    #[serde(default)]
    pub education: Vec<EducationRecord>,
    /// Mean percentage score across previous assessments.
    #[serde(default)]
    pub average_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub degree: String,
    #[serde(default)]
    pub graduation_year: Option<i32>,
}

impl CandidateProfile {
    /// Most recently completed degree; undated degrees sort last.
    pub fn latest_degree(&self) -> Option<&EducationRecord> {
        self.education
            .iter()
            .enumerate()
            .max_by(|(left_idx, left), (right_idx, right)| {
                left.graduation_year
                    .unwrap_or(0)
                    .cmp(&right.graduation_year.unwrap_or(0))
                    .then(right_idx.cmp(left_idx))
            })
            .map(|(_, record)| record)
    }
}
