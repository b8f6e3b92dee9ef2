/// Fatal engine failures. Each variant carries enough context for the caller to map it to a
/// response without parsing the message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("question {question_id} has unsupported type '{kind}'")]
    UnsupportedQuestionType { question_id: String, kind: String },
    #[error("'{label}' is not a recognized difficulty (expected one of: {expected})")]
    InvalidDifficultyState {
        label: String,
        expected: &'static str,
    },
    #[error("question {question_id} expects a {expected} answer, received {received}")]
    AnswerMismatch {
        question_id: String,
        expected: &'static str,
        received: &'static str,
    },
    #[error("question {question_id} is missing required field '{field}'")]
    MissingQuestionField {
        question_id: String,
        field: &'static str,
    },
}
