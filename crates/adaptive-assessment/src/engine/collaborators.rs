//! Contracts for the external services that surround the engine.
//!
//! The engine never invokes these itself. Callers run them before or after an engine call and
//! hand the results in as plain data (for example, a [`CodeEvaluation`] attached to a coding
//! answer).

use serde::{Deserialize, Serialize};

use super::scenario::{GeneratedScenario, ScenarioRequest};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
}

/// Outcome reported by a sandboxed code evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeEvaluation {
    pub passed: bool,
    #[serde(default)]
    pub output: String,
    /// Optional 0-100 quality score; when absent, a pass earns full points.
    #[serde(default)]
    pub score: Option<f64>,
}

pub trait CodeEvaluator: Send + Sync {
    fn evaluate_code(
        &self,
        code: &str,
        test_cases: &[TestCase],
    ) -> Result<CodeEvaluation, CollaboratorError>;
}

pub trait ScenarioGenerator: Send + Sync {
    fn generate_scenario(
        &self,
        request: &ScenarioRequest,
    ) -> Result<GeneratedScenario, CollaboratorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
    #[error("collaborator returned an unusable response: {0}")]
    InvalidResponse(String),
}
