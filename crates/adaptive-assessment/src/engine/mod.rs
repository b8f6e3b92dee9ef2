//! Adaptive assessment engine.
//!
//! [`AssessmentEngine`] bundles the stateless components behind the five engine contracts:
//! feature extraction, indicator scanning, answer evaluation, difficulty control, and theme
//! extraction. It holds only configuration, so one instance can serve any number of
//! concurrent submissions.

pub mod collaborators;
pub mod difficulty;
pub mod domain;
mod error;
pub mod features;
pub mod indicators;
pub mod router;
pub mod scenario;
pub mod scoring;
pub mod session;
pub mod themes;

#[cfg(test)]
mod tests;

pub use collaborators::{
    CodeEvaluation, CodeEvaluator, CollaboratorError, ScenarioGenerator, TestCase,
};
pub use difficulty::{DifficultyAdjustment, DifficultyController, ProficiencyLevel, StepDifficulty};
pub use domain::{
    AnswerPayload, AnswerRecord, CandidateProfile, EducationRecord, Question, QuestionId,
    QuestionKind, QuestionRecord,
};
pub use error::EngineError;
pub use features::{ResponseFeatures, SentimentSummary};
pub use indicators::{
    IndicatorConfig, IndicatorSet, ProblemSolvingAnalysis, TraitScore, TraitScores,
};
pub use router::assessment_router;
pub use scenario::{adaptive_questions, GeneratedScenario, ScenarioRequest};
pub use scoring::{
    AggregationWarning, AssessmentScore, CategoryScore, Rubric, ScoreAggregator, ScoringBasis,
    ScoringCriterion, SubmissionEvaluation,
};
pub use session::{AnswerOutcome, SubmissionSession};
pub use themes::{theme_overlap, ThemeTracker};

use crate::config::EngineConfig;

#[derive(Debug, Clone)]
pub struct AssessmentEngine {
    config: EngineConfig,
    indicators: IndicatorConfig,
    aggregator: ScoreAggregator,
    difficulty: DifficultyController,
    themes: ThemeTracker,
}

impl Default for AssessmentEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl AssessmentEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_indicators(config, IndicatorConfig::assessment())
    }

    /// Swap the keyword sets used when no per-call configuration is supplied.
    pub fn with_indicators(config: EngineConfig, indicators: IndicatorConfig) -> Self {
        Self {
            aggregator: ScoreAggregator::new(&config),
            difficulty: DifficultyController::new(&config),
            themes: ThemeTracker::new(&config),
            indicators,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn indicators(&self) -> &IndicatorConfig {
        &self.indicators
    }

    pub fn extract_features(&self, text: &str) -> ResponseFeatures {
        features::extract(text)
    }

    pub fn scan_indicators(&self, text: &str, config: Option<&IndicatorConfig>) -> TraitScores {
        indicators::scan(text, config.unwrap_or(&self.indicators))
    }

    /// Approach breakdown and reasoning depth. Always uses the problem-solving approach sets.
    pub fn analyze_problem_solving(&self, text: &str) -> ProblemSolvingAnalysis {
        indicators::analyze_problem_solving(text)
    }

    pub fn evaluate_answer(
        &self,
        question: &Question,
        answer: &AnswerPayload,
        features: &ResponseFeatures,
        traits: &TraitScores,
    ) -> Result<SubmissionEvaluation, EngineError> {
        self.aggregator
            .evaluate_answer(question, answer, features, traits)
    }

    /// Four-level proficiency transition. Unknown labels are rejected.
    pub fn next_difficulty(
        &self,
        history: &[AnswerRecord],
        current: &str,
        performance_score: f64,
        profile: Option<&CandidateProfile>,
    ) -> Result<ProficiencyLevel, EngineError> {
        self.difficulty
            .next_difficulty(history, current, performance_score, profile)
    }

    /// Same transition as [`Self::next_difficulty`], with every contributing delta.
    pub fn adjust_difficulty(
        &self,
        history: &[AnswerRecord],
        current: &str,
        performance_score: f64,
        profile: Option<&CandidateProfile>,
    ) -> Result<DifficultyAdjustment, EngineError> {
        self.difficulty
            .adjust(history, current, performance_score, profile)
    }

    pub fn next_step_difficulty(
        &self,
        history: &[AnswerRecord],
        current: &str,
    ) -> Result<StepDifficulty, EngineError> {
        self.difficulty.next_step_difficulty_label(history, current)
    }

    pub fn extract_themes<S: AsRef<str>>(&self, prior_texts: &[S]) -> Vec<String> {
        self.themes.extract_themes(prior_texts)
    }

    /// Build a generator request that steers away from everything in `prior_texts`.
    pub fn scenario_request<S: AsRef<str>>(
        &self,
        role: &str,
        difficulty: ProficiencyLevel,
        skills: Vec<String>,
        prior_texts: &[S],
        experience_years: Option<f64>,
    ) -> ScenarioRequest {
        ScenarioRequest {
            role: role.to_string(),
            difficulty,
            skills,
            avoid_themes: self.extract_themes(prior_texts),
            experience_years,
        }
    }
}
