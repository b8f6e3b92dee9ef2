//! Difficulty control: a one-step ladder for adaptive flows and a continuous controller for
//! generated role assessments.

mod levels;
mod signals;

pub use levels::{ProficiencyLevel, StepDifficulty};

use serde::{Deserialize, Serialize};

use super::domain::{AnswerRecord, CandidateProfile};
use super::error::EngineError;
use crate::config::EngineConfig;

/// Number of trailing answers the step ladder inspects.
pub const STEP_WINDOW: usize = 3;

/// Breakdown of a four-level adjustment for audit trails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyAdjustment {
    pub previous: ProficiencyLevel,
    pub performance_delta: f64,
    pub pattern_delta: f64,
    pub profile_delta: f64,
    /// `previous + deltas` clamped to 1..=4, before rounding.
    pub target_value: f64,
    pub next: ProficiencyLevel,
}

#[derive(Debug, Clone)]
pub struct DifficultyController {
    promote_threshold: f64,
    demote_threshold: f64,
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl DifficultyController {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            promote_threshold: config.promote_threshold,
            demote_threshold: config.demote_threshold,
        }
    }

    /// Move at most one step based on the last three answers. Shorter histories hold.
    pub fn next_step_difficulty(
        &self,
        history: &[AnswerRecord],
        current: StepDifficulty,
    ) -> StepDifficulty {
        if history.len() < STEP_WINDOW {
            return current;
        }

        let window = &history[history.len() - STEP_WINDOW..];
        let correct = window.iter().filter(|answer| answer.is_correct).count();
        let performance = correct as f64 / STEP_WINDOW as f64;

        let next = if performance >= self.promote_threshold {
            current.harder()
        } else if performance <= self.demote_threshold {
            current.easier()
        } else {
            current
        };

        if next != current {
            tracing::debug!(from = %current, to = %next, performance, "step difficulty changed");
        }
        next
    }

    /// String-labelled variant that rejects unknown levels.
    pub fn next_step_difficulty_label(
        &self,
        history: &[AnswerRecord],
        current: &str,
    ) -> Result<StepDifficulty, EngineError> {
        let current = current.parse::<StepDifficulty>()?;
        Ok(self.next_step_difficulty(history, current))
    }

    pub fn next_difficulty(
        &self,
        history: &[AnswerRecord],
        current: &str,
        performance_score: f64,
        profile: Option<&CandidateProfile>,
    ) -> Result<ProficiencyLevel, EngineError> {
        self.adjust(history, current, performance_score, profile)
            .map(|adjustment| adjustment.next)
    }

    pub fn adjust(
        &self,
        history: &[AnswerRecord],
        current: &str,
        performance_score: f64,
        profile: Option<&CandidateProfile>,
    ) -> Result<DifficultyAdjustment, EngineError> {
        let previous = current.parse::<ProficiencyLevel>()?;

        if !performance_score.is_finite() {
            tracing::warn!(performance_score, "non-finite performance score treated as neutral");
        }

        let performance_delta = signals::performance_delta(performance_score);
        let pattern_delta = signals::pattern_delta(history);
        let profile_delta = profile
            .map(|profile| signals::profile_delta(profile, previous))
            .unwrap_or(0.0);

        let target_value = (previous.value() + performance_delta + pattern_delta + profile_delta)
            .clamp(1.0, 4.0);
        let next = ProficiencyLevel::from_value(target_value);

        tracing::debug!(
            from = %previous,
            to = %next,
            performance_delta,
            pattern_delta,
            profile_delta,
            "proficiency level adjusted"
        );

        Ok(DifficultyAdjustment {
            previous,
            performance_delta,
            pattern_delta,
            profile_delta,
            target_value,
            next,
        })
    }
}
