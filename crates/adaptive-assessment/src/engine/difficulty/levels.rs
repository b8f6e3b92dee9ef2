use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::super::error::EngineError;

/// Three-step ladder used by adaptive candidate flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDifficulty {
    Easy,
    Medium,
    Hard,
}

impl StepDifficulty {
    pub const EXPECTED: &'static str = "easy, medium, hard";

    pub const fn ordered() -> [Self; 3] {
        [Self::Easy, Self::Medium, Self::Hard]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn harder(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium | Self::Hard => Self::Hard,
        }
    }

    pub fn easier(self) -> Self {
        match self {
            Self::Hard => Self::Medium,
            Self::Medium | Self::Easy => Self::Easy,
        }
    }
}

impl Default for StepDifficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for StepDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StepDifficulty {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|level| level.label() == value.trim())
            .ok_or_else(|| EngineError::InvalidDifficultyState {
                label: value.to_string(),
                expected: Self::EXPECTED,
            })
    }
}

/// Four-level scale used by generated role assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencyLevel {
    Entry,
    Intermediate,
    Advanced,
    Expert,
}

impl ProficiencyLevel {
    pub const EXPECTED: &'static str = "entry, intermediate, advanced, expert";

    pub const fn ordered() -> [Self; 4] {
        [Self::Entry, Self::Intermediate, Self::Advanced, Self::Expert]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    /// Position on the 1..=4 scale.
    pub const fn value(self) -> f64 {
        match self {
            Self::Entry => 1.0,
            Self::Intermediate => 2.0,
            Self::Advanced => 3.0,
            Self::Expert => 4.0,
        }
    }

    /// Clamp to 1..=4, round to the nearest level.
    pub fn from_value(value: f64) -> Self {
        let clamped = if value.is_finite() {
            value.clamp(1.0, 4.0)
        } else {
            1.0
        };
        match clamped.round() as u8 {
            1 => Self::Entry,
            2 => Self::Intermediate,
            3 => Self::Advanced,
            _ => Self::Expert,
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProficiencyLevel {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|level| level.label() == value.trim())
            .ok_or_else(|| EngineError::InvalidDifficultyState {
                label: value.to_string(),
                expected: Self::EXPECTED,
            })
    }
}
