use super::super::domain::{AnswerRecord, CandidateProfile};
use super::ProficiencyLevel;

const PATTERN_WINDOW: usize = 5;
const TREND_WINDOW: usize = 3;

pub(crate) fn performance_delta(performance_score: f64) -> f64 {
    if !performance_score.is_finite() {
        return 0.0;
    }

    if performance_score >= 0.9 {
        1.0
    } else if performance_score >= 0.75 {
        0.5
    } else if performance_score >= 0.6 {
        0.25
    } else if performance_score <= 0.3 {
        -1.0
    } else if performance_score <= 0.45 {
        -0.5
    } else {
        0.0
    }
}

/// Speed trend and recent correctness over the trailing window. The two parts are additive.
pub(crate) fn pattern_delta(history: &[AnswerRecord]) -> f64 {
    let window = &history[history.len().saturating_sub(PATTERN_WINDOW)..];
    let mut delta = 0.0;

    let times: Vec<f64> = window
        .iter()
        .filter_map(|answer| answer.time_spent_seconds)
        .filter(|seconds| seconds.is_finite() && *seconds > 0.0)
        .collect();
    if times.len() >= TREND_WINDOW {
        let recent = &times[times.len() - TREND_WINDOW..];
        if recent.windows(2).all(|pair| pair[1] < pair[0]) {
            delta += 0.2;
        }
    }

    if window.len() >= TREND_WINDOW {
        let correct = window.iter().filter(|answer| answer.is_correct).count();
        let ratio = correct as f64 / window.len() as f64;
        if ratio >= 0.8 {
            delta += 0.3;
        } else if ratio <= 0.3 {
            delta -= 0.3;
        }
    }

    delta
}

pub(crate) fn profile_delta(profile: &CandidateProfile, current: ProficiencyLevel) -> f64 {
    let mut delta = 0.0;

    if let Some(years) = profile.experience_years {
        if years >= 5.0 && current == ProficiencyLevel::Entry {
            delta += 0.5;
        } else if years <= 1.0 && current == ProficiencyLevel::Advanced {
            delta -= 0.5;
        }
    }

    if profile
        .latest_degree()
        .map(|record| record.degree.to_lowercase().contains("phd"))
        .unwrap_or(false)
    {
        delta += 0.2;
    }

    if let Some(average) = profile.average_score.filter(|score| score.is_finite()) {
        if average >= 85.0 {
            delta += 0.3;
        } else if average <= 50.0 {
            delta -= 0.3;
        }
    }

    delta
}
