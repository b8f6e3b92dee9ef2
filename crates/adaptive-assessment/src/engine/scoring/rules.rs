use super::super::collaborators::CodeEvaluation;
use super::super::features::{clamp_score, ResponseFeatures};
use super::super::indicators::TraitScores;
use super::ScoringBasis;

pub(crate) struct PointsAwarded {
    pub points: f64,
    pub is_correct: bool,
    pub basis: ScoringBasis,
}

/// Exact string match, all or nothing.
pub(crate) fn multiple_choice(max_points: f64, correct_answer: &str, choice: &str) -> PointsAwarded {
    let is_correct = choice == correct_answer;
    PointsAwarded {
        points: if is_correct { max_points } else { 0.0 },
        is_correct,
        basis: ScoringBasis::ExactMatch,
    }
}

/// Uses the external evaluator's verdict, or a flagged placeholder share when none was attached.
pub(crate) fn coding(
    max_points: f64,
    evaluation: Option<&CodeEvaluation>,
    placeholder_ratio: f64,
) -> PointsAwarded {
    match evaluation {
        Some(result) => {
            let points = match result.score {
                Some(score) => (max_points * clamp_score(score) / 100.0).floor(),
                None if result.passed => max_points,
                None => 0.0,
            };
            PointsAwarded {
                points,
                is_correct: result.passed,
                basis: ScoringBasis::ExternalEvaluator,
            }
        }
        None => {
            let points = (max_points * placeholder_ratio).floor();
            PointsAwarded {
                points,
                is_correct: points > 0.0,
                basis: ScoringBasis::Unverified,
            }
        }
    }
}

/// `floor(max * (sentiment + communication + leadership) / 300)`, each term clamped to 0..=100.
pub(crate) fn free_text(
    max_points: f64,
    features: &ResponseFeatures,
    traits: &TraitScores,
    correctness_ratio: f64,
) -> PointsAwarded {
    let sentiment = clamp_score(features.sentiment.score);
    let communication = clamp_score(features.communication_score());
    let leadership = clamp_score(traits.score("leadership"));

    let points = (max_points * (sentiment + communication + leadership) / 300.0).floor();
    PointsAwarded {
        points,
        is_correct: points > max_points * correctness_ratio,
        basis: ScoringBasis::Heuristic,
    }
}
