use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{Question, QuestionId};
use super::{CategoryScore, ScoreAggregator, SubmissionEvaluation};

/// Categories at or above this percentage are reported as strengths.
const STRENGTH_PERCENTAGE: f64 = 70.0;

/// Weight and pass mark for one rubric category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringCriterion {
    pub category: String,
    pub weight: f64,
    #[serde(default)]
    pub passing_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    #[serde(default)]
    pub criteria: Vec<ScoringCriterion>,
    /// Overall pass mark as a percentage of max points.
    #[serde(default)]
    pub passing_score: Option<f64>,
}

impl Rubric {
    fn criterion(&self, category: &str) -> Option<&ScoringCriterion> {
        self.criteria
            .iter()
            .find(|criterion| criterion.category == category)
    }
}

/// Non-fatal conditions surfaced alongside an aggregate score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AggregationWarning {
    /// The category is scored but left out of the weighted total.
    MissingRubricWeight { category: String },
    /// An evaluation referenced a question outside the assessment and was ignored.
    UnknownQuestion { question_id: QuestionId },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentScore {
    pub total_score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub category_scores: Vec<CategoryScore>,
    pub weighted_score: Option<f64>,
    pub passed: Option<bool>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub warnings: Vec<AggregationWarning>,
}

#[derive(Default)]
struct CategoryTally {
    earned: f64,
    max: f64,
}

impl ScoreAggregator {
    /// Roll question evaluations up into per-category and overall scores.
    ///
    /// Every question counts toward its category's max points; unanswered questions earn
    /// nothing. When a question was evaluated more than once, the latest evaluation counts.
    pub fn aggregate(
        &self,
        questions: &[Question],
        evaluations: &[SubmissionEvaluation],
        rubric: &Rubric,
    ) -> AssessmentScore {
        let mut warnings = Vec::new();

        let mut latest: HashMap<&QuestionId, &SubmissionEvaluation> = HashMap::new();
        for evaluation in evaluations {
            if questions.iter().any(|question| question.id == evaluation.question_id) {
                latest.insert(&evaluation.question_id, evaluation);
            } else {
                warnings.push(AggregationWarning::UnknownQuestion {
                    question_id: evaluation.question_id.clone(),
                });
            }
        }

        let mut order: Vec<&str> = Vec::new();
        let mut tallies: HashMap<&str, CategoryTally> = HashMap::new();
        for question in questions {
            let category = question.category.as_str();
            let tally = tallies.entry(category).or_insert_with(|| {
                order.push(category);
                CategoryTally::default()
            });
            tally.max += question.points.max(0.0);
            tally.earned += latest
                .get(&question.id)
                .map(|evaluation| evaluation.total_score)
                .unwrap_or(0.0);
        }

        let category_scores: Vec<CategoryScore> = order
            .iter()
            .filter_map(|category| {
                let tally = tallies.get(category)?;
                let threshold = rubric
                    .criterion(category)
                    .and_then(|criterion| criterion.passing_score)
                    .unwrap_or(self.category_threshold);
                Some(CategoryScore::new(
                    category.to_string(),
                    tally.earned,
                    tally.max,
                    threshold,
                ))
            })
            .collect();

        let weighted_score = weighted(&category_scores, rubric, &mut warnings);

        let total_score: f64 = category_scores.iter().map(|score| score.raw_points).sum();
        let max_score: f64 = category_scores.iter().map(|score| score.max_points).sum();
        let percentage = if max_score > 0.0 {
            (total_score / max_score * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        let (strengths, areas_for_improvement): (Vec<&CategoryScore>, Vec<&CategoryScore>) =
            category_scores
                .iter()
                .partition(|score| score.percentage >= STRENGTH_PERCENTAGE);

        for warning in &warnings {
            tracing::warn!(?warning, "assessment aggregation warning");
        }

        AssessmentScore {
            total_score,
            max_score,
            percentage,
            passed: rubric.passing_score.map(|mark| percentage >= mark),
            strengths: strengths.iter().map(|score| score.category.clone()).collect(),
            areas_for_improvement: areas_for_improvement
                .iter()
                .map(|score| score.category.clone())
                .collect(),
            category_scores,
            weighted_score,
            warnings,
        }
    }
}

fn weighted(
    category_scores: &[CategoryScore],
    rubric: &Rubric,
    warnings: &mut Vec<AggregationWarning>,
) -> Option<f64> {
    if rubric.criteria.is_empty() {
        return None;
    }

    let mut weight_sum = 0.0;
    let mut weighted_sum = 0.0;
    for score in category_scores {
        match rubric
            .criterion(&score.category)
            .map(|criterion| criterion.weight)
            .filter(|weight| weight.is_finite() && *weight > 0.0)
        {
            Some(weight) => {
                weight_sum += weight;
                weighted_sum += weight * score.percentage;
            }
            None => warnings.push(AggregationWarning::MissingRubricWeight {
                category: score.category.clone(),
            }),
        }
    }

    (weight_sum > 0.0).then(|| weighted_sum / weight_sum)
}
