use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{scan, IndicatorConfig, TraitScores};
use crate::engine::features::{clamp_score, sentences, tokenize};

static COMPLEXITY_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(however|although|nevertheless|despite|while|conversely|alternatively|in\s+contrast|on\s+the\s+other\s+hand|multiple|various|different|several|many|complex|complicated|intricate|sophisticated|nuanced)\b",
    )
    .expect("complexity marker regex")
});

/// Sentence length at which the length term reaches its full weight.
const LONG_SENTENCE_WORDS: f64 = 20.0;
/// Marker count at which the marker term reaches its full weight.
const MARKER_SATURATION: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemSolvingAnalysis {
    /// Scores per style; `dominant_trait` is the dominant approach.
    pub approaches: TraitScores,
    pub complexity: f64,
    /// Mean of the approach scores.
    pub overall_score: f64,
}

pub fn analyze_problem_solving(text: &str) -> ProblemSolvingAnalysis {
    let approaches = scan(text, &IndicatorConfig::problem_solving_approach());
    let overall_score = if approaches.traits.is_empty() {
        0.0
    } else {
        approaches.traits.iter().map(|entry| entry.score).sum::<f64>()
            / approaches.traits.len() as f64
    };

    ProblemSolvingAnalysis {
        complexity: problem_solving_complexity(text),
        overall_score,
        approaches,
    }
}

/// `min(100, avg_sentence_len / 20 * 30 + lexical_diversity * 40 + markers / 5 * 30)`.
/// Text with no words scores 0.
pub fn problem_solving_complexity(text: &str) -> f64 {
    let tokens = tokenize(text);
    let sentence_count = sentences(text).len();
    if tokens.is_empty() || sentence_count == 0 {
        return 0.0;
    }

    let word_count = tokens.len() as f64;
    let unique: HashSet<String> = tokens.iter().map(|token| token.to_lowercase()).collect();
    let markers = COMPLEXITY_MARKERS.find_iter(text).count() as f64;

    clamp_score(
        word_count / sentence_count as f64 / LONG_SENTENCE_WORDS * 30.0
            + unique.len() as f64 / word_count * 40.0
            + markers / MARKER_SATURATION * 30.0,
    )
}
