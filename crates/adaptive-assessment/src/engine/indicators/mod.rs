//! Keyword-density trait detection.

mod approach;
mod config;

pub use approach::{analyze_problem_solving, problem_solving_complexity, ProblemSolvingAnalysis};
pub use config::{IndicatorConfig, IndicatorSet};

use serde::{Deserialize, Serialize};

use super::features::tokenize;

/// Tie-break order for the dominant trait; unlisted traits rank after these in declared order.
pub const TRAIT_PRIORITY: [&str; 7] = [
    "leadership",
    "collaboration",
    "problem_solving",
    "decision_making",
    "team_orientation",
    "vision",
    "accountability",
];

const HIT_SCALE: f64 = 500.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitScore {
    pub trait_name: String,
    pub score: f64,
    pub hits: usize,
    pub matched_keywords: Vec<String>,
}

/// Trait estimates normalized against the total indicator hits across all traits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitScores {
    pub traits: Vec<TraitScore>,
    pub total_hits: usize,
    /// `None` when the text contained no indicator at all.
    pub dominant_trait: Option<String>,
}

impl TraitScores {
    /// Score for `trait_name`, or 0 when the trait was not configured.
    pub fn score(&self, trait_name: &str) -> f64 {
        self.traits
            .iter()
            .find(|entry| entry.trait_name == trait_name)
            .map(|entry| entry.score)
            .unwrap_or(0.0)
    }
}

pub fn scan(text: &str, config: &IndicatorConfig) -> TraitScores {
    let lowered = text.to_lowercase();
    let tokens = tokenize(&lowered);

    let mut traits: Vec<TraitScore> = config
        .sets
        .iter()
        .map(|set| count_hits(set, &lowered, &tokens))
        .collect();

    let total_hits: usize = traits.iter().map(|entry| entry.hits).sum();
    if total_hits > 0 {
        for entry in &mut traits {
            entry.score = (entry.hits as f64 / total_hits as f64 * HIT_SCALE).min(100.0);
        }
    }

    let dominant_trait = if total_hits == 0 {
        None
    } else {
        dominant(&traits)
    };

    tracing::debug!(total_hits, dominant = ?dominant_trait, "scanned trait indicators");

    TraitScores {
        traits,
        total_hits,
        dominant_trait,
    }
}

fn count_hits(set: &IndicatorSet, lowered: &str, tokens: &[&str]) -> TraitScore {
    let (phrases, words): (Vec<String>, Vec<String>) = set
        .keywords
        .iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .partition(|keyword| is_phrase(keyword));

    let token_hits = tokens
        .iter()
        .filter(|token| words.iter().any(|word| token.contains(word.as_str())))
        .count();
    let phrase_hits: usize = phrases
        .iter()
        .map(|phrase| lowered.matches(phrase.as_str()).count())
        .sum();

    let matched_keywords = words
        .iter()
        .filter(|word| tokens.iter().any(|token| token.contains(word.as_str())))
        .chain(phrases.iter().filter(|phrase| lowered.contains(phrase.as_str())))
        .cloned()
        .collect();

    TraitScore {
        trait_name: set.trait_name.clone(),
        score: 0.0,
        hits: token_hits + phrase_hits,
        matched_keywords,
    }
}

/// Anything the tokenizer would split apart has to be matched against the whole text.
fn is_phrase(keyword: &str) -> bool {
    keyword
        .chars()
        .any(|c| !(c.is_alphanumeric() || c == '_'))
}

fn dominant(traits: &[TraitScore]) -> Option<String> {
    let rank = |index: usize, name: &str| {
        TRAIT_PRIORITY
            .iter()
            .position(|candidate| *candidate == name)
            .unwrap_or(TRAIT_PRIORITY.len() + index)
    };

    traits
        .iter()
        .enumerate()
        .min_by(|(left_idx, left), (right_idx, right)| {
            right
                .score
                .total_cmp(&left.score)
                .then(rank(*left_idx, &left.trait_name).cmp(&rank(*right_idx, &right.trait_name)))
        })
        .map(|(_, entry)| entry.trait_name.clone())
}
