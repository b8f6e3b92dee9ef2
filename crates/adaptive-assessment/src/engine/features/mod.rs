//! Quantitative signals extracted from free-text responses.

mod lexicon;

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use lexicon::{FORMAL_MARKERS, INFORMAL_MARKERS, NEGATORS, TRANSITION_PHRASES};

const NEUTRAL_SCORE: f64 = 50.0;
const IDEAL_SENTENCE_LENGTH: f64 = 15.0;

static CONTRACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w+'\w+\b").expect("contraction regex"));

static ASSERTIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bI (will|am going to)\b",
        r"(?i)\bI (believe|think|know)\b",
        r"(?i)\b(must|need to|should|will)\b",
        r"(?i)\b(definitely|certainly|absolutely)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("assertive regex"))
    .collect()
});

static HESITANT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(maybe|perhaps|possibly)\b",
        r"(?i)\b(might|could|may)\b",
        r"(?i)\b(sort of|kind of)\b",
        r"(?i)\b(I guess|I suppose)\b",
        r"(?i)\b(not sure|uncertain)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("hesitant regex"))
    .collect()
});

/// Lexicon polarity of a response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub score: f64,
    pub comparative: f64,
    pub positive_terms: Vec<String>,
    pub negative_terms: Vec<String>,
}

/// Per-response metrics. Every `0..=100` field is clamped; empty input yields neutral values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFeatures {
    pub word_count: usize,
    pub sentence_count: usize,
    pub avg_word_length: f64,
    pub avg_sentence_length: f64,
    pub lexical_diversity: f64,
    pub sentiment: SentimentSummary,
    pub clarity: f64,
    pub complexity: f64,
    pub coherence: f64,
    pub formality: f64,
    pub assertiveness: f64,
}

impl ResponseFeatures {
    /// Mean of clarity and coherence, the communication term of free-text scoring.
    pub fn communication_score(&self) -> f64 {
        (self.clarity + self.coherence) / 2.0
    }
}

/// Compute every feature for `text`. Never fails.
pub fn extract(text: &str) -> ResponseFeatures {
    let tokens = tokenize(text);
    let sentences = sentences(text);

    let word_count = tokens.len();
    let sentence_count = sentences.len();

    let avg_word_length = ratio(
        tokens.iter().map(|token| token.chars().count()).sum::<usize>() as f64,
        word_count as f64,
    );
    let avg_sentence_length = ratio(word_count as f64, sentence_count as f64);

    let unique: HashSet<String> = tokens.iter().map(|token| token.to_lowercase()).collect();
    let lexical_diversity = ratio(unique.len() as f64, word_count as f64);

    let clarity = if word_count == 0 {
        NEUTRAL_SCORE
    } else {
        clamp_score(100.0 - 2.0 * (avg_sentence_length - IDEAL_SENTENCE_LENGTH).abs())
    };
    let complexity = clamp_score(avg_word_length * 10.0 + lexical_diversity * 40.0);

    ResponseFeatures {
        word_count,
        sentence_count,
        avg_word_length,
        avg_sentence_length,
        lexical_diversity,
        sentiment: sentiment(&tokens),
        clarity,
        complexity,
        coherence: coherence(&sentences),
        formality: formality(text, &tokens),
        assertiveness: assertiveness(text),
    }
}

/// Split on anything that is not a letter, digit, or underscore.
pub(crate) fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .collect()
}

/// Split on runs of `.`, `!`, `?`, dropping blank fragments.
pub(crate) fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

fn sentiment(tokens: &[&str]) -> SentimentSummary {
    let mut summary = SentimentSummary::default();
    let mut negate_next = false;

    for token in tokens {
        let word = token.to_lowercase();
        if NEGATORS.contains(&word.as_str()) {
            negate_next = true;
            continue;
        }

        if let Some(weight) = lexicon::polarity(&word) {
            let weight = if negate_next { -weight } else { weight };
            summary.score += f64::from(weight);
            if weight > 0 {
                summary.positive_terms.push(word);
            } else {
                summary.negative_terms.push(word);
            }
        }
        negate_next = false;
    }

    summary.comparative = ratio(summary.score, tokens.len() as f64);
    summary
}

fn coherence(sentences: &[&str]) -> f64 {
    if sentences.len() <= 1 {
        return NEUTRAL_SCORE;
    }

    let transitions = sentences
        .iter()
        .skip(1)
        .filter(|sentence| {
            let lowered = sentence.to_lowercase();
            TRANSITION_PHRASES
                .iter()
                .any(|phrase| lowered.contains(phrase))
        })
        .count();

    clamp_score(NEUTRAL_SCORE + 50.0 * transitions as f64 / (sentences.len() - 1) as f64)
}

fn formality(text: &str, tokens: &[&str]) -> f64 {
    let contractions = CONTRACTION.find_iter(text).count();
    let (mut formal, mut informal) = (0usize, 0usize);

    for token in tokens {
        let word = token.to_lowercase();
        if FORMAL_MARKERS.contains(&word.as_str()) {
            formal += 1;
        }
        if INFORMAL_MARKERS.contains(&word.as_str()) {
            informal += 1;
        }
    }

    balance(formal, informal + contractions)
}

fn assertiveness(text: &str) -> f64 {
    let count = |patterns: &[Regex]| -> usize {
        patterns
            .iter()
            .map(|pattern| pattern.find_iter(text).count())
            .sum()
    };

    balance(count(&ASSERTIVE_PATTERNS), count(&HESITANT_PATTERNS))
}

/// `50 + 50 * (for - against) / total`, neutral when nothing was counted.
fn balance(for_hits: usize, against_hits: usize) -> f64 {
    let total = for_hits + against_hits;
    if total == 0 {
        return NEUTRAL_SCORE;
    }
    clamp_score(NEUTRAL_SCORE + 50.0 * (for_hits as f64 - against_hits as f64) / total as f64)
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

pub(crate) fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        NEUTRAL_SCORE
    }
}
