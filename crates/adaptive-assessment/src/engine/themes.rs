//! Frequent-term extraction used to steer new scenarios away from material a candidate has
//! already seen.

use std::collections::{HashMap, HashSet};

use super::features::tokenize;
use crate::config::EngineConfig;

const STOPWORDS: [&str; 12] = [
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "with",
];
const MIN_THEME_CHARS: usize = 4;

#[derive(Debug, Clone)]
pub struct ThemeTracker {
    limit: usize,
}

impl Default for ThemeTracker {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl ThemeTracker {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            limit: config.theme_limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Most frequent lowercase content words across all prior texts, most frequent first.
    /// Equal counts keep first-seen order. Callers pass the full history on every call.
    pub fn extract_themes<S: AsRef<str>>(&self, prior_texts: &[S]) -> Vec<String> {
        if prior_texts.is_empty() {
            return Vec::new();
        }

        let combined = prior_texts
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");

        let mut first_seen: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for token in tokenize(&combined) {
            let word = token.to_lowercase();
            if word.chars().count() < MIN_THEME_CHARS || STOPWORDS.contains(&word.as_str()) {
                continue;
            }
            let count = counts.entry(word.clone()).or_insert(0);
            if *count == 0 {
                first_seen.push(word);
            }
            *count += 1;
        }

        let mut ranked: Vec<(usize, String)> = first_seen
            .into_iter()
            .map(|word| (counts.get(&word).copied().unwrap_or(0), word))
            .collect();
        // Stable sort keeps first-seen order among equal counts.
        ranked.sort_by(|left, right| right.0.cmp(&left.0));
        ranked.truncate(self.limit);

        let themes: Vec<String> = ranked.into_iter().map(|(_, word)| word).collect();
        tracing::debug!(count = themes.len(), "extracted themes");
        themes
    }
}

/// Jaccard similarity between two theme sets; 0 when both are empty.
pub fn theme_overlap<A: AsRef<str>, B: AsRef<str>>(left: &[A], right: &[B]) -> f64 {
    let left: HashSet<&str> = left.iter().map(AsRef::as_ref).collect();
    let right: HashSet<&str> = right.iter().map(AsRef::as_ref).collect();

    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }
    left.intersection(&right).count() as f64 / union as f64
}
