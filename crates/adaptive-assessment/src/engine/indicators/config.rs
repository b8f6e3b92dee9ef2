use serde::{Deserialize, Serialize};

/// Keyword list for one trait. Plain words match as substrings of tokens. Entries containing
/// whitespace or punctuation (`deal with`, `follow-up`, `can't`) match as phrases in the
/// lower-cased text, since the tokenizer splits on those characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub trait_name: String,
    pub keywords: Vec<String>,
}

impl IndicatorSet {
    pub fn new(trait_name: &str, keywords: &[&str]) -> Self {
        Self {
            trait_name: trait_name.to_string(),
            keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
        }
    }
}

/// Ordered trait → keyword configuration, swappable per assessment domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub sets: Vec<IndicatorSet>,
}

impl IndicatorConfig {
    pub fn new(sets: Vec<IndicatorSet>) -> Self {
        Self { sets }
    }

    /// Broad behavioral signals for written answers.
    pub fn behavioral() -> Self {
        Self::new(vec![leadership(), collaboration(), problem_solving()])
    }

    /// Finer-grained leadership dimensions.
    pub fn leadership() -> Self {
        Self::new(vec![
            decision_making(),
            team_orientation(),
            vision(),
            accountability(),
            IndicatorSet::new(
                "problem_solving",
                &[
                    "solve", "solution", "resolve", "address", "tackle", "approach", "handle",
                    "manage", "deal with", "overcome",
                ],
            ),
        ])
    }

    /// How a candidate describes handling pressure.
    pub fn stress() -> Self {
        Self::new(vec![
            IndicatorSet::new(
                "composure",
                &["calm", "managed", "resolved", "learned", "adapted"],
            ),
            IndicatorSet::new(
                "strain",
                &["stressed", "overwhelmed", "anxious", "worried", "frustrated"],
            ),
        ])
    }

    /// Which problem-solving style a response leans on. Pair with
    /// [`super::problem_solving_complexity`] for the depth of the reasoning.
    pub fn problem_solving_approach() -> Self {
        Self::new(vec![
            IndicatorSet::new(
                "analytical",
                &[
                    "analyze",
                    "examine",
                    "evaluate",
                    "assess",
                    "consider",
                    "data",
                    "information",
                    "evidence",
                    "research",
                    "investigate",
                ],
            ),
            IndicatorSet::new(
                "creative",
                &[
                    "create",
                    "innovative",
                    "unique",
                    "novel",
                    "original",
                    "imagine",
                    "possibility",
                    "alternative",
                    "different",
                    "new",
                ],
            ),
            IndicatorSet::new(
                "practical",
                &[
                    "implement",
                    "practical",
                    "realistic",
                    "feasible",
                    "doable",
                    "efficient",
                    "effective",
                    "straightforward",
                    "direct",
                    "simple",
                ],
            ),
            IndicatorSet::new(
                "methodical",
                &[
                    "process",
                    "step",
                    "method",
                    "procedure",
                    "systematic",
                    "organize",
                    "structure",
                    "plan",
                    "approach",
                    "framework",
                ],
            ),
            IndicatorSet::new(
                "collaborative",
                &[
                    "team",
                    "collaborate",
                    "together",
                    "group",
                    "collective",
                    "input",
                    "feedback",
                    "discuss",
                    "share",
                    "consult",
                ],
            ),
        ])
    }

    /// Every priority trait; used by the free-text scoring path.
    pub fn assessment() -> Self {
        Self::new(vec![
            leadership(),
            collaboration(),
            problem_solving(),
            decision_making(),
            team_orientation(),
            vision(),
            accountability(),
        ])
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self::assessment()
    }
}

fn leadership() -> IndicatorSet {
    IndicatorSet::new(
        "leadership",
        &[
            "lead",
            "initiative",
            "responsibility",
            "team",
            "vision",
            "decision",
            "strategy",
        ],
    )
}

fn collaboration() -> IndicatorSet {
    IndicatorSet::new(
        "collaboration",
        &[
            "collaborate",
            "team",
            "together",
            "partnership",
            "cooperate",
            "joint",
            "shared",
        ],
    )
}

fn problem_solving() -> IndicatorSet {
    IndicatorSet::new(
        "problem_solving",
        &[
            "solve", "solution", "analyze", "approach", "resolve", "address", "tackle",
        ],
    )
}

fn decision_making() -> IndicatorSet {
    IndicatorSet::new(
        "decision_making",
        &[
            "decide",
            "decision",
            "chose",
            "select",
            "determine",
            "resolve",
            "judgment",
            "conclusion",
            "option",
            "alternative",
        ],
    )
}

// No bare "we": substring matching would count "were" and "answer".
fn team_orientation() -> IndicatorSet {
    IndicatorSet::new(
        "team_orientation",
        &[
            "team",
            "collaborate",
            "together",
            "group",
            "collective",
            "cooperation",
            "partnership",
            "joint",
            "shared",
        ],
    )
}

fn vision() -> IndicatorSet {
    IndicatorSet::new(
        "vision",
        &[
            "vision",
            "future",
            "goal",
            "objective",
            "strategy",
            "plan",
            "direction",
            "mission",
            "purpose",
            "aim",
        ],
    )
}

fn accountability() -> IndicatorSet {
    IndicatorSet::new(
        "accountability",
        &[
            "responsible",
            "accountability",
            "ownership",
            "duty",
            "obligation",
            "commitment",
            "reliable",
            "dependable",
            "trustworthy",
        ],
    )
}
