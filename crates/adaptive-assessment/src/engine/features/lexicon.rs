use std::collections::HashMap;

use once_cell::sync::Lazy;

/// AFINN-style polarity weights in the range -5..=5.
static POLARITY: Lazy<HashMap<&'static str, i8>> = Lazy::new(|| {
    [
        ("abandon", -2),
        ("ability", 2),
        ("accomplish", 2),
        ("accomplished", 2),
        ("achieve", 2),
        ("achieved", 2),
        ("achievement", 2),
        ("admire", 3),
        ("advantage", 2),
        ("afraid", -2),
        ("aggressive", -2),
        ("agree", 1),
        ("amazing", 4),
        ("angry", -3),
        ("annoyed", -2),
        ("anxious", -2),
        ("appreciate", 2),
        ("awesome", 4),
        ("awful", -3),
        ("bad", -3),
        ("benefit", 2),
        ("best", 3),
        ("better", 2),
        ("blame", -2),
        ("boring", -3),
        ("brilliant", 4),
        ("broken", -1),
        ("calm", 2),
        ("capable", 1),
        ("careless", -2),
        ("celebrate", 3),
        ("challenge", -1),
        ("chaos", -2),
        ("clear", 1),
        ("comfortable", 2),
        ("commit", 1),
        ("committed", 1),
        ("competent", 2),
        ("confident", 2),
        ("confused", -2),
        ("conflict", -2),
        ("confusing", -2),
        ("creative", 2),
        ("crisis", -3),
        ("critical", -2),
        ("damage", -3),
        ("delay", -1),
        ("delighted", 3),
        ("difficult", -1),
        ("disappointed", -2),
        ("disaster", -2),
        ("dislike", -2),
        ("easy", 1),
        ("effective", 2),
        ("efficient", 2),
        ("encourage", 2),
        ("energetic", 2),
        ("enjoy", 2),
        ("enthusiastic", 3),
        ("error", -2),
        ("excellent", 3),
        ("excited", 3),
        ("fail", -2),
        ("failed", -2),
        ("failure", -2),
        ("fair", 2),
        ("fantastic", 4),
        ("fault", -2),
        ("fear", -2),
        ("fine", 2),
        ("fix", 1),
        ("frustrated", -2),
        ("frustrating", -2),
        ("glad", 3),
        ("good", 3),
        ("grateful", 3),
        ("great", 3),
        ("growth", 2),
        ("happy", 3),
        ("hard", -1),
        ("hate", -3),
        ("help", 2),
        ("helpful", 2),
        ("honest", 2),
        ("hope", 2),
        ("hurt", -2),
        ("ideal", 2),
        ("impossible", -2),
        ("improve", 2),
        ("improved", 2),
        ("inspire", 2),
        ("interesting", 2),
        ("issue", -1),
        ("lazy", -1),
        ("learn", 1),
        ("like", 2),
        ("lose", -3),
        ("loss", -3),
        ("love", 3),
        ("mess", -2),
        ("mistake", -2),
        ("motivated", 2),
        ("negative", -2),
        ("nervous", -2),
        ("opportunity", 2),
        ("optimistic", 2),
        ("overwhelmed", -2),
        ("panic", -3),
        ("passion", 1),
        ("perfect", 3),
        ("pleased", 3),
        ("poor", -2),
        ("positive", 2),
        ("problem", -2),
        ("productive", 2),
        ("progress", 2),
        ("proud", 2),
        ("reliable", 2),
        ("resolve", 2),
        ("resolved", 2),
        ("respect", 2),
        ("risk", -2),
        ("sad", -2),
        ("satisfied", 2),
        ("strong", 2),
        ("stress", -1),
        ("stressed", -2),
        ("stuck", -2),
        ("succeed", 3),
        ("success", 2),
        ("successful", 3),
        ("support", 2),
        ("terrible", -3),
        ("thank", 2),
        ("threat", -2),
        ("trust", 1),
        ("ugly", -3),
        ("unfair", -2),
        ("unhappy", -2),
        ("upset", -2),
        ("useful", 2),
        ("valuable", 2),
        ("win", 4),
        ("wonderful", 4),
        ("worried", -3),
        ("worse", -3),
        ("worst", -3),
        ("wrong", -2),
    ]
    .into_iter()
    .collect()
});

pub(crate) fn polarity(token: &str) -> Option<i8> {
    POLARITY.get(token).copied()
}

pub(crate) const NEGATORS: &[&str] = &["not", "no", "never", "without"];

pub(crate) const TRANSITION_PHRASES: [&str; 20] = [
    "therefore",
    "thus",
    "consequently",
    "as a result",
    "hence",
    "furthermore",
    "moreover",
    "in addition",
    "also",
    "however",
    "nevertheless",
    "on the other hand",
    "first",
    "second",
    "third",
    "finally",
    "lastly",
    "for example",
    "for instance",
    "specifically",
];

pub(crate) const FORMAL_MARKERS: &[&str] = &[
    "would",
    "could",
    "should",
    "shall",
    "may",
    "might",
    "therefore",
    "however",
    "nevertheless",
    "furthermore",
    "additionally",
    "consequently",
    "regarding",
    "concerning",
];

pub(crate) const INFORMAL_MARKERS: &[&str] = &[
    "yeah", "nah", "gonna", "wanna", "gotta", "kinda", "sorta", "like", "just", "stuff", "things",
    "okay", "ok", "cool", "awesome",
];
