use regex::Regex;
use std::sync::LazyLock;

/// Anything that is neither a word character nor whitespace
static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern is valid"));

/// Filler words that carry no topic signal in a learning goal
pub const STOP_WORDS: [&str; 12] = [
    "i", "want", "to", "learn", "as", "a", "the", "of", "for", "and", "my", "in",
];

/// Keywords that mark a goal as asking for introductory material
pub const BEGINNER_TRIGGERS: [&str; 5] = ["beginner", "start", "basics", "intro", "first"];

/// Tokens of this many characters or fewer are dropped
const MIN_TOKEN_LEN: usize = 2;

/// Lower-cased salient terms of a goal, in the order they appeared.
///
/// Duplicates are kept: a term repeated in the goal is scored once per
/// occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.iter().any(|k| k == term)
    }

    /// True when any keyword is exactly one of [`BEGINNER_TRIGGERS`]
    pub fn has_beginner_intent(&self) -> bool {
        BEGINNER_TRIGGERS.iter().any(|t| self.contains(t))
    }

    /// Keywords joined with ", " for explanations and logs
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(keywords: Vec<String>) -> Self {
        Self(keywords)
    }
}

/// Turns a free-text goal into scoring keywords.
///
/// Lower-cases, strips punctuation, splits on whitespace, then drops short
/// tokens and stop-words.
pub fn extract_keywords(goal: &str) -> KeywordSet {
    let lowered = goal.to_lowercase();
    let cleaned = PUNCTUATION_RE.replace_all(&lowered, "");

    let keywords = cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_LEN)
        .filter(|token| !STOP_WORDS.contains(token))
        .map(String::from)
        .collect();

    KeywordSet(keywords)
}
