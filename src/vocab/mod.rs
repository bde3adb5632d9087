use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod store;

pub use store::VocabStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry. Identity is the word text, compared case-insensitively;
/// two entries with the same text are the same word regardless of tier.
#[derive(Clone, Debug, Deserialize)]
pub struct Word {
    #[serde(rename = "word")]
    pub text: String,
    pub definition: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub example_sentence: Option<String>,
}

impl PartialEq for Word {
    fn eq(&self, other: &Self) -> bool {
        self.text.eq_ignore_ascii_case(&other.text)
    }
}

impl Eq for Word {}

impl Word {
    /// True if `text` names this word, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        self.text.eq_ignore_ascii_case(text)
    }
}

#[derive(Debug, Error)]
#[error("no catalog words for difficulty '{0}'")]
pub struct EmptyTierError(pub Difficulty);
