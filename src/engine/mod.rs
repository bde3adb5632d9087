use serde::{Deserialize, Serialize};

pub mod anagram;
pub mod choice;
pub mod spelling;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Spelling,
    Definition,
    FillBlank,
    Anagram,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Spelling,
        GameMode::Definition,
        GameMode::FillBlank,
        GameMode::Anagram,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Spelling => "spelling",
            GameMode::Definition => "definition",
            GameMode::FillBlank => "fillblank",
            GameMode::Anagram => "anagram",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GameMode::Spelling => "Word Spelling",
            GameMode::Definition => "Definition Match",
            GameMode::FillBlank => "Fill in the Blank",
            GameMode::Anagram => "Anagram Solver",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "spelling" => Some(GameMode::Spelling),
            "definition" => Some(GameMode::Definition),
            "fillblank" => Some(GameMode::FillBlank),
            "anagram" => Some(GameMode::Anagram),
            _ => None,
        }
    }
}

/// Result of exactly one evaluated round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundOutcome {
    pub correct: bool,
    pub points: u32,
}
