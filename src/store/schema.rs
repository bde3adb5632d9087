use serde::{Deserialize, Serialize};

use crate::engine::GameMode;
use crate::vocab::Difficulty;

pub const SCHEMA_VERSION: u32 = 1;

/// Per-difficulty counters. Fixed fields so the JSON shape matches a plain
/// `{easy, medium, hard}` object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierTally {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl TierTally {
    pub fn bump(&mut self, tier: Difficulty) {
        match tier {
            Difficulty::Easy => self.easy += 1,
            Difficulty::Medium => self.medium += 1,
            Difficulty::Hard => self.hard += 1,
        }
    }

    pub fn get(&self, tier: Difficulty) -> u32 {
        match tier {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn total(&self) -> u32 {
        self.easy + self.medium + self.hard
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeTally {
    pub spelling: u32,
    pub definition: u32,
    pub fillblank: u32,
    pub anagram: u32,
}

impl ModeTally {
    pub fn bump(&mut self, mode: GameMode) {
        match mode {
            GameMode::Spelling => self.spelling += 1,
            GameMode::Definition => self.definition += 1,
            GameMode::FillBlank => self.fillblank += 1,
            GameMode::Anagram => self.anagram += 1,
        }
    }

    pub fn get(&self, mode: GameMode) -> u32 {
        match mode {
            GameMode::Spelling => self.spelling,
            GameMode::Definition => self.definition,
            GameMode::FillBlank => self.fillblank,
            GameMode::Anagram => self.anagram,
        }
    }
}

/// Durable cross-session statistics. Every counter only grows; the single
/// way down is the explicit reset, which deletes the record outright.
/// `total_games_played` counts rounds (one per word), matching the recorded
/// history this schema inherited.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub schema_version: u32,
    pub total_games_played: u32,
    pub total_score: u32,
    pub best_streak: u32,
    pub correct_by_difficulty: TierTally,
    pub incorrect_by_difficulty: TierTally,
    pub games_by_mode: ModeTally,
    /// Distinct words ever missed, insertion order, case-sensitive as typed.
    pub incorrect_words: Vec<String>,
    pub last_played: Option<String>,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            total_games_played: 0,
            total_score: 0,
            best_streak: 0,
            correct_by_difficulty: TierTally::default(),
            incorrect_by_difficulty: TierTally::default(),
            games_by_mode: ModeTally::default(),
            incorrect_words: Vec::new(),
            last_played: None,
        }
    }
}

impl Statistics {
    /// Check if loaded data has a stale schema version and needs reset.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
