use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;

use crate::engine::GameMode;
use crate::store::json_store::JsonStore;
use crate::store::schema::Statistics;
use crate::vocab::Difficulty;

/// What the session tracker reports after each evaluated round.
#[derive(Clone, Debug)]
pub struct RoundReport {
    pub correct: bool,
    pub difficulty: Difficulty,
    pub mode: GameMode,
    /// Streak value after this round was applied.
    pub streak: u32,
    pub points: u32,
    /// Word text as shown, set only when the round was missed.
    pub missed_word: Option<String>,
}

/// Fold one round into the counters. Pure; persistence is the caller's job.
pub fn apply_round(stats: &mut Statistics, report: &RoundReport) {
    stats.total_games_played += 1;
    stats.total_score += report.points;
    stats.best_streak = stats.best_streak.max(report.streak);
    stats.games_by_mode.bump(report.mode);

    if report.correct {
        stats.correct_by_difficulty.bump(report.difficulty);
    } else {
        stats.incorrect_by_difficulty.bump(report.difficulty);
        if let Some(word) = &report.missed_word
            && !stats.incorrect_words.contains(word)
        {
            stats.incorrect_words.push(word.clone());
        }
    }

    stats.last_played = Some(Utc::now().format("%Y-%m-%d").to_string());
}

/// Durable statistics aggregator: each recorded round is one synchronous
/// read-modify-persist unit against the JSON store.
pub struct StatsTracker {
    store: JsonStore,
}

impl StatsTracker {
    pub fn new() -> Result<Self> {
        Ok(Self {
            store: JsonStore::new()?,
        })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        Ok(Self {
            store: JsonStore::with_base_dir(base_dir)?,
        })
    }

    /// Current record, or the all-zero default if none exists. Never fails.
    pub fn read(&self) -> Statistics {
        self.store.load_stats()
    }

    pub fn record_round(&self, report: &RoundReport) -> Result<()> {
        let mut stats = self.read();
        apply_round(&mut stats, report);
        self.store.save_stats(&stats)
    }

    pub fn reset(&self) -> Result<()> {
        self.store.reset_stats()
    }
}
