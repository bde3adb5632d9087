use anyhow::Result;
use rand::rngs::SmallRng;

use crate::engine::{GameMode, RoundOutcome};
use crate::stats::{RoundReport, StatsTracker};
use crate::vocab::{Difficulty, EmptyTierError, VocabStore, Word};

/// One play session: a fixed (mode, difficulty) pair, a running score and
/// streak, and the growing set of words mastered this sitting.
///
/// Invariants: `mastered` holds only this session's correctly answered words,
/// each at most once; `current`, when present, is never in `mastered`. When
/// `current` is absent the session is complete.
pub struct Session {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub score: u32,
    pub streak: u32,
    mastered: Vec<Word>,
    current: Option<Word>,
}

impl Session {
    /// Start a session and draw the first word. The first draw intentionally
    /// excludes nothing; mastery only accumulates within the session.
    pub fn start(
        mode: GameMode,
        difficulty: Difficulty,
        vocab: &VocabStore,
        rng: &mut SmallRng,
    ) -> Result<Self, EmptyTierError> {
        let first = vocab.random_word(difficulty, rng)?.clone();
        Ok(Self {
            mode,
            difficulty,
            score: 0,
            streak: 0,
            mastered: Vec::new(),
            current: Some(first),
        })
    }

    pub fn current_word(&self) -> Option<&Word> {
        self.current.as_ref()
    }

    /// Words answered correctly this session, in insertion order.
    pub fn mastered(&self) -> &[Word] {
        &self.mastered
    }

    pub fn is_complete(&self) -> bool {
        self.current.is_none()
    }

    /// Apply one evaluated round: update score and streak, report to the
    /// statistics aggregator exactly once, master the word if it was
    /// answered correctly, and draw the next word. Exhaustion of the tier
    /// leaves `current` absent rather than failing.
    ///
    /// Session state is fully updated before the report is persisted, so a
    /// store error never leaves the session inconsistent.
    pub fn complete_round(
        &mut self,
        outcome: RoundOutcome,
        vocab: &VocabStore,
        stats: &StatsTracker,
        rng: &mut SmallRng,
    ) -> Result<()> {
        let Some(word) = self.current.take() else {
            return Ok(());
        };

        self.score += outcome.points;
        self.streak = if outcome.correct { self.streak + 1 } else { 0 };

        let report = RoundReport {
            correct: outcome.correct,
            difficulty: self.difficulty,
            mode: self.mode,
            streak: self.streak,
            points: outcome.points,
            missed_word: (!outcome.correct).then(|| word.text.clone()),
        };

        if outcome.correct && !self.mastered.contains(&word) {
            self.mastered.push(word);
        }

        // Missed words stay in rotation; only mastered words are excluded.
        self.current = vocab
            .random_word_excluding(self.difficulty, &self.mastered, rng)
            .cloned();

        stats.record_round(&report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn word(text: &str, tier: Difficulty) -> Word {
        Word {
            text: text.to_string(),
            definition: format!("definition of {text}"),
            difficulty: tier,
            example_sentence: None,
        }
    }

    fn easy_vocab(texts: &[&str]) -> VocabStore {
        VocabStore::with_words(texts.iter().map(|t| word(t, Difficulty::Easy)).collect())
    }

    fn fixture() -> (TempDir, StatsTracker, SmallRng) {
        let dir = TempDir::new().unwrap();
        let tracker = StatsTracker::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, tracker, SmallRng::seed_from_u64(42))
    }

    const WIN: RoundOutcome = RoundOutcome {
        correct: true,
        points: 10,
    };
    const LOSS: RoundOutcome = RoundOutcome {
        correct: false,
        points: 0,
    };

    #[test]
    fn test_start_fails_on_empty_tier() {
        let vocab = easy_vocab(&["happy"]);
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(Session::start(GameMode::Spelling, Difficulty::Hard, &vocab, &mut rng).is_err());
    }

    #[test]
    fn test_correct_round_increments_streak_and_masters_word() {
        let vocab = easy_vocab(&["happy", "brave", "quick"]);
        let (_dir, stats, mut rng) = fixture();
        let mut session =
            Session::start(GameMode::Definition, Difficulty::Easy, &vocab, &mut rng).unwrap();

        let first = session.current_word().unwrap().clone();
        session
            .complete_round(WIN, &vocab, &stats, &mut rng)
            .unwrap();

        assert_eq!(session.score, 10);
        assert_eq!(session.streak, 1);
        assert_eq!(session.mastered(), [first.clone()]);
        // The next draw never repeats a mastered word.
        assert_ne!(session.current_word().unwrap(), &first);
    }

    #[test]
    fn test_incorrect_round_resets_streak_and_keeps_word_in_rotation() {
        let vocab = easy_vocab(&["happy", "brave", "quick"]);
        let (_dir, stats, mut rng) = fixture();
        let mut session =
            Session::start(GameMode::Spelling, Difficulty::Easy, &vocab, &mut rng).unwrap();

        session
            .complete_round(WIN, &vocab, &stats, &mut rng)
            .unwrap();
        session
            .complete_round(WIN, &vocab, &stats, &mut rng)
            .unwrap();
        assert_eq!(session.streak, 2);

        session
            .complete_round(LOSS, &vocab, &stats, &mut rng)
            .unwrap();
        assert_eq!(session.streak, 0);
        assert_eq!(session.score, 20);
        assert_eq!(session.mastered().len(), 2);
        // One unmastered word left, and the miss did not remove it.
        assert!(session.current_word().is_some());
    }

    #[test]
    fn test_session_completes_when_tier_exhausted() {
        let texts = [
            "happy", "brave", "quick", "smart", "friend", "bright", "clean", "strong",
        ];
        let vocab = easy_vocab(&texts);
        let (_dir, stats, mut rng) = fixture();
        let mut session =
            Session::start(GameMode::Anagram, Difficulty::Easy, &vocab, &mut rng).unwrap();

        for _ in 0..texts.len() {
            assert!(!session.is_complete());
            session
                .complete_round(WIN, &vocab, &stats, &mut rng)
                .unwrap();
        }

        assert!(session.is_complete());
        assert_eq!(session.current_word(), None);
        assert_eq!(session.mastered().len(), texts.len());
        assert_eq!(session.streak, 8);
    }

    #[test]
    fn test_complete_round_after_exhaustion_is_a_no_op() {
        let vocab = easy_vocab(&["happy"]);
        let (_dir, stats, mut rng) = fixture();
        let mut session =
            Session::start(GameMode::Spelling, Difficulty::Easy, &vocab, &mut rng).unwrap();

        session
            .complete_round(WIN, &vocab, &stats, &mut rng)
            .unwrap();
        assert!(session.is_complete());

        session
            .complete_round(WIN, &vocab, &stats, &mut rng)
            .unwrap();
        assert_eq!(session.score, 10);
        assert_eq!(stats.read().total_games_played, 1);
    }

    #[test]
    fn test_rounds_reported_to_statistics_exactly_once() {
        let vocab = easy_vocab(&["happy", "brave"]);
        let (_dir, stats, mut rng) = fixture();
        let mut session =
            Session::start(GameMode::FillBlank, Difficulty::Easy, &vocab, &mut rng).unwrap();

        let missed = session.current_word().unwrap().text.clone();
        session
            .complete_round(LOSS, &vocab, &stats, &mut rng)
            .unwrap();
        session
            .complete_round(WIN, &vocab, &stats, &mut rng)
            .unwrap();

        let record = stats.read();
        assert_eq!(record.total_games_played, 2);
        assert_eq!(record.games_by_mode.get(GameMode::FillBlank), 2);
        assert_eq!(record.incorrect_words, vec![missed]);
        assert_eq!(record.best_streak, 1);
    }
}
