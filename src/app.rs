use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::engine::anagram::AnagramRound;
use crate::engine::choice::ChoiceRound;
use crate::engine::spelling::SpellingRound;
use crate::engine::{GameMode, RoundOutcome};
use crate::session::Session;
use crate::stats::StatsTracker;
use crate::vocab::{Difficulty, VocabStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    DifficultySelect,
    Game,
    SessionComplete,
    Stats,
}

/// Menu entries: the four modes, then stats, then quit.
pub const MENU_ITEMS: usize = 6;

/// Interactive state of the round being played. The evaluators own the
/// decision rules; this only adds what the screen needs (the spelling entry
/// buffer). Definition and fill-blank share the choice round and differ only
/// in rendering.
pub enum RoundView {
    Spelling { round: SpellingRound, entry: String },
    Choice { round: ChoiceRound },
    Anagram { round: AnagramRound },
}

impl RoundView {
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self {
            RoundView::Spelling { round, .. } => round.outcome(),
            RoundView::Choice { round } => round.outcome(),
            RoundView::Anagram { round } => round.outcome(),
        }
    }
}

pub struct App {
    pub screen: AppScreen,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub session: Option<Session>,
    pub round: Option<RoundView>,
    pub hint_shown: bool,
    pub vocab: VocabStore,
    pub stats: StatsTracker,
    pub config: Config,
    pub should_quit: bool,
    pub menu_selected: usize,
    pub difficulty_selected: usize,
    pub stats_confirm_reset: bool,
    pub status: Option<String>,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let stats = StatsTracker::new()?;
        Ok(Self::with_parts(
            config,
            VocabStore::load(),
            stats,
            SmallRng::from_entropy(),
        ))
    }

    pub fn with_parts(
        config: Config,
        vocab: VocabStore,
        stats: StatsTracker,
        rng: SmallRng,
    ) -> Self {
        let mode = config.mode();
        let difficulty = config.difficulty();
        Self {
            screen: AppScreen::Menu,
            mode,
            difficulty,
            session: None,
            round: None,
            hint_shown: false,
            vocab,
            stats,
            config,
            should_quit: false,
            menu_selected: 0,
            difficulty_selected: Difficulty::ALL
                .iter()
                .position(|d| *d == difficulty)
                .unwrap_or(0),
            stats_confirm_reset: false,
            status: None,
            rng,
        }
    }

    pub fn menu_prev(&mut self) {
        self.menu_selected = self.menu_selected.checked_sub(1).unwrap_or(MENU_ITEMS - 1);
    }

    pub fn menu_next(&mut self) {
        self.menu_selected = (self.menu_selected + 1) % MENU_ITEMS;
    }

    pub fn select_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.screen = AppScreen::DifficultySelect;
    }

    pub fn difficulty_prev(&mut self) {
        self.difficulty_selected = self
            .difficulty_selected
            .checked_sub(1)
            .unwrap_or(Difficulty::ALL.len() - 1);
    }

    pub fn difficulty_next(&mut self) {
        self.difficulty_selected = (self.difficulty_selected + 1) % Difficulty::ALL.len();
    }

    pub fn choose_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.start_session();
    }

    /// Start (or restart) a session with the current mode and difficulty.
    /// An empty tier is a catalog problem: surface it on the menu instead of
    /// entering the game screen.
    pub fn start_session(&mut self) {
        self.status = None;
        match Session::start(self.mode, self.difficulty, &self.vocab, &mut self.rng) {
            Ok(session) => {
                self.session = Some(session);
                self.begin_round();
            }
            Err(err) => {
                self.session = None;
                self.round = None;
                self.status = Some(err.to_string());
                self.screen = AppScreen::Menu;
            }
        }
    }

    /// Build the round view for the session's current word, or show the
    /// completion screen when no word remains.
    fn begin_round(&mut self) {
        let Some(word) = self.session.as_ref().and_then(|s| s.current_word()).cloned() else {
            self.round = None;
            self.screen = AppScreen::SessionComplete;
            return;
        };
        self.hint_shown = self.difficulty == Difficulty::Easy;
        let mastered: Vec<_> = self
            .session
            .as_ref()
            .map(|s| s.mastered().to_vec())
            .unwrap_or_default();

        self.round = Some(match self.mode {
            GameMode::Spelling => RoundView::Spelling {
                round: SpellingRound::new(word),
                entry: String::new(),
            },
            GameMode::Definition | GameMode::FillBlank => RoundView::Choice {
                round: ChoiceRound::draw(&self.vocab, word, &mastered, &mut self.rng),
            },
            GameMode::Anagram => RoundView::Anagram {
                round: AnagramRound::new(word, &mut self.rng),
            },
        });
        self.screen = AppScreen::Game;
    }

    pub fn type_char(&mut self, ch: char) {
        match &mut self.round {
            Some(RoundView::Spelling { round, entry }) => {
                if round.outcome().is_none()
                    && ch.is_ascii_alphabetic()
                    && entry.chars().count() < round.word_length()
                {
                    entry.push(ch.to_ascii_lowercase());
                }
            }
            Some(RoundView::Choice { round }) => {
                if let Some(digit) = ch.to_digit(10)
                    && digit >= 1
                {
                    round.select(digit as usize - 1);
                }
            }
            Some(RoundView::Anagram { round }) => {
                round.pick(ch);
            }
            None => {}
        }
    }

    pub fn backspace(&mut self) {
        match &mut self.round {
            Some(RoundView::Spelling { round, entry }) => {
                if round.outcome().is_none() {
                    entry.pop();
                }
            }
            Some(RoundView::Anagram { round }) => {
                round.unpick();
            }
            _ => {}
        }
    }

    /// Enter: submit the pending response, or advance past a settled round.
    pub fn confirm(&mut self) {
        let settled = self.round.as_ref().is_some_and(|v| v.outcome().is_some());
        if settled {
            self.advance();
            return;
        }
        match &mut self.round {
            Some(RoundView::Spelling { round, entry }) => {
                // A short entry is rejected locally and consumes no attempt.
                if round.submit(entry).is_ok() {
                    entry.clear();
                }
            }
            Some(RoundView::Anagram { round }) => {
                round.submit();
            }
            _ => {}
        }
    }

    pub fn reshuffle(&mut self) {
        if let Some(RoundView::Anagram { round }) = &mut self.round {
            round.reshuffle(&mut self.rng);
        }
    }

    pub fn clear_answer(&mut self) {
        if let Some(RoundView::Anagram { round }) = &mut self.round {
            round.clear();
        }
    }

    pub fn toggle_hint(&mut self) {
        self.hint_shown = !self.hint_shown;
    }

    /// Fold the settled round into the session and draw the next word.
    pub fn advance(&mut self) {
        let Some(outcome) = self.round.as_ref().and_then(|v| v.outcome()) else {
            return;
        };
        if let Some(session) = self.session.as_mut()
            && let Err(err) = session.complete_round(outcome, &self.vocab, &self.stats, &mut self.rng)
        {
            // Persistence trouble never aborts the session.
            self.status = Some(format!("could not save statistics: {err}"));
        }
        self.begin_round();
    }

    /// Drop all session state and return to the menu. Idempotent.
    pub fn end_session(&mut self) {
        self.session = None;
        self.round = None;
        self.screen = AppScreen::Menu;
    }

    pub fn go_to_stats(&mut self) {
        self.stats_confirm_reset = false;
        self.screen = AppScreen::Stats;
    }

    pub fn reset_stats(&mut self) {
        if let Err(err) = self.stats.reset() {
            self.status = Some(format!("could not reset statistics: {err}"));
        }
        self.stats_confirm_reset = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::Word;
    use tempfile::TempDir;

    fn word(text: &str, tier: Difficulty) -> Word {
        Word {
            text: text.to_string(),
            definition: format!("definition of {text}"),
            difficulty: tier,
            example_sentence: Some(format!("a sentence with _ in it about {text}")),
        }
    }

    fn test_app(texts: &[&str]) -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let stats = StatsTracker::with_base_dir(dir.path().to_path_buf()).unwrap();
        let vocab =
            VocabStore::with_words(texts.iter().map(|t| word(t, Difficulty::Easy)).collect());
        let app = App::with_parts(
            Config::default(),
            vocab,
            stats,
            SmallRng::seed_from_u64(9),
        );
        (dir, app)
    }

    #[test]
    fn test_spelling_round_through_input_methods() {
        let (_dir, mut app) = test_app(&["happy", "brave", "quick"]);
        app.mode = GameMode::Spelling;
        app.difficulty = Difficulty::Easy;
        app.start_session();
        assert_eq!(app.screen, AppScreen::Game);

        let target = app
            .session
            .as_ref()
            .unwrap()
            .current_word()
            .unwrap()
            .text
            .clone();
        for ch in target.chars() {
            app.type_char(ch);
        }
        app.confirm();
        let outcome = app.round.as_ref().unwrap().outcome().unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.points, 60);

        // Enter on a settled round advances to the next word.
        app.confirm();
        assert_eq!(app.session.as_ref().unwrap().score, 60);
        assert!(app.round.as_ref().unwrap().outcome().is_none());
    }

    #[test]
    fn test_short_spelling_entry_is_not_an_attempt() {
        let (_dir, mut app) = test_app(&["happy", "brave", "quick"]);
        app.mode = GameMode::Spelling;
        app.start_session();
        app.type_char('x');
        app.confirm();
        let Some(RoundView::Spelling { round, entry }) = &app.round else {
            panic!("expected spelling round");
        };
        assert!(round.guesses().is_empty());
        assert_eq!(entry, "x");
    }

    #[test]
    fn test_choice_round_selection_by_digit() {
        let (_dir, mut app) = test_app(&["happy", "brave", "quick", "smart", "clean"]);
        app.mode = GameMode::Definition;
        app.start_session();
        app.type_char('1');
        let outcome = app.round.as_ref().unwrap().outcome().unwrap();
        assert_eq!(outcome.points, if outcome.correct { 10 } else { 0 });
        // A second selection after the reveal changes nothing.
        app.type_char('2');
        assert_eq!(app.round.as_ref().unwrap().outcome().unwrap(), outcome);
    }

    #[test]
    fn test_anagram_round_settles_via_confirm() {
        let (_dir, mut app) = test_app(&["happy", "brave"]);
        app.mode = GameMode::Anagram;
        app.start_session();
        let pool: Vec<char> = match app.round.as_ref().unwrap() {
            RoundView::Anagram { round } => round.pool().to_vec(),
            _ => panic!("expected anagram round"),
        };
        for ch in pool {
            app.type_char(ch);
        }
        app.confirm();
        assert!(app.round.as_ref().unwrap().outcome().is_some());
    }

    #[test]
    fn test_empty_tier_surfaces_on_menu() {
        let (_dir, mut app) = test_app(&["happy"]);
        app.mode = GameMode::Spelling;
        app.difficulty = Difficulty::Hard;
        app.start_session();
        assert_eq!(app.screen, AppScreen::Menu);
        assert!(app.status.as_deref().unwrap().contains("hard"));
        assert!(app.session.is_none());
    }

    #[test]
    fn test_session_exhaustion_reaches_completion_screen() {
        let (_dir, mut app) = test_app(&["happy", "brave"]);
        app.mode = GameMode::Spelling;
        app.start_session();
        for _ in 0..2 {
            let target = app
                .session
                .as_ref()
                .unwrap()
                .current_word()
                .unwrap()
                .text
                .clone();
            for ch in target.chars() {
                app.type_char(ch);
            }
            app.confirm(); // submit
            app.confirm(); // advance
        }
        assert_eq!(app.screen, AppScreen::SessionComplete);
        assert!(app.session.as_ref().unwrap().is_complete());
        assert_eq!(app.stats.read().total_games_played, 2);
    }

    #[test]
    fn test_end_session_is_idempotent() {
        let (_dir, mut app) = test_app(&["happy", "brave"]);
        app.mode = GameMode::Anagram;
        app.start_session();
        app.end_session();
        app.end_session();
        assert!(app.session.is_none());
        assert!(app.round.is_none());
        assert_eq!(app.screen, AppScreen::Menu);
    }
}
