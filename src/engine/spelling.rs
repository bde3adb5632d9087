use thiserror::Error;

use crate::engine::RoundOutcome;
use crate::vocab::Word;

pub const MAX_ATTEMPTS: usize = 6;

/// Per-letter feedback for a submitted guess. Informational only; the win
/// condition is an exact full-word match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterMark {
    /// Right letter in the right position.
    Correct,
    /// Letter occurs in the target, but not at this position.
    Present,
    Absent,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuessError {
    #[error("guess must be exactly {expected} letters")]
    WrongLength { expected: usize },
    #[error("round already settled")]
    AlreadySettled,
}

/// Spelling round: up to six full-length guesses at the target word.
/// A rejected guess consumes no attempt and produces no score event.
pub struct SpellingRound {
    target: Word,
    guesses: Vec<String>,
    outcome: Option<RoundOutcome>,
}

impl SpellingRound {
    pub fn new(target: Word) -> Self {
        Self {
            target,
            guesses: Vec::new(),
            outcome: None,
        }
    }

    pub fn target(&self) -> &Word {
        &self.target
    }

    pub fn word_length(&self) -> usize {
        self.target.text.chars().count()
    }

    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    pub fn attempts_left(&self) -> usize {
        MAX_ATTEMPTS - self.guesses.len()
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Submit a full-length guess. `Ok(None)` means the round continues;
    /// `Ok(Some(_))` means it just settled (win or attempts exhausted).
    pub fn submit(&mut self, guess: &str) -> Result<Option<RoundOutcome>, GuessError> {
        if self.outcome.is_some() {
            return Err(GuessError::AlreadySettled);
        }
        let expected = self.word_length();
        if guess.chars().count() != expected {
            return Err(GuessError::WrongLength { expected });
        }

        self.guesses.push(guess.to_ascii_lowercase());

        if self.target.matches(guess) {
            let points = ((MAX_ATTEMPTS - self.guesses.len() + 1) * 10) as u32;
            self.outcome = Some(RoundOutcome {
                correct: true,
                points,
            });
        } else if self.guesses.len() >= MAX_ATTEMPTS {
            self.outcome = Some(RoundOutcome {
                correct: false,
                points: 0,
            });
        }
        Ok(self.outcome)
    }

    /// Classify each letter of a guess against the target.
    pub fn classify(&self, guess: &str) -> Vec<(char, LetterMark)> {
        classify(&self.target.text, guess)
    }
}

pub fn classify(target: &str, guess: &str) -> Vec<(char, LetterMark)> {
    let target: Vec<char> = target.to_ascii_lowercase().chars().collect();
    guess
        .to_ascii_lowercase()
        .chars()
        .enumerate()
        .map(|(i, ch)| {
            let mark = if target.get(i) == Some(&ch) {
                LetterMark::Correct
            } else if target.contains(&ch) {
                LetterMark::Present
            } else {
                LetterMark::Absent
            };
            (ch, mark)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::Difficulty;

    fn target(text: &str) -> Word {
        Word {
            text: text.to_string(),
            definition: String::new(),
            difficulty: Difficulty::Easy,
            example_sentence: None,
        }
    }

    #[test]
    fn test_win_on_third_attempt_scores_forty() {
        let mut round = SpellingRound::new(target("happy"));
        assert_eq!(round.submit("hello").unwrap(), None);
        assert_eq!(round.submit("hater").unwrap(), None);
        let outcome = round.submit("happy").unwrap().unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.points, 40);
    }

    #[test]
    fn test_first_attempt_scores_sixty() {
        let mut round = SpellingRound::new(target("brave"));
        let outcome = round.submit("BRAVE").unwrap().unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.points, 60);
    }

    #[test]
    fn test_exhausting_attempts_loses_with_zero() {
        let mut round = SpellingRound::new(target("happy"));
        for _ in 0..MAX_ATTEMPTS - 1 {
            assert_eq!(round.submit("hello").unwrap(), None);
        }
        let outcome = round.submit("hello").unwrap().unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.points, 0);
    }

    #[test]
    fn test_wrong_length_rejected_without_consuming_attempt() {
        let mut round = SpellingRound::new(target("happy"));
        let err = round.submit("hi").unwrap_err();
        assert_eq!(err, GuessError::WrongLength { expected: 5 });
        assert_eq!(round.guesses().len(), 0);
        assert_eq!(round.attempts_left(), MAX_ATTEMPTS);
    }

    #[test]
    fn test_resubmission_after_settle_rejected() {
        let mut round = SpellingRound::new(target("happy"));
        round.submit("happy").unwrap();
        assert_eq!(round.submit("happy").unwrap_err(), GuessError::AlreadySettled);
        assert_eq!(round.guesses().len(), 1);
    }

    #[test]
    fn test_classify_marks() {
        let marks = classify("happy", "paper");
        assert_eq!(
            marks,
            vec![
                ('p', LetterMark::Present),
                ('a', LetterMark::Correct),
                ('p', LetterMark::Correct),
                ('e', LetterMark::Absent),
                ('r', LetterMark::Absent),
            ]
        );
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let marks = classify("Happy", "HAPPY");
        assert!(marks.iter().all(|(_, m)| *m == LetterMark::Correct));
    }
}
