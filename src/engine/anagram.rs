use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::engine::RoundOutcome;
use crate::vocab::Word;

pub const POINTS: u32 = 15;

/// Anagram round: the target's letters scrambled into a pool, assembled one
/// at a time into a candidate answer. Submission is only accepted once every
/// letter has been placed.
pub struct AnagramRound {
    target: Word,
    pool: Vec<char>,
    answer: Vec<char>,
    outcome: Option<RoundOutcome>,
}

impl AnagramRound {
    pub fn new(target: Word, rng: &mut SmallRng) -> Self {
        let mut pool: Vec<char> = target.text.to_ascii_lowercase().chars().collect();
        pool.shuffle(rng);
        Self {
            target,
            pool,
            answer: Vec::new(),
            outcome: None,
        }
    }

    pub fn target(&self) -> &Word {
        &self.target
    }

    pub fn pool(&self) -> &[char] {
        &self.pool
    }

    pub fn answer(&self) -> &[char] {
        &self.answer
    }

    pub fn assembled(&self) -> String {
        self.answer.iter().collect()
    }

    pub fn is_assembled(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Move one matching letter from the pool to the answer.
    pub fn pick(&mut self, letter: char) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        let letter = letter.to_ascii_lowercase();
        match self.pool.iter().position(|&c| c == letter) {
            Some(i) => {
                self.pool.remove(i);
                self.answer.push(letter);
                true
            }
            None => false,
        }
    }

    /// Return the most recently placed letter to the pool.
    pub fn unpick(&mut self) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        match self.answer.pop() {
            Some(c) => {
                self.pool.push(c);
                true
            }
            None => false,
        }
    }

    /// Return every placed letter to the pool.
    pub fn clear(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        self.pool.append(&mut self.answer);
    }

    pub fn reshuffle(&mut self, rng: &mut SmallRng) {
        if self.outcome.is_some() {
            return;
        }
        self.pool.shuffle(rng);
    }

    /// Evaluate the assembled answer. `None` if the round is already settled
    /// or letters remain in the pool.
    pub fn submit(&mut self) -> Option<RoundOutcome> {
        if self.outcome.is_some() || !self.is_assembled() {
            return None;
        }
        let correct = self.target.matches(&self.assembled());
        self.outcome = Some(RoundOutcome {
            correct,
            points: if correct { POINTS } else { 0 },
        });
        self.outcome
    }
}
