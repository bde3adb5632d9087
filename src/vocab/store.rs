use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::vocab::{Difficulty, EmptyTierError, Word};

const VOCABULARY: &str = include_str!("../../assets/vocabulary.json");

/// Read-only catalog of words. Queries never mutate it; all randomized
/// lookups take the rng by parameter so callers can seed them.
pub struct VocabStore {
    words: Vec<Word>,
}

impl VocabStore {
    /// Load the embedded catalog. A malformed asset degrades to an empty
    /// catalog, which surfaces as `EmptyTierError` at session start.
    pub fn load() -> Self {
        let words: Vec<Word> = serde_json::from_str(VOCABULARY).unwrap_or_default();
        Self { words }
    }

    pub fn with_words(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// All catalog words of the tier, in catalog order.
    pub fn words_of(&self, tier: Difficulty) -> Vec<&Word> {
        self.words.iter().filter(|w| w.difficulty == tier).collect()
    }

    pub fn random_word(&self, tier: Difficulty, rng: &mut SmallRng) -> Result<&Word, EmptyTierError> {
        self.words_of(tier)
            .choose(rng)
            .copied()
            .ok_or(EmptyTierError(tier))
    }

    /// Uniform pick among the tier's words not in `excluded`. `None` is the
    /// normal exhaustion signal, not an error.
    pub fn random_word_excluding(
        &self,
        tier: Difficulty,
        excluded: &[Word],
        rng: &mut SmallRng,
    ) -> Option<&Word> {
        let remaining: Vec<&Word> = self
            .words
            .iter()
            .filter(|w| w.difficulty == tier && !excluded.contains(w))
            .collect();
        remaining.choose(rng).copied()
    }

    /// Up to `count` shuffled, non-repeating words from the tier minus
    /// `excluded`. May return fewer than `count` when the tier runs short.
    pub fn random_distractors(
        &self,
        tier: Difficulty,
        count: usize,
        excluded: &[Word],
        rng: &mut SmallRng,
    ) -> Vec<&Word> {
        let mut remaining: Vec<&Word> = self
            .words
            .iter()
            .filter(|w| w.difficulty == tier && !excluded.contains(w))
            .collect();
        remaining.shuffle(rng);
        remaining.truncate(count);
        remaining
    }
}
