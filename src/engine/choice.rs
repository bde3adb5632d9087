use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::engine::RoundOutcome;
use crate::vocab::{VocabStore, Word};

pub const POINTS: u32 = 10;
pub const DISTRACTOR_COUNT: usize = 3;

/// Multiple-choice round shared by definition matching and fill-in-the-blank:
/// the target plus up to three same-tier distractors, shuffled. One selection
/// settles the round; later selections are rejected.
pub struct ChoiceRound {
    target: Word,
    options: Vec<Word>,
    selected: Option<usize>,
    outcome: Option<RoundOutcome>,
}

impl ChoiceRound {
    /// Draw distractors excluding the session's mastered words and the target
    /// itself. A short tier yields fewer than four options, never an error.
    pub fn draw(vocab: &VocabStore, target: Word, mastered: &[Word], rng: &mut SmallRng) -> Self {
        let mut excluded = mastered.to_vec();
        excluded.push(target.clone());

        let mut options: Vec<Word> = vocab
            .random_distractors(target.difficulty, DISTRACTOR_COUNT, &excluded, rng)
            .into_iter()
            .cloned()
            .collect();
        options.push(target.clone());
        options.shuffle(rng);

        Self {
            target,
            options,
            selected: None,
            outcome: None,
        }
    }

    pub fn target(&self) -> &Word {
        &self.target
    }

    pub fn options(&self) -> &[Word] {
        &self.options
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn correct_index(&self) -> usize {
        // The target is always one of the options.
        self.options
            .iter()
            .position(|w| *w == self.target)
            .unwrap_or(0)
    }

    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome
    }

    /// Select an option by index. Returns `None` (no state change) if the
    /// round is already settled or the index is out of range.
    pub fn select(&mut self, index: usize) -> Option<RoundOutcome> {
        if self.outcome.is_some() || index >= self.options.len() {
            return None;
        }
        self.selected = Some(index);
        let correct = self.options[index].matches(&self.target.text);
        self.outcome = Some(RoundOutcome {
            correct,
            points: if correct { POINTS } else { 0 },
        });
        self.outcome
    }
}

/// Replace the sentence's blank marker with a choice, for rendering.
pub fn fill_sentence(sentence: &str, choice: &str) -> String {
    sentence.replacen('_', choice, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::Difficulty;
    use rand::SeedableRng;

    fn word(text: &str) -> Word {
        Word {
            text: text.to_string(),
            definition: format!("definition of {text}"),
            difficulty: Difficulty::Easy,
            example_sentence: None,
        }
    }

    fn test_vocab() -> VocabStore {
        VocabStore::with_words(vec![
            word("happy"),
            word("brave"),
            word("quick"),
            word("smart"),
            word("clean"),
        ])
    }

    #[test]
    fn test_draw_includes_target_once_among_four_options() {
        let vocab = test_vocab();
        let mut rng = SmallRng::seed_from_u64(11);
        let round = ChoiceRound::draw(&vocab, word("brave"), &[], &mut rng);
        assert_eq!(round.options().len(), 4);
        let target_count = round.options().iter().filter(|w| w.matches("brave")).count();
        assert_eq!(target_count, 1);
        assert_eq!(round.options()[round.correct_index()].text, "brave");
    }

    #[test]
    fn test_draw_excludes_mastered_words() {
        let vocab = test_vocab();
        let mut rng = SmallRng::seed_from_u64(11);
        let mastered = vec![word("happy"), word("quick")];
        let round = ChoiceRound::draw(&vocab, word("brave"), &mastered, &mut rng);
        // Only smart and clean remain as distractors.
        assert_eq!(round.options().len(), 3);
        assert!(!round.options().iter().any(|w| w.matches("happy")));
        assert!(!round.options().iter().any(|w| w.matches("quick")));
    }

    #[test]
    fn test_correct_selection_scores_ten() {
        let vocab = test_vocab();
        let mut rng = SmallRng::seed_from_u64(2);
        let mut round = ChoiceRound::draw(&vocab, word("brave"), &[], &mut rng);
        let outcome = round.select(round.correct_index()).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.points, POINTS);
    }

    #[test]
    fn test_wrong_selection_scores_zero() {
        let vocab = test_vocab();
        let mut rng = SmallRng::seed_from_u64(2);
        let mut round = ChoiceRound::draw(&vocab, word("brave"), &[], &mut rng);
        let wrong = (round.correct_index() + 1) % round.options().len();
        let outcome = round.select(wrong).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.points, 0);
    }

    #[test]
    fn test_selection_after_reveal_rejected() {
        let vocab = test_vocab();
        let mut rng = SmallRng::seed_from_u64(2);
        let mut round = ChoiceRound::draw(&vocab, word("brave"), &[], &mut rng);
        let first = round.select(0);
        assert!(first.is_some());
        assert_eq!(round.select(1), None);
        assert_eq!(round.selected(), Some(0));
        assert_eq!(round.outcome(), first);
    }

    #[test]
    fn test_out_of_range_selection_rejected() {
        let vocab = test_vocab();
        let mut rng = SmallRng::seed_from_u64(2);
        let mut round = ChoiceRound::draw(&vocab, word("brave"), &[], &mut rng);
        assert_eq!(round.select(99), None);
        assert!(round.outcome().is_none());
    }

    #[test]
    fn test_fill_sentence_replaces_single_marker() {
        assert_eq!(
            fill_sentence("He took a _ glance at his watch.", "quick"),
            "He took a quick glance at his watch."
        );
    }
}
