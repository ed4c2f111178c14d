use alloc::collections::BTreeSet;
use alloc::string::String;
use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{MiniGame, Outcome, WordSource, normalize_word};
use crate::*;

pub const DEFAULT_MAX_MISSES: u8 = 6;

const fn default_max_misses() -> u8 {
    DEFAULT_MAX_MISSES
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HangmanParams {
    #[serde(default)]
    pub words: WordSource,
    #[serde(default = "default_max_misses")]
    pub max_misses: u8,
}

impl HangmanParams {
    pub fn new(words: WordSource, max_misses: u8) -> Self {
        Self { words, max_misses }
    }

    pub fn fixed(word: &str) -> Self {
        Self::new(WordSource::Fixed(word.into()), DEFAULT_MAX_MISSES)
    }
}

impl Default for HangmanParams {
    fn default() -> Self {
        Self::new(WordSource::default(), DEFAULT_MAX_MISSES)
    }
}

/// Word guessing, one letter at a time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hangman {
    word: String,
    guessed: BTreeSet<char>,
    misses: u8,
    max_misses: u8,
}

impl Hangman {
    pub fn new(word: &str, max_misses: u8) -> Result<Self> {
        Ok(Self {
            word: normalize_word(word)?,
            guessed: BTreeSet::new(),
            misses: 0,
            max_misses: max_misses.max(1),
        })
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn guessed(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    pub fn misses(&self) -> u8 {
        self.misses
    }

    pub fn max_misses(&self) -> u8 {
        self.max_misses
    }

    pub fn misses_left(&self) -> u8 {
        self.max_misses.saturating_sub(self.misses)
    }

    /// The word with unguessed letters replaced by `_`, letters separated by spaces.
    pub fn masked_word(&self) -> String {
        let mut masked = String::with_capacity(self.word.len() * 2);
        for (i, ch) in self.word.chars().enumerate() {
            if i > 0 {
                masked.push(' ');
            }
            masked.push(if self.guessed.contains(&ch) { ch } else { '_' });
        }
        masked
    }

    pub fn guess(&mut self, letter: char) -> Result<Outcome> {
        if !letter.is_ascii_alphabetic() {
            return Err(GameError::InvalidLetter);
        }
        if self.is_finished() {
            return Err(GameError::ChallengeFinished);
        }

        let letter = letter.to_ascii_uppercase();
        if !self.guessed.insert(letter) {
            return Err(GameError::DuplicateGuess);
        }

        if self.word.contains(letter) {
            Ok(if self.has_won() {
                Outcome::Won
            } else {
                Outcome::Correct
            })
        } else {
            self.misses += 1;
            Ok(if self.has_lost() {
                Outcome::Lost
            } else {
                Outcome::Incorrect
            })
        }
    }
}

impl MiniGame for Hangman {
    type Params = HangmanParams;
    type Input = char;

    fn start<R: Rng + ?Sized>(seed: Value, params: &HangmanParams, rng: &mut R) -> Result<Self> {
        let word = params.words.pick(seed, rng)?;
        Self::new(&word, params.max_misses)
    }

    fn apply_input<R: Rng + ?Sized>(&mut self, input: char, _rng: &mut R) -> Result<Outcome> {
        self.guess(input)
    }

    fn has_won(&self) -> bool {
        self.word.chars().all(|ch| self.guessed.contains(&ch))
    }

    fn has_lost(&self) -> bool {
        !self.has_won() && self.misses >= self.max_misses
    }
}

impl fmt::Display for Hangman {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  ({} letters, {} misses left)",
            self.masked_word(),
            self.word.len(),
            self.misses_left()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guess_all(game: &mut Hangman, letters: &str) -> Outcome {
        let mut last = Outcome::Pending;
        for letter in letters.chars() {
            last = game.guess(letter).unwrap();
        }
        last
    }

    #[test]
    fn distinct_letters_win_in_any_order() {
        for order in ["SILENC", "CNELIS", "ELSCIN", "nicels"] {
            let mut game = Hangman::new("SILENCE", 6).unwrap();

            assert_eq!(guess_all(&mut game, order), Outcome::Won);
            assert!(game.has_won());
            assert_eq!(game.misses(), 0);
        }
    }

    #[test]
    fn win_is_reported_on_the_completing_guess() {
        let mut game = Hangman::new("SILENCE", 6).unwrap();

        assert_eq!(guess_all(&mut game, "SILEN"), Outcome::Correct);
        assert!(!game.has_won());
        assert_eq!(game.guess('C'), Ok(Outcome::Won));
    }

    #[test]
    fn loses_exactly_at_max_misses() {
        for max in [5, 6, 7] {
            let mut game = Hangman::new("MATRIX", max).unwrap();
            let wrong: String = "BCDEFGHJ".chars().take(usize::from(max)).collect();
            let (almost, last) = wrong.split_at(wrong.len() - 1);

            assert_eq!(guess_all(&mut game, almost), Outcome::Incorrect);
            assert!(!game.has_lost());
            assert_eq!(game.misses_left(), 1);

            assert_eq!(guess_all(&mut game, last), Outcome::Lost);
            assert!(game.has_lost());
            assert_eq!(game.guess('M'), Err(GameError::ChallengeFinished));
        }
    }

    #[test]
    fn rejected_guesses_cost_nothing() {
        let mut game = Hangman::new("PYTHON", 6).unwrap();
        game.guess('z').unwrap();
        let before = game.clone();

        assert_eq!(game.guess('Z'), Err(GameError::DuplicateGuess));
        assert_eq!(game.guess('4'), Err(GameError::InvalidLetter));
        assert_eq!(game.guess(' '), Err(GameError::InvalidLetter));
        assert_eq!(game, before);
        assert_eq!(game.misses(), 1);
    }

    #[test]
    fn masked_word_reveals_guessed_letters() {
        let mut game = Hangman::new("matrix", 6).unwrap();
        game.guess('t').unwrap();
        game.guess('x').unwrap();

        assert_eq!(game.masked_word(), "_ _ T _ _ X");
    }
}
