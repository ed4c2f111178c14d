use alloc::string::String;
use alloc::vec::Vec;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::*;

/// Words used when a hangman entry draws from the built-in list.
pub const DEFAULT_WORDS: &[&str] = &[
    "SILENCE", "MATRIX", "PYTHON", "CIPHER", "KERNEL", "SIGNAL", "VECTOR", "SYSTEM", "MEMORY",
    "REPAIR", "SECTOR", "BINARY",
];

const NUMBER_NAMES: [&str; 21] = [
    "ZERO", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE", "TEN",
    "ELEVEN", "TWELVE", "THIRTEEN", "FOURTEEN", "FIFTEEN", "SIXTEEN", "SEVENTEEN", "EIGHTEEN",
    "NINETEEN", "TWENTY",
];

/// English name of the magnitude of `value`, if it is small enough to have one.
pub fn number_name(value: Value) -> Option<&'static str> {
    let index = usize::try_from(value.unsigned_abs()).ok()?;
    NUMBER_NAMES.get(index).copied()
}

/// Where a hangman challenge takes its secret word from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordSource {
    Fixed(String),
    List(Vec<String>),
    /// Spells out the challenge seed, e.g. `7` becomes `SEVEN`. Seeds without
    /// a name fall back to a random pick from the list.
    NumberName(Vec<String>),
}

impl WordSource {
    pub fn default_list() -> Self {
        Self::List(DEFAULT_WORDS.iter().map(|&word| word.into()).collect())
    }

    pub fn pick<R: Rng + ?Sized>(&self, seed: Value, rng: &mut R) -> Result<String> {
        let word = match self {
            Self::Fixed(word) => word.clone(),
            Self::List(words) => pick_from(words, rng)?,
            Self::NumberName(fallback) => match number_name(seed) {
                Some(name) => name.into(),
                None => {
                    log::debug!("no name for {seed}, picking a word from the list");
                    pick_from(fallback, rng)?
                }
            },
        };
        normalize_word(&word)
    }
}

impl Default for WordSource {
    fn default() -> Self {
        Self::default_list()
    }
}

fn pick_from<R: Rng + ?Sized>(words: &[String], rng: &mut R) -> Result<String> {
    words.choose(rng).cloned().ok_or(GameError::InvalidWord)
}

/// Upper-cases `word`, rejecting empty or non-alphabetic words.
pub fn normalize_word(word: &str) -> Result<String> {
    let word = word.trim();
    if word.is_empty() || !word.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(GameError::InvalidWord);
    }
    Ok(word.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn number_names_cover_small_magnitudes() {
        assert_eq!(number_name(0), Some("ZERO"));
        assert_eq!(number_name(7), Some("SEVEN"));
        assert_eq!(number_name(-13), Some("THIRTEEN"));
        assert_eq!(number_name(20), Some("TWENTY"));
        assert_eq!(number_name(21), None);
        assert_eq!(number_name(Value::MIN), None);
    }

    #[test]
    fn number_source_falls_back_to_list() {
        let mut rng = SmallRng::seed_from_u64(1);
        let source = WordSource::NumberName(vec!["kernel".into()]);

        assert_eq!(source.pick(6, &mut rng).unwrap(), "SIX");
        assert_eq!(source.pick(99, &mut rng).unwrap(), "KERNEL");
    }

    #[test]
    fn invalid_words_are_rejected() {
        let mut rng = SmallRng::seed_from_u64(1);

        assert_eq!(normalize_word("  "), Err(GameError::InvalidWord));
        assert_eq!(normalize_word("R2D2"), Err(GameError::InvalidWord));
        assert_eq!(
            WordSource::List(vec![]).pick(0, &mut rng),
            Err(GameError::InvalidWord)
        );
        assert_eq!(normalize_word(" matrix ").unwrap(), "MATRIX");
    }
}
