use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// Index into a cycle of `cycle_length` entries for the cell at `linear_index`.
pub const fn select_variant(linear_index: CellCount, cycle_length: usize) -> usize {
    linear_index as usize % cycle_length
}

/// Ordered list of challenges handed out by position, so a given cell always
/// offers the same kind of game for a given grid shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ChallengeSpec>", into = "Vec<ChallengeSpec>")]
pub struct ChallengeCycle {
    entries: Vec<ChallengeSpec>,
}

impl ChallengeCycle {
    pub fn new(entries: Vec<ChallengeSpec>) -> Result<Self> {
        if entries.is_empty() {
            return Err(GameError::EmptyCycle);
        }
        Ok(Self { entries })
    }

    /// Hangman, rock-paper-scissors, symbol algebra and light logic.
    pub fn standard(hangman: HangmanParams) -> Self {
        Self {
            entries: alloc::vec![
                ChallengeSpec::Hangman(hangman),
                ChallengeSpec::Duel,
                ChallengeSpec::Symbols,
                ChallengeSpec::Logic,
            ],
        }
    }

    /// One fixed challenge per row of the fast-track matrix.
    pub fn fast_track(max_misses: u8) -> Self {
        let hangman = |word: &str| {
            ChallengeSpec::Hangman(HangmanParams::new(WordSource::Fixed(word.into()), max_misses))
        };
        Self {
            entries: alloc::vec![
                ChallengeSpec::Duel,
                hangman("SILENCE"),
                ChallengeSpec::Arithmetic {
                    style: ArithmeticStyle::Product,
                },
                hangman("MATRIX"),
                ChallengeSpec::Symbols,
                hangman("PYTHON"),
                ChallengeSpec::Duel,
            ],
        }
    }

    pub fn set_max_misses(&mut self, max_misses: u8) {
        for spec in &mut self.entries {
            if let ChallengeSpec::Hangman(params) = spec {
                params.max_misses = max_misses;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ChallengeSpec] {
        &self.entries
    }

    pub fn spec_at(&self, linear_index: CellCount) -> &ChallengeSpec {
        &self.entries[select_variant(linear_index, self.entries.len())]
    }
}

impl TryFrom<Vec<ChallengeSpec>> for ChallengeCycle {
    type Error = GameError;

    fn try_from(entries: Vec<ChallengeSpec>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<ChallengeCycle> for Vec<ChallengeSpec> {
    fn from(cycle: ChallengeCycle) -> Self {
        cycle.entries
    }
}
