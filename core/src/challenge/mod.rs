use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use arithmetic::*;
pub use duel::*;
pub use hangman::*;
pub use logic::*;
pub use symbols::*;
pub use words::*;

mod arithmetic;
mod duel;
mod hangman;
mod logic;
mod symbols;
mod words;

/// Result of feeding one input to a mini-game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Accepted, nothing decided yet.
    Pending,
    Correct,
    Incorrect,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

pub trait MiniGame: Sized {
    type Params;
    type Input;

    /// Sets up a fresh game for a cell whose hidden value is `seed`.
    fn start<R: Rng + ?Sized>(seed: Value, params: &Self::Params, rng: &mut R) -> Result<Self>;

    fn apply_input<R: Rng + ?Sized>(&mut self, input: Self::Input, rng: &mut R) -> Result<Outcome>;

    fn has_won(&self) -> bool;

    fn has_lost(&self) -> bool;

    fn is_finished(&self) -> bool {
        self.has_won() || self.has_lost()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeKind {
    Duel,
    Hangman,
    Arithmetic,
    Symbols,
    Logic,
}

impl ChallengeKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Duel => "Rock-paper-scissors",
            Self::Hangman => "Hangman",
            Self::Arithmetic => "Arithmetic",
            Self::Symbols => "Symbol algebra",
            Self::Logic => "Light logic",
        }
    }
}

impl fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of a challenge cycle: which game to play and how it is set up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChallengeSpec {
    Duel,
    Hangman(HangmanParams),
    Arithmetic {
        #[serde(default)]
        style: ArithmeticStyle,
    },
    Symbols,
    Logic,
}

impl ChallengeSpec {
    pub const fn kind(&self) -> ChallengeKind {
        match self {
            Self::Duel => ChallengeKind::Duel,
            Self::Hangman(_) => ChallengeKind::Hangman,
            Self::Arithmetic { .. } => ChallengeKind::Arithmetic,
            Self::Symbols => ChallengeKind::Symbols,
            Self::Logic => ChallengeKind::Logic,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeInput {
    Throw(Throw),
    Letter(char),
    Number(i64),
    Logic(LogicAnswer),
}

/// State of the mini-game currently being played, one variant per game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ChallengeState {
    Duel(Duel),
    Hangman(Hangman),
    Arithmetic(Arithmetic),
    Symbols(SymbolPuzzle),
    Logic(LightLogic),
}

impl ChallengeState {
    pub fn start<R: Rng + ?Sized>(spec: &ChallengeSpec, seed: Value, rng: &mut R) -> Result<Self> {
        Ok(match spec {
            ChallengeSpec::Duel => Self::Duel(Duel::start(seed, &(), rng)?),
            ChallengeSpec::Hangman(params) => Self::Hangman(Hangman::start(seed, params, rng)?),
            ChallengeSpec::Arithmetic { style } => {
                Self::Arithmetic(Arithmetic::start(seed, style, rng)?)
            }
            ChallengeSpec::Symbols => Self::Symbols(SymbolPuzzle::start(seed, &(), rng)?),
            ChallengeSpec::Logic => Self::Logic(LightLogic::start(seed, &(), rng)?),
        })
    }

    pub const fn kind(&self) -> ChallengeKind {
        match self {
            Self::Duel(_) => ChallengeKind::Duel,
            Self::Hangman(_) => ChallengeKind::Hangman,
            Self::Arithmetic(_) => ChallengeKind::Arithmetic,
            Self::Symbols(_) => ChallengeKind::Symbols,
            Self::Logic(_) => ChallengeKind::Logic,
        }
    }

    /// Feeds `input` to the game; inputs meant for another kind of game are
    /// rejected without touching the state.
    pub fn apply<R: Rng + ?Sized>(&mut self, input: ChallengeInput, rng: &mut R) -> Result<Outcome> {
        use ChallengeInput as In;

        match (self, input) {
            (Self::Duel(game), In::Throw(throw)) => game.apply_input(throw, rng),
            (Self::Hangman(game), In::Letter(letter)) => game.apply_input(letter, rng),
            (Self::Arithmetic(game), In::Number(number)) => game.apply_input(number, rng),
            (Self::Symbols(game), In::Number(number)) => game.apply_input(number, rng),
            (Self::Logic(game), In::Logic(answer)) => game.apply_input(answer, rng),
            _ => Err(GameError::InputMismatch),
        }
    }

    pub fn has_won(&self) -> bool {
        match self {
            Self::Duel(game) => game.has_won(),
            Self::Hangman(game) => game.has_won(),
            Self::Arithmetic(game) => game.has_won(),
            Self::Symbols(game) => game.has_won(),
            Self::Logic(game) => game.has_won(),
        }
    }

    pub fn has_lost(&self) -> bool {
        match self {
            Self::Duel(game) => game.has_lost(),
            Self::Hangman(game) => game.has_lost(),
            Self::Arithmetic(game) => game.has_lost(),
            Self::Symbols(game) => game.has_lost(),
            Self::Logic(game) => game.has_lost(),
        }
    }
}

impl fmt::Display for ChallengeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duel(game) => fmt::Display::fmt(game, f),
            Self::Hangman(game) => fmt::Display::fmt(game, f),
            Self::Arithmetic(game) => fmt::Display::fmt(game, f),
            Self::Symbols(game) => fmt::Display::fmt(game, f),
            Self::Logic(game) => fmt::Display::fmt(game, f),
        }
    }
}
