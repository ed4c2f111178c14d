use core::fmt;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::{MiniGame, Outcome};
use crate::*;

/// A throw in rock-paper-scissors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Throw {
    Rock,
    Paper,
    Scissors,
}

impl Throw {
    pub const ALL: [Throw; 3] = [Throw::Rock, Throw::Paper, Throw::Scissors];

    pub const fn beats(self, other: Throw) -> bool {
        use Throw::*;
        matches!(
            (self, other),
            (Rock, Scissors) | (Scissors, Paper) | (Paper, Rock)
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Rock => "rock",
            Self::Paper => "paper",
            Self::Scissors => "scissors",
        }
    }
}

impl fmt::Display for Throw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuelResult {
    Win,
    Lose,
    Tie,
}

/// Classifies a round from the player's point of view.
pub const fn classify(player: Throw, opponent: Throw) -> DuelResult {
    if player.beats(opponent) {
        DuelResult::Win
    } else if opponent.beats(player) {
        DuelResult::Lose
    } else {
        DuelResult::Tie
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub player: Throw,
    pub opponent: Throw,
    pub result: DuelResult,
}

/// Rock-paper-scissors against a uniformly random opponent. Only the last
/// round is remembered; ties and losses allow another throw.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Duel {
    last_round: Option<Round>,
}

impl Duel {
    pub fn last_round(&self) -> Option<Round> {
        self.last_round
    }

    /// Plays one round against a known opponent throw.
    pub fn play_round(&mut self, player: Throw, opponent: Throw) -> Result<Outcome> {
        if self.has_won() {
            return Err(GameError::ChallengeFinished);
        }

        let result = classify(player, opponent);
        self.last_round = Some(Round {
            player,
            opponent,
            result,
        });

        Ok(match result {
            DuelResult::Win => Outcome::Won,
            DuelResult::Tie => Outcome::Pending,
            DuelResult::Lose => Outcome::Incorrect,
        })
    }
}

impl MiniGame for Duel {
    type Params = ();
    type Input = Throw;

    fn start<R: Rng + ?Sized>(_seed: Value, _params: &(), _rng: &mut R) -> Result<Self> {
        Ok(Self::default())
    }

    fn apply_input<R: Rng + ?Sized>(&mut self, input: Throw, rng: &mut R) -> Result<Outcome> {
        let opponent = *Throw::ALL.choose(rng).unwrap_or(&Throw::Rock);
        log::debug!("duel: player {} vs opponent {}", input, opponent);
        self.play_round(input, opponent)
    }

    fn has_won(&self) -> bool {
        matches!(
            self.last_round,
            Some(Round {
                result: DuelResult::Win,
                ..
            })
        )
    }

    fn has_lost(&self) -> bool {
        false
    }
}

impl fmt::Display for Duel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last_round {
            None => f.write_str("Beat the machine: rock, paper or scissors?"),
            Some(round) => write!(
                f,
                "You threw {}, the machine threw {}: {}",
                round.player,
                round.opponent,
                match round.result {
                    DuelResult::Win => "you win",
                    DuelResult::Lose => "you lose, try again",
                    DuelResult::Tie => "tie, try again",
                }
            ),
        }
    }
}
