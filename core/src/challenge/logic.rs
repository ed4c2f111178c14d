use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{MiniGame, Outcome};
use crate::*;

/// Player answer to a light-logic panel: the sign indicator bit (1 for
/// non-negative) and the magnitude.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicAnswer {
    pub sign_bit: u8,
    pub magnitude: u32,
}

/// Four switches feeding `(a AND b) XOR (c OR d)`. The formula is shown negated
/// whenever that is needed for its value to read as the sign of the target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightLogic {
    bits: [bool; 4],
    negated: bool,
    target: Value,
    sign_warning: bool,
    solved: bool,
}

impl LightLogic {
    pub fn new(bits: [bool; 4], target: Value) -> Self {
        let negated = natural_value(bits) != (target >= 0);
        Self {
            bits,
            negated,
            target,
            sign_warning: false,
            solved: false,
        }
    }

    pub fn bits(&self) -> [bool; 4] {
        self.bits
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Truth value of the formula as displayed.
    pub fn displayed_value(&self) -> bool {
        natural_value(self.bits) != self.negated
    }

    /// Set when the last answer had the right magnitude but the wrong sign bit.
    pub fn sign_warning(&self) -> bool {
        self.sign_warning
    }

    pub fn submit(&mut self, answer: LogicAnswer) -> Result<Outcome> {
        if answer.sign_bit > 1 {
            return Err(GameError::InvalidSignBit);
        }
        if self.solved {
            return Err(GameError::ChallengeFinished);
        }

        let sign_ok = (answer.sign_bit == 1) == (self.target >= 0);
        let magnitude_ok = answer.magnitude == self.target.unsigned_abs();
        self.sign_warning = magnitude_ok && !sign_ok;

        if sign_ok && magnitude_ok {
            self.solved = true;
            Ok(Outcome::Won)
        } else {
            Ok(Outcome::Incorrect)
        }
    }
}

const fn natural_value([a, b, c, d]: [bool; 4]) -> bool {
    (a && b) ^ (c || d)
}

impl MiniGame for LightLogic {
    type Params = ();
    type Input = LogicAnswer;

    fn start<R: Rng + ?Sized>(seed: Value, _params: &(), rng: &mut R) -> Result<Self> {
        let bits = [
            rng.random_bool(0.5),
            rng.random_bool(0.5),
            rng.random_bool(0.5),
            rng.random_bool(0.5),
        ];
        Ok(Self::new(bits, seed))
    }

    fn apply_input<R: Rng + ?Sized>(&mut self, input: LogicAnswer, _rng: &mut R) -> Result<Outcome> {
        self.submit(input)
    }

    fn has_won(&self) -> bool {
        self.solved
    }

    fn has_lost(&self) -> bool {
        false
    }
}

impl fmt::Display for LightLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.bits.map(u8::from);
        if self.negated {
            write!(f, "NOT (({a} AND {b}) XOR ({c} OR {d}))")?;
        } else {
            write!(f, "({a} AND {b}) XOR ({c} OR {d})")?;
        }
        write!(f, " = {}", u8::from(self.displayed_value()))?;
        if self.sign_warning {
            f.write_str("  (check the sign bit)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn all_bit_patterns() -> impl Iterator<Item = [bool; 4]> {
        (0u8..16).map(|n| [n & 1 != 0, n & 2 != 0, n & 4 != 0, n & 8 != 0])
    }

    #[test]
    fn displayed_value_matches_sign_for_every_pattern() {
        for bits in all_bit_patterns() {
            for target in [-20, -1, 0, 1, 17] {
                let panel = LightLogic::new(bits, target);
                assert_eq!(panel.displayed_value(), target >= 0, "{bits:?} {target}");
            }
        }
    }

    #[test]
    fn displayed_value_matches_sign_for_random_panels() {
        let mut rng = SmallRng::seed_from_u64(9);
        for seed in -50..50 {
            let panel = LightLogic::start(seed, &(), &mut rng).unwrap();
            assert_eq!(panel.displayed_value(), seed >= 0);
        }
    }

    #[test]
    fn negation_only_when_natural_value_disagrees() {
        // (1 AND 1) XOR (0 OR 0) = 1
        let bits = [true, true, false, false];
        assert!(!LightLogic::new(bits, 3).is_negated());
        assert!(LightLogic::new(bits, -3).is_negated());
    }

    #[test]
    fn both_sign_and_magnitude_are_required() {
        let mut panel = LightLogic::new([false; 4], -7);

        let wrong_sign = LogicAnswer {
            sign_bit: 1,
            magnitude: 7,
        };
        assert_eq!(panel.submit(wrong_sign), Ok(Outcome::Incorrect));
        assert!(panel.sign_warning());

        let wrong_magnitude = LogicAnswer {
            sign_bit: 0,
            magnitude: 6,
        };
        assert_eq!(panel.submit(wrong_magnitude), Ok(Outcome::Incorrect));
        assert!(!panel.sign_warning());

        assert_eq!(
            panel.submit(LogicAnswer {
                sign_bit: 2,
                magnitude: 7
            }),
            Err(GameError::InvalidSignBit)
        );

        let right = LogicAnswer {
            sign_bit: 0,
            magnitude: 7,
        };
        assert_eq!(panel.submit(right), Ok(Outcome::Won));
        assert!(panel.has_won());
    }

    #[test]
    fn zero_counts_as_non_negative() {
        let mut panel = LightLogic::new([true; 4], 0);
        let answer = LogicAnswer {
            sign_bit: 1,
            magnitude: 0,
        };
        assert_eq!(panel.submit(answer), Ok(Outcome::Won));
    }
}
