use alloc::vec::Vec;
use core::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::{MiniGame, Outcome};
use crate::*;

const FREE_VALUE_RANGE: core::ops::RangeInclusive<i64> = -9..=9;
const COEFFICIENT_RANGE: core::ops::RangeInclusive<i64> = 1..=3;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    Triangle,
    Square,
    Circle,
    Star,
}

impl Symbol {
    pub const ALL: [Symbol; 4] = [Symbol::Triangle, Symbol::Square, Symbol::Circle, Symbol::Star];

    pub const fn glyph(self) -> char {
        match self {
            Self::Triangle => '▲',
            Self::Square => '■',
            Self::Circle => '●',
            Self::Star => '★',
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub coefficient: i64,
    pub symbol: Symbol,
}

/// `sum(coefficient * symbol) = total`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    pub terms: Vec<Term>,
    pub total: i64,
}

impl Equation {
    pub fn coefficient_of(&self, symbol: Symbol) -> i64 {
        self.terms
            .iter()
            .filter(|term| term.symbol == symbol)
            .map(|term| term.coefficient)
            .sum()
    }

    pub fn evaluate(&self, value_of: impl Fn(Symbol) -> i64) -> i64 {
        self.terms
            .iter()
            .map(|term| term.coefficient * value_of(term.symbol))
            .sum()
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" + ")?;
            }
            if term.coefficient != 1 {
                write!(f, "{}", term.coefficient)?;
            }
            write!(f, "{}", term.symbol.glyph())?;
        }
        write!(f, " = {}", self.total)
    }
}

/// Two linear equations over three symbols. The pinned symbol carries the
/// challenge seed and is the only one the pair determines uniquely.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolPuzzle {
    equations: [Equation; 2],
    pinned: Symbol,
    answer: i64,
    solved: bool,
}

impl SymbolPuzzle {
    /// Builds `p·a + q·b = v1` and `p·a + q·b + k·pinned = v2`.
    pub fn build(
        free: [(Symbol, i64); 2],
        coefficients: [i64; 3],
        pinned: Symbol,
        answer: i64,
    ) -> Self {
        let [(a, value_a), (b, value_b)] = free;
        let [p, q, k] = coefficients;
        let base = p * value_a + q * value_b;

        let first = Equation {
            terms: alloc::vec![
                Term {
                    coefficient: p,
                    symbol: a,
                },
                Term {
                    coefficient: q,
                    symbol: b,
                },
            ],
            total: base,
        };
        let mut second = first.clone();
        second.terms.push(Term {
            coefficient: k,
            symbol: pinned,
        });
        second.total = base + k * answer;

        Self {
            equations: [first, second],
            pinned,
            answer,
            solved: false,
        }
    }

    pub fn equations(&self) -> &[Equation; 2] {
        &self.equations
    }

    pub fn pinned(&self) -> Symbol {
        self.pinned
    }

    /// Eliminates every free symbol and solves for the pinned one, if the
    /// pair of equations determines it.
    pub fn solve_pinned(&self) -> Option<i64> {
        let [first, second] = &self.equations;
        let free_cancels = Symbol::ALL
            .iter()
            .filter(|&&symbol| symbol != self.pinned)
            .all(|&symbol| first.coefficient_of(symbol) == second.coefficient_of(symbol));
        let k = second.coefficient_of(self.pinned) - first.coefficient_of(self.pinned);
        let rest = second.total - first.total;

        if !free_cancels || k == 0 || rest % k != 0 {
            return None;
        }
        Some(rest / k)
    }

    pub fn submit(&mut self, answer: i64) -> Result<Outcome> {
        if self.solved {
            return Err(GameError::ChallengeFinished);
        }
        if answer == self.answer {
            self.solved = true;
            Ok(Outcome::Won)
        } else {
            Ok(Outcome::Incorrect)
        }
    }
}

impl MiniGame for SymbolPuzzle {
    type Params = ();
    type Input = i64;

    fn start<R: Rng + ?Sized>(seed: Value, _params: &(), rng: &mut R) -> Result<Self> {
        let mut symbols = Symbol::ALL;
        symbols.shuffle(rng);
        let [a, b, pinned, _] = symbols;

        let free = [
            (a, rng.random_range(FREE_VALUE_RANGE)),
            (b, rng.random_range(FREE_VALUE_RANGE)),
        ];
        let coefficients = [
            rng.random_range(COEFFICIENT_RANGE),
            rng.random_range(COEFFICIENT_RANGE),
            rng.random_range(COEFFICIENT_RANGE),
        ];
        Ok(Self::build(free, coefficients, pinned, seed.into()))
    }

    fn apply_input<R: Rng + ?Sized>(&mut self, input: i64, _rng: &mut R) -> Result<Outcome> {
        self.submit(input)
    }

    fn has_won(&self) -> bool {
        self.solved
    }

    fn has_lost(&self) -> bool {
        false
    }
}

impl fmt::Display for SymbolPuzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second] = &self.equations;
        write!(
            f,
            "{first}\n{second}\n{} = ?",
            self.pinned.glyph()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn pinned_value_is_the_unique_solution() {
        let mut rng = SmallRng::seed_from_u64(11);

        for seed in -40..40 {
            for _ in 0..25 {
                let puzzle = SymbolPuzzle::start(seed, &(), &mut rng).unwrap();
                assert_eq!(puzzle.solve_pinned(), Some(i64::from(seed)));
            }
        }
    }

    #[test]
    fn any_free_values_satisfy_the_pair() {
        let pinned = Symbol::Circle;
        for value_a in -9..=9 {
            for value_b in -9..=9 {
                let free = [(Symbol::Triangle, value_a), (Symbol::Square, value_b)];
                let puzzle = SymbolPuzzle::build(free, [2, 3, 2], pinned, 6);
                let value_of = |symbol| match symbol {
                    Symbol::Triangle => value_a,
                    Symbol::Square => value_b,
                    Symbol::Circle => 6,
                    Symbol::Star => 0,
                };

                for equation in puzzle.equations() {
                    assert_eq!(equation.evaluate(value_of), equation.total);
                }
                assert_eq!(puzzle.solve_pinned(), Some(6));
            }
        }
    }

    #[test]
    fn three_distinct_symbols_are_used() {
        let mut rng = SmallRng::seed_from_u64(5);
        let puzzle = SymbolPuzzle::start(4, &(), &mut rng).unwrap();
        let second = &puzzle.equations()[1];

        assert_eq!(second.terms.len(), 3);
        assert_ne!(second.terms[0].symbol, second.terms[1].symbol);
        assert!(second.terms[..2].iter().all(|t| t.symbol != puzzle.pinned()));
    }

    #[test]
    fn only_the_pinned_value_wins() {
        let free = [(Symbol::Star, 4), (Symbol::Square, -2)];
        let mut puzzle = SymbolPuzzle::build(free, [1, 1, 1], Symbol::Triangle, 6);

        assert_eq!(alloc::format!("{}", puzzle.equations()[0]), "★ + ■ = 2");
        assert_eq!(alloc::format!("{}", puzzle.equations()[1]), "★ + ■ + ▲ = 8");
        assert_eq!(puzzle.submit(4), Ok(Outcome::Incorrect));
        assert_eq!(puzzle.submit(6), Ok(Outcome::Won));
        assert!(puzzle.has_won());
    }
}
