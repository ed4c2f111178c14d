use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{MiniGame, Outcome};
use crate::*;

const OPERAND_RANGE: core::ops::RangeInclusive<i64> = 1..=20;
const FACTOR_RANGE: core::ops::RangeInclusive<i64> = 5..=15;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArithmeticStyle {
    /// `operand ± ? = target`, where the unknown is the challenge seed.
    #[default]
    MissingTerm,
    /// `lhs × rhs = ?` with both factors drawn at random.
    Product,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
}

impl Operator {
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Question {
    MissingTerm {
        operand: i64,
        operator: Operator,
        target: i64,
    },
    Product {
        lhs: i64,
        rhs: i64,
    },
}

impl Question {
    pub fn missing_term(operand: i64, operator: Operator, unknown: i64) -> Self {
        let target = match operator {
            Operator::Add => operand + unknown,
            Operator::Sub => operand - unknown,
        };
        Self::MissingTerm {
            operand,
            operator,
            target,
        }
    }

    pub fn expected(self) -> i64 {
        match self {
            Self::MissingTerm {
                operand,
                operator: Operator::Add,
                target,
            } => target - operand,
            Self::MissingTerm {
                operand,
                operator: Operator::Sub,
                target,
            } => operand - target,
            Self::Product { lhs, rhs } => lhs * rhs,
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MissingTerm {
                operand,
                operator,
                target,
            } => write!(f, "{} {} ? = {}", operand, operator.symbol(), target),
            Self::Product { lhs, rhs } => write!(f, "{lhs} x {rhs} = ?"),
        }
    }
}

/// A single arithmetic question, generated once per attempt and kept until solved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arithmetic {
    question: Question,
    solved: bool,
}

impl Arithmetic {
    pub fn with_question(question: Question) -> Self {
        Self {
            question,
            solved: false,
        }
    }

    pub fn question(&self) -> Question {
        self.question
    }

    pub fn submit(&mut self, answer: i64) -> Result<Outcome> {
        if self.solved {
            return Err(GameError::ChallengeFinished);
        }
        if answer == self.question.expected() {
            self.solved = true;
            Ok(Outcome::Won)
        } else {
            Ok(Outcome::Incorrect)
        }
    }
}

impl MiniGame for Arithmetic {
    type Params = ArithmeticStyle;
    type Input = i64;

    fn start<R: Rng + ?Sized>(seed: Value, style: &ArithmeticStyle, rng: &mut R) -> Result<Self> {
        let question = match style {
            ArithmeticStyle::MissingTerm => {
                let operand = rng.random_range(OPERAND_RANGE);
                let operator = if rng.random_bool(0.5) {
                    Operator::Add
                } else {
                    Operator::Sub
                };
                Question::missing_term(operand, operator, seed.into())
            }
            ArithmeticStyle::Product => Question::Product {
                lhs: rng.random_range(FACTOR_RANGE),
                rhs: rng.random_range(FACTOR_RANGE),
            },
        };
        Ok(Self::with_question(question))
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

impl fmt::Display for Arithmetic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.question, f)
    }
}
