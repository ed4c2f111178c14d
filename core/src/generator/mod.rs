use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;
pub use literal::*;
pub use plan::*;
pub use random::*;

mod literal;
mod plan;
mod random;

/// The fixed numbers behind the first level, two per row.
pub const LEVEL_ONE_VALUES: [Value; 14] = [1, 6, 9, 14, 7, 4, 3, 8, 7, 15, 4, 5, 12, 5];

/// Shape of [`LEVEL_ONE_VALUES`] laid out as its own matrix.
pub const LEVEL_ONE_SHAPE: Coord2 = (7, 2);

pub trait MatrixGenerator {
    fn generate<R: Rng + ?Sized>(self, size: Coord2, rng: &mut R) -> Result<Matrix>;
}

/// Inclusive bounds for generated values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(Value, Value)", into = "(Value, Value)")]
pub struct ValueRange {
    min: Value,
    max: Value,
}

impl ValueRange {
    pub const fn new_unchecked(min: Value, max: Value) -> Self {
        Self { min, max }
    }

    pub fn new(min: Value, max: Value) -> Result<Self> {
        if min > max {
            return Err(GameError::InvalidRange);
        }
        Ok(Self::new_unchecked(min, max))
    }

    pub fn min(self) -> Value {
        self.min
    }

    pub fn max(self) -> Value {
        self.max
    }

    pub fn contains(self, value: Value) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> Value {
        rng.random_range(self.min..=self.max)
    }
}

impl TryFrom<(Value, Value)> for ValueRange {
    type Error = GameError;

    fn try_from((min, max): (Value, Value)) -> Result<Self> {
        Self::new(min, max)
    }
}

impl From<ValueRange> for (Value, Value) {
    fn from(range: ValueRange) -> Self {
        (range.min, range.max)
    }
}
