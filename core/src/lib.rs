#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::{Index, Sub};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use challenge::*;
pub use config::*;
pub use cycle::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use input::*;
pub use mission::*;
pub use session::*;
pub use types::*;

mod cell;
mod challenge;
mod config;
mod cycle;
mod error;
mod generator;
mod grid;
mod input;
mod mission;
mod session;
mod types;

/// Rectangular grid of hidden values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
    values: Array2<Value>,
}

impl Matrix {
    pub fn from_values(values: Array2<Value>) -> Self {
        Self { values }
    }

    /// Builds a matrix from row-major `values`, which must fill `size` exactly.
    pub fn from_rows(size: Coord2, values: Vec<Value>) -> Result<Self> {
        let shape: (usize, usize) = (size.0.into(), size.1.into());
        Array2::from_shape_vec(shape, values)
            .map(Self::from_values)
            .map_err(|_| GameError::InvalidBoardShape)
    }

    pub fn from_elem(size: Coord2, value: Value) -> Self {
        Self::from_values(Array2::from_elem(size.to_nd_index(), value))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.values.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.values.len().try_into().unwrap()
    }

    pub fn row(&self, row: Coord) -> impl Iterator<Item = Value> + '_ {
        self.values.row(row.into()).into_iter().copied()
    }

    /// Values in raster order.
    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        self.values.iter().copied()
    }

    /// Cell-by-cell combination of two matrices of the same size. `f` returns
    /// `None` when the result does not fit a `Value`.
    pub fn zip_with(
        &self,
        other: &Matrix,
        f: impl Fn(Value, Value) -> Option<Value>,
    ) -> Result<Matrix> {
        if self.values.dim() != other.values.dim() {
            return Err(GameError::InvalidBoardShape);
        }
        let values = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(&lhs, &rhs)| f(lhs, rhs).ok_or(GameError::InvalidRange))
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(self.size(), values)
    }
}

impl Index<Coord2> for Matrix {
    type Output = Value;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.values[coords.to_nd_index()]
    }
}

impl Sub for &Matrix {
    type Output = Result<Matrix>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, Value::checked_sub)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    NoChange,
    Changed,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UnlockOutcome {
    NoChange,
    Unlocked,
    Completed,
}

impl UnlockOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Whether the front-end should celebrate. Purely cosmetic.
    pub const fn celebrates(self) -> bool {
        self.has_update()
    }
}
