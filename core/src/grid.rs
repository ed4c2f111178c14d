use core::num::Saturating;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Whether cells are won one by one or a whole row at a time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    #[default]
    Cell,
    Row,
}

/// What the player is trying to unlock.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    Cell(Coord2),
    Row(Coord),
}

impl Target {
    /// Position used to pick the challenge: row-major index for cells, the
    /// row number for rows.
    pub const fn linear_index(self, size: Coord2) -> CellCount {
        match self {
            Self::Cell(coords) => linear_index(coords, size),
            Self::Row(row) => row as CellCount,
        }
    }

    pub const fn contains(self, coords: Coord2) -> bool {
        match self {
            Self::Cell(cell) => cell.0 == coords.0 && cell.1 == coords.1,
            Self::Row(row) => row == coords.0,
        }
    }
}

/// The single attempt in progress: the contested target and its mini-game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub target: Target,
    pub challenge: ChallengeState,
}

impl Attempt {
    pub fn new(target: Target, challenge: ChallengeState) -> Self {
        Self { target, challenge }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridState {
    matrix: Matrix,
    mask: Array2<bool>,
    unlocked_count: Saturating<CellCount>,
    granularity: Granularity,
    attempt: Option<Attempt>,
}

impl GridState {
    pub fn new(matrix: Matrix, granularity: Granularity) -> Self {
        let size = matrix.size();
        Self {
            matrix,
            mask: Array2::default(size.to_nd_index()),
            unlocked_count: Saturating(0),
            granularity,
            attempt: None,
        }
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn size(&self) -> Coord2 {
        self.matrix.size()
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn unlocked_count(&self) -> CellCount {
        self.unlocked_count.0
    }

    pub fn validate_target(&self, target: Target) -> Result<Target> {
        match (self.granularity, target) {
            (Granularity::Cell, Target::Cell(coords)) => {
                self.matrix.validate_coords(coords).map(Target::Cell)
            }
            (Granularity::Row, Target::Row(row)) if row < self.size().0 => Ok(target),
            (Granularity::Row, Target::Row(_)) => Err(GameError::InvalidCoords),
            _ => Err(GameError::InvalidTarget),
        }
    }

    pub fn is_unlocked(&self, coords: Coord2) -> bool {
        self.mask[coords.to_nd_index()]
    }

    pub fn is_target_unlocked(&self, target: Target) -> bool {
        match target {
            Target::Cell(coords) => self.is_unlocked(coords),
            Target::Row(row) => self.mask.row(row.into()).iter().all(|&open| open),
        }
    }

    pub fn cell_state(&self, coords: Coord2) -> CellState {
        if self.is_unlocked(coords) {
            return CellState::Unlocked;
        }
        match &self.attempt {
            Some(attempt) if attempt.target.contains(coords) && attempt.challenge.has_won() => {
                CellState::AwaitingAnswer
            }
            _ => CellState::Locked,
        }
    }

    /// Value revealed once `coords` is unlocked.
    pub fn revealed_value(&self, coords: Coord2) -> Option<Value> {
        self.is_unlocked(coords).then(|| self.matrix[coords])
    }

    /// Hidden value a challenge for `target` is built around; rows use their
    /// first cell.
    pub fn seed_for(&self, target: Target) -> Value {
        match target {
            Target::Cell(coords) => self.matrix[coords],
            Target::Row(row) => self.matrix[(row, 0)],
        }
    }

    pub fn active(&self) -> Option<Target> {
        self.attempt.as_ref().map(|attempt| attempt.target)
    }

    pub fn attempt(&self) -> Option<&Attempt> {
        self.attempt.as_ref()
    }

    pub fn attempt_mut(&mut self) -> Option<&mut Attempt> {
        self.attempt.as_mut()
    }

    /// Makes `attempt` the active one, dropping any other attempt and its
    /// mini-game state. Re-selecting the active target keeps the current state.
    pub fn select(&mut self, attempt: Attempt) -> Result<SelectOutcome> {
        let target = self.validate_target(attempt.target)?;
        if self.is_target_unlocked(target) {
            return Err(GameError::AlreadyUnlocked);
        }
        if self.active() == Some(target) {
            return Ok(SelectOutcome::NoChange);
        }

        log::debug!("attempting {:?} with {}", target, attempt.challenge.kind());
        self.attempt = Some(attempt);
        Ok(SelectOutcome::Changed)
    }

    pub fn deselect(&mut self) -> SelectOutcome {
        match self.attempt.take() {
            Some(_) => SelectOutcome::Changed,
            None => SelectOutcome::NoChange,
        }
    }

    pub fn unlock(&mut self, target: Target) -> Result<UnlockOutcome> {
        let target = self.validate_target(target)?;
        if self.active() == Some(target) {
            self.attempt = None;
        }

        let mut changed = false;
        for coords in self.mask.iter_raster() {
            if target.contains(coords) && !self.mask[coords.to_nd_index()] {
                self.mask[coords.to_nd_index()] = true;
                self.unlocked_count += 1;
                changed = true;
            }
        }

        Ok(if !changed {
            UnlockOutcome::NoChange
        } else if self.is_complete() {
            log::debug!("grid complete");
            UnlockOutcome::Completed
        } else {
            UnlockOutcome::Unlocked
        })
    }

    pub fn is_complete(&self) -> bool {
        self.unlocked_count == Saturating(self.matrix.total_cells())
    }

    /// Locks everything again and drops the attempt in progress.
    pub fn reset(&mut self) {
        self.mask.fill(false);
        self.unlocked_count = Saturating(0);
        self.attempt = None;
    }
}
