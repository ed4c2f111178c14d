use serde::{Deserialize, Serialize};

/// Player-visible progress of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Locked,
    /// Challenge won, numeric answer still missing.
    AwaitingAnswer,
    Unlocked,
}

impl CellState {
    pub const fn is_unlocked(self) -> bool {
        matches!(self, Self::Unlocked)
    }

    pub const fn is_locked(self) -> bool {
        !self.is_unlocked()
    }
}
