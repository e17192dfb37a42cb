use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;

mod random;

pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// How much of the start cell's surroundings is kept free of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartCell {
    /// No exclusion, every cell is a candidate.
    Random,
    /// Only the start cell is kept free.
    SimpleSafe,
    /// The start cell and all of its neighbors are kept free.
    AlwaysZero,
}

impl StartCell {
    /// Whether a mine at `coords` is forbidden for a game starting at `start`.
    pub const fn excludes(self, start: Coord2, coords: Coord2) -> bool {
        match self {
            Self::Random => false,
            Self::SimpleSafe => start.0 == coords.0 && start.1 == coords.1,
            Self::AlwaysZero => within_one(start, coords),
        }
    }
}
