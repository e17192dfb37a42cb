use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a renderer needs to draw a board, without access to hidden mines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub status: GameStatus,
    pub mines_left: i64,
    pub cells: Array2<CellView>,
}

impl BoardView {
    pub fn from_board(board: &Board) -> Self {
        let size = board.size();
        let mut cells = Array2::from_elem(size.to_nd_index(), CellView::Hidden);
        for cell in board.cells() {
            cells[cell.coords().to_nd_index()] = cell.view();
        }

        Self {
            size,
            status: board.status(),
            mines_left: board.remaining_mines(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<CellView> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// Cells the player still has to deal with, flagged ones included.
    pub fn unrevealed_count(&self) -> CellCount {
        self.cells.iter().filter(|cell| cell.is_unrevealed()).count() as CellCount
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = impl Iterator<Item = CellView> + '_> + '_ {
        self.cells.rows().into_iter().map(|row| row.into_iter().copied())
    }
}
