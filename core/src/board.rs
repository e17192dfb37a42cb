use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Grid state for one game.
///
/// The status is never stored: it is derived from the counters below, which are only touched in the same step that
/// flips the cells they count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    placement: Placement,
    seed: u64,
    cells: Array2<Cell>,
    mines_placed: bool,
    revealed_safe: CellCount,
    flagged: CellCount,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Creates an untouched board. With [`Placement::Eager`] the mines are drawn right away from `seed`.
    pub fn new(config: GameConfig, placement: Placement, seed: u64) -> Result<Self> {
        let mut board = Self::blank(config, placement, seed)?;

        if placement == Placement::Eager {
            let layout = RandomMineGenerator::unbiased(seed).generate(config);
            board.apply_layout(&layout);
        }

        Ok(board)
    }

    pub fn initialize(
        rows: Coord,
        cols: Coord,
        mines: CellCount,
        placement: Placement,
        seed: u64,
    ) -> Result<Self> {
        Self::new(GameConfig::new(rows, cols, mines)?, placement, seed)
    }

    /// Board with a fixed mine layout, as if placed eagerly.
    pub fn from_mine_layout(layout: &MineLayout) -> Result<Self> {
        let mut board = Self::blank(layout.game_config(), Placement::Eager, 0)?;
        board.apply_layout(layout);
        Ok(board)
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        Self::from_mine_layout(&MineLayout::from_mine_coords(size, mine_coords)?)
    }

    /// Starts over with the same dimensions, mine count and placement mode.
    ///
    /// Fails without touching the board when its config is invalid, which can only happen to a deserialized board.
    pub fn reset(&mut self, seed: u64) -> Result<()> {
        log::debug!("Resetting {}x{} board", self.config.rows, self.config.cols);
        *self = Self::new(self.config, self.placement, seed)?;
        Ok(())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_safe + CellCount::from(self.triggered_mine.is_some())
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn status(&self) -> GameStatus {
        if self.triggered_mine.is_some() {
            GameStatus::Lost
        } else if self.revealed_safe == self.config.safe_cells() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_finished()
    }

    /// Mines minus flags, negative when the player has over-flagged.
    pub fn remaining_mines(&self) -> i64 {
        i64::from(self.config.mines) - i64::from(self.flagged)
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn view_at(&self, coords: Coord2) -> Result<CellView> {
        self.cell_at(coords).map(|cell| cell.view())
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.config.size())
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.config.validate_coords(coords)?;
        if self.is_finished() {
            return Ok(NoChange);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed {
            return Ok(NoChange);
        }

        cell.is_flagged = !cell.is_flagged;
        if cell.is_flagged {
            self.flagged += 1;
        } else {
            self.flagged -= 1;
        }
        Ok(Changed)
    }

    /// Reveals a cell, flood-filling through zero cells.
    ///
    /// Revealed or flagged targets and finished games are left untouched. On a deferred board the first effective
    /// reveal places the mines first, keeping the target and its neighbors clear whenever the board is big enough.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;

        let cell = self.cells[coords.to_nd_index()];
        if self.is_finished() || cell.is_revealed || cell.is_flagged {
            return Ok(RevealOutcome {
                opened: 0,
                status: self.status(),
            });
        }

        if !self.mines_placed {
            let layout = RandomMineGenerator::new(self.seed, coords, StartCell::AlwaysZero)
                .generate(self.config);
            self.apply_layout(&layout);
        }

        let opened = self.reveal_cell(coords);
        let status = self.status();
        if status.is_finished() {
            log::debug!("Game ended at {:?}: {:?}", coords, status);
        }
        Ok(RevealOutcome { opened, status })
    }

    fn reveal_cell(&mut self, coords: Coord2) -> CellCount {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.is_revealed = true;
        let (is_mine, adjacent_mines) = (cell.is_mine, cell.adjacent_mines);

        if is_mine {
            self.triggered_mine = Some(coords);
            return 1;
        }

        self.revealed_safe += 1;
        log::debug!("Reveal cell at {:?}, mine count: {}", coords, adjacent_mines);
        if adjacent_mines != 0 {
            return 1;
        }

        let mut opened = 1;
        let mut to_visit: VecDeque<Coord2> = self.hidden_neighbors(coords).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            coords,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            // queued more than once, or flagged
            if cell.is_revealed || cell.is_flagged {
                continue;
            }
            debug_assert!(!cell.is_mine, "flood fill reached a mine at {visit_coords:?}");

            cell.is_revealed = true;
            let visit_adjacent_mines = cell.adjacent_mines;
            self.revealed_safe += 1;
            opened += 1;
            log::trace!(
                "Flood revealed cell at {:?}, mine count: {}",
                visit_coords,
                visit_adjacent_mines
            );

            if visit_adjacent_mines == 0 {
                to_visit.extend(self.hidden_neighbors(visit_coords));
            }
        }

        opened
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.neighbors(coords).filter(|&pos| {
            let cell = &self.cells[pos.to_nd_index()];
            !cell.is_revealed && !cell.is_flagged
        })
    }

    fn blank(config: GameConfig, placement: Placement, seed: u64) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            placement,
            seed,
            cells: Array2::from_shape_fn(config.size().to_nd_index(), |(row, col)| {
                Cell::new((row as Coord, col as Coord))
            }),
            mines_placed: false,
            revealed_safe: 0,
            flagged: 0,
            triggered_mine: None,
        })
    }

    /// Copies mines from `layout` and computes every adjacency count once.
    fn apply_layout(&mut self, layout: &MineLayout) {
        for cell in self.cells.iter_mut() {
            let coords = cell.coords();
            cell.is_mine = layout.contains_mine(coords);
            cell.adjacent_mines = if cell.is_mine {
                0
            } else {
                layout.adjacent_mine_count(coords)
            };
        }
        self.mines_placed = true;
    }
}
