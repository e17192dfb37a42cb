use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Generation strategy that can optionally keep the start cell (and its neighbors) free of mines, but other than that
/// is a uniform draw without replacement.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
    start: Coord2,
    start_cell: StartCell,
}

impl RandomMineGenerator {
    pub fn new(seed: u64, start: Coord2, start_cell: StartCell) -> Self {
        Self {
            seed,
            start,
            start_cell,
        }
    }

    /// Generator without any start cell, used when mines are placed up front.
    pub fn unbiased(seed: u64) -> Self {
        Self::new(seed, (0, 0), StartCell::Random)
    }

    fn excluded_cells(&self, config: GameConfig, start_cell: StartCell) -> CellCount {
        match start_cell {
            StartCell::Random => 0,
            StartCell::SimpleSafe => 1,
            StartCell::AlwaysZero => 1 + NeighborIter::new(self.start, config.size()).count() as CellCount,
        }
    }

    /// Downgrades the requested start cell policy until enough candidate cells remain.
    fn effective_start_cell(&self, config: GameConfig) -> StartCell {
        use StartCell::*;

        let total_cells = config.total_cells();
        let fits = |start_cell| {
            config.mines + self.excluded_cells(config, start_cell) <= total_cells
        };

        match self.start_cell {
            Random => Random,
            AlwaysZero if fits(AlwaysZero) => AlwaysZero,
            AlwaysZero if fits(SimpleSafe) => {
                log::warn!("Cannot make start cell zero, fallback to simple safe");
                SimpleSafe
            }
            SimpleSafe if fits(SimpleSafe) => SimpleSafe,
            _ => {
                log::warn!("Cannot make start cell safe, fallback to random");
                Random
            }
        }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let start_cell = self.effective_start_cell(config);
        let cols = usize::from(config.cols);
        let to_coords = |index: usize| ((index / cols) as Coord, (index % cols) as Coord);

        let mut candidates: Vec<usize> = (0..config.total_cells() as usize)
            .filter(|&index| !start_cell.excludes(self.start, to_coords(index)))
            .collect();

        let wanted = (config.mines as usize).min(candidates.len());
        if wanted < config.mines as usize {
            log::warn!(
                "Board too small, requested {} mines but only {} cells are available",
                config.mines,
                candidates.len()
            );
        }

        // partial Fisher-Yates, the first `wanted` slots end up holding the mines
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in 0..wanted {
            let j = rng.random_range(i..candidates.len());
            candidates.swap(i, j);
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        for &index in &candidates[..wanted] {
            mine_mask[to_coords(index).to_nd_index()] = true;
        }

        log::debug!(
            "Placed {} mines on {}x{} board, start {:?} ({:?})",
            wanted,
            config.rows,
            config.cols,
            self.start,
            start_cell
        );
        MineLayout::from_mine_mask(mine_mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mines_of(layout: &MineLayout) -> Vec<Coord2> {
        let (rows, cols) = layout.size();
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|&coords| layout.contains_mine(coords))
            .collect()
    }

    #[test]
    fn places_exact_mine_count() {
        let config = GameConfig::new(8, 8, 20).unwrap();
        for seed in 0..32 {
            let layout = RandomMineGenerator::unbiased(seed).generate(config);
            assert_eq!(layout.mine_count(), 20);
            assert_eq!(mines_of(&layout).len(), 20);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::intermediate();
        let a = RandomMineGenerator::unbiased(7).generate(config);
        let b = RandomMineGenerator::unbiased(7).generate(config);
        assert_eq!(a, b);
    }

    #[test]
    fn always_zero_keeps_neighborhood_clear() {
        let config = GameConfig::new(5, 5, 16).unwrap();
        for seed in 0..32 {
            let layout = RandomMineGenerator::new(seed, (2, 2), StartCell::AlwaysZero).generate(config);
            assert_eq!(layout.mine_count(), 16);
            assert!(mines_of(&layout).iter().all(|&m| !within_one((2, 2), m)));
        }
    }

    #[test]
    fn always_zero_falls_back_to_simple_safe_on_small_board() {
        let config = GameConfig::new(2, 2, 1).unwrap();
        for seed in 0..16 {
            let layout = RandomMineGenerator::new(seed, (0, 0), StartCell::AlwaysZero).generate(config);
            assert_eq!(layout.mine_count(), 1);
            assert!(!layout.contains_mine((0, 0)));
        }
    }

    #[test]
    fn corner_start_needs_only_four_free_cells() {
        // 3x3 with 5 mines: a corner neighborhood is 4 cells, so the zero policy still fits
        let config = GameConfig::new(3, 3, 5).unwrap();
        let layout = RandomMineGenerator::new(3, (0, 0), StartCell::AlwaysZero).generate(config);
        let mines = mines_of(&layout);
        assert_eq!(mines, [(0, 2), (1, 2), (2, 0), (2, 1), (2, 2)]);
    }
}
