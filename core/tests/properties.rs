use std::collections::{BTreeSet, VecDeque};

use rand::prelude::*;
use sweeper_core::*;

const CONFIGS: [(Coord, Coord, CellCount); 7] = [
    (2, 2, 1),
    (2, 2, 3),
    (3, 3, 4),
    (1, 10, 3),
    (9, 9, 10),
    (16, 16, 40),
    (16, 30, 99),
];

fn all_coords((rows, cols): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
}

/// Neighbor count computed from scratch, independent of the engine's iterator.
fn brute_force_adjacent(board: &Board, (row, col): Coord2) -> u8 {
    let (rows, cols) = board.size();
    let mut count = 0;
    for d_row in -1i32..=1 {
        for d_col in -1i32..=1 {
            if d_row == 0 && d_col == 0 {
                continue;
            }
            let r = i32::from(row) + d_row;
            let c = i32::from(col) + d_col;
            if r < 0 || c < 0 || r >= i32::from(rows) || c >= i32::from(cols) {
                continue;
            }
            if board.cell_at((r as Coord, c as Coord)).unwrap().is_mine {
                count += 1;
            }
        }
    }
    count
}

fn revealed_set(board: &Board) -> BTreeSet<Coord2> {
    board
        .cells()
        .filter(|cell| cell.is_revealed)
        .map(Cell::coords)
        .collect()
}

/// Status recomputed from a full scan of the grid.
fn scanned_status(board: &Board) -> GameStatus {
    if board.cells().any(|cell| cell.is_revealed && cell.is_mine) {
        GameStatus::Lost
    } else if board.cells().all(|cell| cell.is_mine || cell.is_revealed) {
        GameStatus::Won
    } else {
        GameStatus::InProgress
    }
}

#[test]
fn eager_boards_have_exact_mine_count_and_correct_adjacency() {
    for (rows, cols, mines) in CONFIGS {
        for seed in 0..20 {
            let board = Board::initialize(rows, cols, mines, Placement::Eager, seed).unwrap();

            let placed = board.cells().filter(|cell| cell.is_mine).count();
            assert_eq!(placed as CellCount, mines, "{rows}x{cols} seed {seed}");

            for coords in all_coords(board.size()) {
                let cell = board.cell_at(coords).unwrap();
                if !cell.is_mine {
                    assert_eq!(cell.adjacent_mines, brute_force_adjacent(&board, coords));
                }
            }
        }
    }
}

#[test]
fn first_reveal_on_deferred_board_is_always_safe() {
    for (rows, cols, mines) in CONFIGS {
        for seed in 0..10 {
            let start = ((seed as Coord * 7) % rows, (seed as Coord * 3) % cols);
            let mut board =
                Board::initialize(rows, cols, mines, Placement::Deferred, seed).unwrap();

            let outcome = board.reveal(start).unwrap();
            assert_ne!(outcome.status, GameStatus::Lost);

            let placed = board.cells().filter(|cell| cell.is_mine).count();
            assert_eq!(placed as CellCount, mines);

            let neighborhood = 1 + board.neighbors(start).count() as CellCount;
            let start_cell = board.cell_at(start).unwrap();
            assert!(start_cell.is_revealed && !start_cell.is_mine);
            if mines + neighborhood <= board.config().total_cells() {
                assert_eq!(start_cell.adjacent_mines, 0);
            }
            assert_eq!(start_cell.adjacent_mines, brute_force_adjacent(&board, start));
        }
    }
}

#[test]
fn flood_fill_opens_exactly_the_zero_region_and_its_border() {
    for seed in 0..30 {
        let mut board = Board::initialize(16, 16, 30, Placement::Eager, seed).unwrap();
        let Some(start) = all_coords(board.size()).find(|&coords| {
            let cell = board.cell_at(coords).unwrap();
            !cell.is_mine && cell.adjacent_mines == 0
        }) else {
            continue;
        };

        // expected region via an independent breadth-first search over the cells
        let mut expected = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(coords) = queue.pop_front() {
            if board.cell_at(coords).unwrap().adjacent_mines != 0 {
                continue;
            }
            for next in board.neighbors(coords) {
                if expected.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        let outcome = board.reveal(start).unwrap();

        assert_eq!(revealed_set(&board), expected);
        assert_eq!(outcome.opened as usize, expected.len());
    }
}

#[test]
fn random_play_keeps_invariants() {
    for (rows, cols, mines) in CONFIGS {
        for seed in 0..10 {
            let placement = if seed % 2 == 0 {
                Placement::Deferred
            } else {
                Placement::Eager
            };
            let mut board = Board::initialize(rows, cols, mines, placement, seed).unwrap();
            let mut rng = SmallRng::seed_from_u64(seed);

            for _ in 0..200 {
                let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
                let before = board.clone();
                let revealed_before = revealed_set(&board);

                if rng.random_range(0..4) == 0 {
                    let outcome = board.toggle_flag(coords).unwrap();
                    let was = before.cell_at(coords).unwrap();
                    if was.is_revealed {
                        assert_eq!(outcome, MarkOutcome::NoChange);
                    }
                    assert_eq!(board.status(), before.status());
                } else {
                    let was = before.cell_at(coords).unwrap();
                    let outcome = board.reveal(coords).unwrap();
                    if was.is_flagged {
                        assert!(!outcome.has_update());
                        assert!(!board.cell_at(coords).unwrap().is_revealed);
                    }
                    assert_eq!(outcome.status, board.status());
                }

                assert!(revealed_before.is_subset(&revealed_set(&board)));
                assert_eq!(board.status(), scanned_status(&board));
                let flags = board.cells().filter(|cell| cell.is_flagged).count() as i64;
                assert_eq!(board.remaining_mines(), i64::from(mines) - flags);

                if board.is_finished() {
                    break;
                }
            }
        }
    }
}

#[test]
fn revealing_every_safe_cell_wins() {
    for seed in 0..10 {
        let mut board = Board::initialize(9, 9, 10, Placement::Eager, seed).unwrap();
        let safe: Vec<_> = all_coords(board.size())
            .filter(|&coords| !board.cell_at(coords).unwrap().is_mine)
            .collect();

        for (i, &coords) in safe.iter().enumerate() {
            let status = board.reveal(coords).unwrap().status;
            if i + 1 < safe.len() && status == GameStatus::Won {
                // flood fill may finish the board early
                assert!(safe.iter().all(|&c| board.cell_at(c).unwrap().is_revealed));
                break;
            }
        }

        assert_eq!(board.status(), GameStatus::Won);
        assert_eq!(board.revealed_count(), board.config().safe_cells());
    }
}

#[test]
fn single_mine_corner_board_is_won_in_one_move() {
    let mut board = Board::from_mine_coords((5, 5), &[(4, 4)]).unwrap();

    let outcome = board.reveal((0, 0)).unwrap();

    assert_eq!(outcome.status, GameStatus::Won);
    assert_eq!(revealed_set(&board).len(), 24);
}
