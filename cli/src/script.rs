use std::fmt::Write;
use std::str::FromStr;

use anyhow::{Context, Result, anyhow, bail};
use sweeper_core::{Board, BoardView, CellView, Coord, Coord2, GameStatus};

/// One player action from a move script.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Move {
    Reveal(Coord2),
    Flag(Coord2),
}

impl FromStr for Move {
    type Err = anyhow::Error;

    /// Accepts `r <row> <col>` or `f <row> <col>`.
    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let kind = parts.next().ok_or_else(|| anyhow!("empty move"))?;
        let mut coord = |axis: &str| -> Result<Coord> {
            parts
                .next()
                .ok_or_else(|| anyhow!("missing {axis}"))?
                .parse()
                .with_context(|| format!("bad {axis}"))
        };
        let coords = (coord("row")?, coord("col")?);
        if let Some(extra) = parts.next() {
            bail!("unexpected trailing {extra:?}");
        }

        match kind {
            "r" | "reveal" => Ok(Move::Reveal(coords)),
            "f" | "flag" => Ok(Move::Flag(coords)),
            other => bail!("unknown move kind {other:?}"),
        }
    }
}

/// Parses a script, skipping blank lines and `#` comments.
pub fn parse_script(text: &str) -> Result<Vec<Move>> {
    text.lines()
        .enumerate()
        .map(|(n, line)| (n + 1, line.split('#').next().unwrap_or_default().trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(n, line)| line.parse().with_context(|| format!("line {n}: {line:?}")))
        .collect()
}

/// Applies moves in order, stopping at the first one after the game ends.
pub fn replay(board: &mut Board, moves: &[Move]) -> Result<GameStatus> {
    for (i, &action) in moves.iter().enumerate() {
        if board.is_finished() {
            log::info!(
                "Game already over, skipping {} remaining moves",
                moves.len() - i
            );
            break;
        }

        match action {
            Move::Reveal(coords) => {
                let outcome = board
                    .reveal(coords)
                    .with_context(|| format!("move {}: reveal {coords:?}", i + 1))?;
                log::info!(
                    "reveal {:?}: opened {} cells, {:?}",
                    coords,
                    outcome.opened,
                    outcome.status
                );
            }
            Move::Flag(coords) => {
                let outcome = board
                    .toggle_flag(coords)
                    .with_context(|| format!("move {}: flag {coords:?}", i + 1))?;
                log::info!("flag {:?}: {:?}", coords, outcome);
            }
        }
    }

    Ok(board.status())
}

/// Plain text dump of what the player can see.
pub fn render(view: &BoardView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "status: {:?}, mines left: {}, unrevealed: {}",
        view.status,
        view.mines_left,
        view.unrevealed_count()
    );
    for row in view.iter_rows() {
        for cell in row {
            out.push(match cell {
                CellView::Hidden => '#',
                CellView::Flagged => 'F',
                CellView::Exploded => '*',
                CellView::Revealed(0) => '.',
                CellView::Revealed(n) => char::from(b'0' + n),
            });
        }
        out.push('\n');
    }
    out
}
