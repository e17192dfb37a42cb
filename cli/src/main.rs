use std::io::Read;
use std::path::PathBuf;
use std::{fs, io};

use anyhow::{Context, Result};
use clap::Parser;
use sweeper_core::{Board, BoardView, CellCount, Coord};

use config::{FileConfig, GameSection, PlacementMode, Preset, Settings};

mod config;
mod script;

/// Replays a move script against a fresh minesweeper board and prints what the player would see.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with a `[game]` table, flags take precedence over it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    preset: Option<Preset>,

    #[arg(long)]
    rows: Option<Coord>,

    #[arg(long)]
    cols: Option<Coord>,

    #[arg(long)]
    mines: Option<CellCount>,

    #[arg(long, value_enum)]
    placement: Option<PlacementMode>,

    /// Force a seed instead of a random one
    #[arg(short, long)]
    seed: Option<u64>,

    /// Move script with one `r <row> <col>` or `f <row> <col>` per line, stdin when omitted
    script: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> GameSection {
        GameSection {
            preset: self.preset,
            rows: self.rows,
            cols: self.cols,
            mines: self.mines,
            placement: self.placement,
            seed: self.seed,
        }
    }
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::filter::LevelFilter;

    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let file = match &args.config {
        Some(path) => config::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::try_from(file.game.merge(args.overrides()))?;
    log::debug!("settings: {:?}", settings);

    let mut board = Board::new(settings.game, settings.placement, settings.seed)
        .context("Could not create board")?;

    let text = match &args.script {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Could not read script {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Could not read script from stdin")?;
            text
        }
    };

    let moves = script::parse_script(&text)?;
    let status = script::replay(&mut board, &moves)?;
    log::info!("seed {} finished as {:?}", settings.seed, status);

    print!("{}", script::render(&BoardView::from_board(&board)));
    Ok(())
}
