use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use sweeper_core::{CellCount, Coord, GameConfig, Placement};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    pub const fn game_config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::beginner(),
            Self::Intermediate => GameConfig::intermediate(),
            Self::Expert => GameConfig::expert(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    Eager,
    Deferred,
}

impl From<PlacementMode> for Placement {
    fn from(mode: PlacementMode) -> Self {
        match mode {
            PlacementMode::Eager => Placement::Eager,
            PlacementMode::Deferred => Placement::Deferred,
        }
    }
}

/// Contents of a `--config` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub game: GameSection,
}

/// Partial game settings, every field optional so file values and flags can be layered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSection {
    pub preset: Option<Preset>,
    pub rows: Option<Coord>,
    pub cols: Option<Coord>,
    pub mines: Option<CellCount>,
    pub placement: Option<PlacementMode>,
    pub seed: Option<u64>,
}

impl GameSection {
    /// Fields set in `overrides` win over the ones in `self`.
    pub fn merge(self, overrides: GameSection) -> GameSection {
        GameSection {
            preset: overrides.preset.or(self.preset),
            rows: overrides.rows.or(self.rows),
            cols: overrides.cols.or(self.cols),
            mines: overrides.mines.or(self.mines),
            placement: overrides.placement.or(self.placement),
            seed: overrides.seed.or(self.seed),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub game: GameConfig,
    pub placement: Placement,
    pub seed: u64,
}

impl TryFrom<GameSection> for Settings {
    type Error = anyhow::Error;

    fn try_from(section: GameSection) -> Result<Self> {
        let base = section.preset.unwrap_or(Preset::Beginner).game_config();
        let game = GameConfig::new(
            section.rows.unwrap_or(base.rows),
            section.cols.unwrap_or(base.cols),
            section.mines.unwrap_or(base.mines),
        )
        .context("invalid board configuration")?;

        Ok(Self {
            game,
            placement: section.placement.map(Placement::from).unwrap_or_default(),
            seed: section.seed.unwrap_or_else(rand::random),
        })
    }
}

pub fn load(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Could not parse config file {}", path.display()))
}
