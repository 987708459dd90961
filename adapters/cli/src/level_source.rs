//! Resolves the level a command operates on.

use std::{fs, path::PathBuf};

use anyhow::{bail, Context, Result};
use car_parking_core::LevelDefinition;
use car_parking_world::levels;
use clap::Args;

/// Where to load the level from. Defaults to the built-in `easy` level.
#[derive(Args, Clone, Debug, Default)]
#[group(multiple = false)]
pub(crate) struct LevelSource {
    /// Name of a built-in level.
    #[arg(long)]
    level: Option<String>,
    /// Path to a TOML level file.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Share code produced by `export`.
    #[arg(long)]
    code: Option<String>,
}

impl LevelSource {
    pub(crate) fn load(&self) -> Result<LevelDefinition> {
        if let Some(path) = &self.file {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read level file at {}", path.display()))?;
            return parse_level_toml(&contents)
                .with_context(|| format!("invalid level file {}", path.display()));
        }

        if let Some(code) = &self.code {
            return crate::level_transfer::decode(code).context("invalid share code");
        }

        let name = self.level.as_deref().unwrap_or("easy");
        match levels::by_name(name) {
            Some(level) => Ok(level),
            None => bail!("unknown built-in level `{name}`; run `car-parking levels` to list them"),
        }
    }
}

fn parse_level_toml(contents: &str) -> Result<LevelDefinition> {
    toml::from_str(contents).context("failed to parse level toml contents")
}
