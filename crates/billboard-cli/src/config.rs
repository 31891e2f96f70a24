//! Command-line arguments and the optional TOML config file.
//!
//! CLI flags (and their environment variables) override the config file,
//! which overrides the defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use billboard_core::stats::{RandomStats, StatsSource, ZeroStats};
use clap::{Parser, ValueEnum};
use serde::Deserialize;

const DEFAULT_CREATED_BY: &str = "Current user";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug, Default)]
#[command(name = "billboard", about = "Terminal dashboard for marketing campaigns")]
pub struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// JSON file of campaigns to browse instead of the bundled sample.
  #[arg(long, env = "BILLBOARD_DATASET", value_name = "FILE")]
  pub dataset: Option<PathBuf>,

  /// Where placeholder statistics come from.
  #[arg(long, env = "BILLBOARD_STATS", value_enum)]
  pub stats: Option<StatsMode>,

  /// Seed for random statistics, for reproducible screens.
  #[arg(long)]
  pub seed: Option<u64>,

  /// Write logs to this file (the terminal is owned by the UI).
  #[arg(long, env = "BILLBOARD_LOG", value_name = "FILE")]
  pub log_file: Option<PathBuf>,
}

/// Placeholder statistics strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatsMode {
  #[default]
  Random,
  Zero,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default, Debug)]
pub struct ConfigFile {
  #[serde(default)]
  dataset:    Option<PathBuf>,
  #[serde(default)]
  stats:      Option<StatsMode>,
  #[serde(default)]
  seed:       Option<u64>,
  #[serde(default)]
  created_by: Option<String>,
  #[serde(default)]
  log_file:   Option<PathBuf>,
}

impl ConfigFile {
  pub fn load(path: &Path) -> Result<Self> {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")
  }
}

// ─── Resolved settings ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
  pub dataset:    Option<PathBuf>,
  pub stats:      StatsMode,
  pub seed:       Option<u64>,
  /// Recorded as the author of campaigns created in this session.
  pub created_by: String,
  pub log_file:   Option<PathBuf>,
}

impl Settings {
  pub fn resolve(args: Args, file: ConfigFile) -> Self {
    Self {
      dataset:    args.dataset.or(file.dataset),
      stats:      args.stats.or(file.stats).unwrap_or_default(),
      seed:       args.seed.or(file.seed),
      created_by: file
        .created_by
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CREATED_BY.to_string()),
      log_file:   args.log_file.or(file.log_file),
    }
  }

  pub fn stats_source(&self) -> Box<dyn StatsSource> {
    match (self.stats, self.seed) {
      (StatsMode::Zero, _) => Box::new(ZeroStats),
      (StatsMode::Random, Some(seed)) => Box::new(RandomStats::seeded(seed)),
      (StatsMode::Random, None) => Box::new(RandomStats::from_entropy()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flags_override_file() {
    let args = Args::try_parse_from([
      "billboard",
      "--stats",
      "zero",
      "--dataset",
      "cli.json",
    ])
    .unwrap();
    let file: ConfigFile = toml::from_str(
      r#"
        dataset = "file.json"
        stats = "random"
        seed = 42
      "#,
    )
    .unwrap();

    let settings = Settings::resolve(args, file);
    assert_eq!(settings.dataset, Some(PathBuf::from("cli.json")));
    assert_eq!(settings.stats, StatsMode::Zero);
    assert_eq!(settings.seed, Some(42));
  }

  #[test]
  fn defaults_apply_without_file() {
    let settings = Settings::resolve(Args::default(), ConfigFile::default());
    assert_eq!(settings.stats, StatsMode::Random);
    assert_eq!(settings.created_by, DEFAULT_CREATED_BY);
    assert_eq!(settings.dataset, None);
  }

  #[test]
  fn blank_author_falls_back_to_default() {
    let file: ConfigFile = toml::from_str(r#"created_by = "  ""#).unwrap();
    let settings = Settings::resolve(Args::default(), file);
    assert_eq!(settings.created_by, DEFAULT_CREATED_BY);
  }
}
