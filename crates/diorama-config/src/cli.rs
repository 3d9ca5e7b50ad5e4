//! Command-line overrides for the demo harness.

use std::path::PathBuf;

use clap::Parser;
use diorama_terrain::Seed;

use crate::DioramaConfig;

/// Diorama generator command-line arguments.
///
/// Values override the settings loaded from the session store.
#[derive(Parser, Debug, Default)]
#[command(name = "diorama", about = "Procedural diorama generator")]
pub struct CliArgs {
    /// Seed; numeric values are used as numbers, anything else as text.
    #[arg(long)]
    pub seed: Option<String>,

    /// Diorama width.
    #[arg(long)]
    pub width: Option<f32>,

    /// Diorama height.
    #[arg(long)]
    pub height: Option<f32>,

    /// Diorama depth.
    #[arg(long)]
    pub depth: Option<f32>,

    /// Biome name (temperate, desert, arctic).
    #[arg(long)]
    pub biome: Option<String>,

    /// Water level as a fraction of the height.
    #[arg(long)]
    pub water_level: Option<f32>,

    /// Disable water.
    #[arg(long)]
    pub no_water: bool,

    /// Collect debug helpers.
    #[arg(long)]
    pub debug: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Session store directory (overrides default location).
    #[arg(long)]
    pub session_dir: Option<PathBuf>,
}

impl CliArgs {
    pub fn parsed_seed(&self) -> Option<Seed> {
        self.seed.as_deref().map(|s| match s.parse::<i64>() {
            Ok(n) => Seed::Number(n),
            Err(_) => Seed::Text(s.to_string()),
        })
    }
}

impl DioramaConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.parsed_seed() {
            self.seed = seed;
        }
        if let Some(x) = args.width {
            self.bounds.x = x;
        }
        if let Some(y) = args.height {
            self.bounds.y = y;
        }
        if let Some(z) = args.depth {
            self.bounds.z = z;
        }
        if let Some(ref name) = args.biome {
            self.biome.name = name.clone();
        }
        if let Some(level) = args.water_level {
            self.water.level = level;
        }
        if args.no_water {
            self.water.enabled = false;
        }
        if args.debug {
            self.debug = true;
        }
    }
}
