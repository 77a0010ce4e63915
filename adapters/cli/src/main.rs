#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the arena survival simulation headlessly.

mod session;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use arena_survival_core::{ArenaRect, Settings, Sound};
use clap::Parser;

use crate::session::{RunLimits, RunSummary};

/// Runs arena survival floors with an autopilot player and prints a summary.
#[derive(Debug, Parser)]
#[command(name = "arena-survival", version)]
struct CliArgs {
    /// Root seed of the run; overrides the seed of the configuration file.
    #[arg(long)]
    seed: Option<u64>,
    /// Floors to clear before stopping.
    #[arg(long, default_value_t = 3)]
    floors: u32,
    /// Frames to simulate at most.
    #[arg(long, default_value_t = 216_000)]
    max_ticks: u64,
    /// TOML settings file; every omitted field keeps its default.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Arena width in arena units.
    #[arg(long, default_value_t = 1600.0)]
    width: f32,
    /// Arena height in arena units.
    #[arg(long, default_value_t = 1200.0)]
    height: f32,
}

/// Entry point for the arena survival command-line interface.
fn main() -> Result<()> {
    let _ = env_logger::Builder::from_default_env().try_init();
    let args = CliArgs::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    log::info!(
        "running up to {} floors with seed {:#x}",
        args.floors,
        settings.seed
    );

    let limits = RunLimits {
        floors: args.floors,
        max_ticks: args.max_ticks,
    };
    let summary = session::run(settings, ArenaRect::new(args.width, args.height), limits)?;
    print_summary(&summary);
    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings from {}", path.display()))?;
    Settings::from_toml_str(&contents)
        .with_context(|| format!("invalid settings in {}", path.display()))
}

fn print_summary(summary: &RunSummary) {
    let outcome = if summary.player_died {
        "player died"
    } else {
        "player survived"
    };
    println!("{outcome} after {} frames", summary.frames);
    println!("floors cleared: {}", summary.floors_cleared);
    println!("enemies defeated: {}", summary.kills);
    println!("player health: {:.1}", summary.player_health);
    for sound in [
        Sound::WaveStart,
        Sound::BossSpawn,
        Sound::BossDivision,
        Sound::BossRage,
        Sound::PlayerHurt,
        Sound::Explosion,
    ] {
        println!("{sound:?}: {}", summary.sounds.count(sound));
    }
}
