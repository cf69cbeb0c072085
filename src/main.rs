use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::game::GameConfig;
use grid_snake::modes::{AutopilotMode, HumanMode};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Deterministic grid Snake")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Grid width in cells
    #[arg(long, default_value = "30")]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value = "30")]
    height: usize,

    /// Milliseconds between two moves
    #[arg(long, default_value = "300")]
    tick_ms: u64,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Stay on the game over screen instead of resetting right away
    #[arg(long)]
    no_auto_restart: bool,

    /// Ticks to play in autopilot mode
    #[arg(long, default_value = "10000")]
    max_ticks: u64,

    /// Write logs to this file (human mode logs nothing otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Let a greedy bot play without a UI
    Autopilot,
}

fn init_tracing(mode: &Mode, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match (log_file, mode) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (None, Mode::Autopilot) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        // The TUI owns the terminal
        (None, Mode::Human) => {}
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.mode, cli.log_file.as_deref())?;

    // Create game configuration from CLI arguments
    let mut config = GameConfig::new(cli.width, cli.height)
        .with_tick_interval(cli.tick_ms)
        .with_restart_on_game_over(!cli.no_auto_restart);
    config.seed = cli.seed;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Autopilot => {
            let mut autopilot = AutopilotMode::new(config)?;
            let summary = autopilot.run(cli.max_ticks)?;
            println!(
                "ticks: {}  games: {}  high score: {}  wall: {}  self: {}  board full: {}",
                summary.ticks,
                summary.games_played,
                summary.high_score,
                summary.wall_collisions,
                summary.self_collisions,
                summary.boards_filled
            );
        }
    }

    Ok(())
}
