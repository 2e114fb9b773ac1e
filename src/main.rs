use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use snake_tui::game::GameConfig;
use snake_tui::modes::HumanMode;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_tui")]
#[command(version, about = "Grid snake arcade game for the terminal")]
struct Cli {
    /// JSON file with game settings; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food and start positions
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the log (the terminal is taken by the game)
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    info!("Starting snake with {:?}", config);

    let mut human_mode = HumanMode::new(config, cli.seed)?;
    human_mode.run().await
}
