use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gridsnake::game::{GameConfig, Variant};
use gridsnake::modes::{DemoMode, HumanMode};
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "gridsnake")]
#[command(version, about = "Snake variants on a tiny actor grid, in the terminal")]
struct Cli {
    /// Rule set to play
    #[arg(long, value_enum, default_value = "classic")]
    variant: Variant,

    /// Read the full game configuration from a JSON file instead of a preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<i32>,

    /// Grid height
    #[arg(long)]
    height: Option<i32>,

    /// Starting level (1-10); shapes the Nibbles rules
    #[arg(long)]
    level: Option<u32>,

    /// Tick period in milliseconds
    #[arg(long)]
    period_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where log records go; the terminal belongs to the game
    #[arg(long, default_value = "gridsnake.log")]
    log_file: PathBuf,

    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    /// Preset or file, then the command-line overrides on top
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::for_variant(self.variant),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(level) = self.level {
            config.apply_level(level);
        }
        if let Some(period_ms) = self.period_ms {
            config.period_ms = period_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = cli.game_config()?;
    info!(
        "starting {:?} on a {}x{} grid",
        config.variant, config.grid_width, config.grid_height
    );

    // Dispatch to appropriate mode
    match config.variant {
        Variant::Demo => {
            let mut demo_mode = DemoMode::new(&config)?;
            demo_mode.run().await
        }
        _ => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level.into(), Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let result = run(&cli).await;
    if let Err(err) = &result {
        error!("{err:#}");
    }
    result
}
