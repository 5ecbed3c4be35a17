use anyhow::{Context, Result, anyhow};
use clap::Parser;
use heart_snake::game::{GameConfig, GameEngine};
use heart_snake::modes::HumanMode;
use heart_snake::storage::FileHighScoreStore;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "heart_snake")]
#[command(version, about = "Snake in the terminal, with hearts")]
struct Cli {
    /// Grid width (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// JSON file with game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the best score is kept between runs
    #[arg(long, default_value = "snake_high_score.json")]
    high_score_file: PathBuf,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (the terminal itself is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    if cli.width.is_some() || cli.height.is_some() {
        let width = cli.width.unwrap_or(config.grid_width);
        let height = cli.height.unwrap_or(config.grid_height);
        config = config.with_grid(width, height);
    }

    config
        .validate()
        .map_err(|e| anyhow!("Invalid game config: {}", e))?;

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = load_config(&cli)?;
    tracing::info!(?config, seed = ?cli.seed, "configuration loaded");

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let engine = GameEngine::with_rng(config, rng);
    let store = FileHighScoreStore::new(cli.high_score_file);

    let mut human_mode = HumanMode::new(engine, store);
    human_mode.run().await?;

    Ok(())
}
