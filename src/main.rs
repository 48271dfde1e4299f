use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dino_tui::app;
use dino_tui::assets::Catalog;
use dino_tui::audio::{AudioSink, Silent, SynthAudio};
use dino_tui::config::{self, Config};
use dino_tui::run::RunController;
use dino_tui::storage::{HighScoreStore, JsonFileStore};

/// Jump the cacti. Space or Up to jump, Enter to start, r resets the high
/// score, q quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Config file (JSON); defaults to the platform config dir
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of obstacle1.txt .. obstacle9.txt sprites
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Seed for obstacle spawning
    #[arg(long)]
    seed: Option<u64>,

    /// Run without sound
    #[arg(long, default_value_t = false)]
    mute: bool,

    /// Clear the stored high score and exit
    #[arg(long, default_value_t = false)]
    reset_high_score: bool,

    /// Log file; defaults to the platform data dir
    #[arg(long)]
    log: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = File::create(path).with_context(|| format!("opening log {}", path.display()))?;
    let filter = EnvFilter::try_from_env("DINO_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn open_audio(config: &Config, mute: bool) -> Box<dyn AudioSink> {
    if mute {
        return Box::new(Silent);
    }
    match SynthAudio::open(config.volumes) {
        Ok(audio) => Box::new(audio),
        Err(e) => {
            warn!(error = %e, "continuing without sound");
            Box::new(Silent)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let paths = config::project_paths()?;

    init_logging(args.log.as_deref().unwrap_or(&paths.log_path))?;

    let config_path = args.config.clone().unwrap_or(paths.config_path);
    let config = Config::load(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;

    let mut store = JsonFileStore::new(paths.store_path);
    if args.reset_high_score {
        store.clear_high_score().context("clearing high score")?;
        println!("High score cleared.");
        return Ok(());
    }

    let catalog = match &args.assets {
        Some(dir) => Catalog::from_dir(dir),
        None => Catalog::builtin(),
    };
    let audio = open_audio(&config, args.mute);
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(store = %store.path().display(), best = store.high_score(), "starting");

    let world_height = config.world_height;
    app::run(world_height, move |viewport| {
        RunController::new(config, viewport, catalog, store, audio, rng)
    })
    .context("terminal loop failed")?;
    Ok(())
}
