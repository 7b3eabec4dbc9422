use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use clap::Parser;
use grid_snake::clock::FrameLimiter;
use grid_snake::config::{GameConfig, PALETTE_CLASSIC};
use grid_snake::error::AppError;
use grid_snake::game::GameSession;
use grid_snake::input::{InputSource, KeyboardInput};
use grid_snake::renderer::{draw_session, TerminalPresenter};
use grid_snake::terminal_runtime::TerminalSession;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed for apple placement; a random seed is used when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Write diagnostic logs to this file (filter with RUST_LOG).
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.as_deref() {
        init_tracing(path)?;
    }

    let config = GameConfig::default().validated()?;
    TerminalSession::install_panic_hook();

    run(&config, cli.seed)
}

fn run(config: &GameConfig, seed: Option<u64>) -> Result<(), AppError> {
    let mut terminal_session = TerminalSession::enter()?;
    let mut input = KeyboardInput::new();
    let mut limiter = FrameLimiter::new(config.frame_interval());

    let started_at = Instant::now();
    let mut session = match seed {
        Some(seed) => GameSession::new_with_seed(config, seed, started_at),
        None => GameSession::new(config, started_at),
    };
    let mut presenter = TerminalPresenter::new(
        terminal_session.terminal_mut(),
        session.grid(),
        PALETTE_CLASSIC,
    );

    loop {
        let snapshot = input.poll()?;
        session.poll(Instant::now(), snapshot);
        if session.is_terminated() {
            break;
        }

        draw_session(&mut presenter, &session)?;
        limiter.wait();
    }

    info!(
        length = session.snake().len(),
        advances = session.advances(),
        "exiting"
    );
    Ok(())
}

fn init_tracing(path: &Path) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(AppError::Subscriber)
}
