use std::error::Error as StdError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejected tunables in [`crate::config::GameConfig`].
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("field {axis} {extent} is not a positive multiple of cell size {cell_size}")]
    MisalignedField {
        axis: &'static str,
        extent: u32,
        cell_size: u32,
    },
    #[error("frame rate must be non-zero")]
    ZeroFrameRate,
    #[error("relocation attempt limit must be non-zero")]
    ZeroRelocationAttempts,
}

/// Fatal startup and runtime failures surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot install log subscriber: {0}")]
    Subscriber(Box<dyn StdError + Send + Sync + 'static>),
}
