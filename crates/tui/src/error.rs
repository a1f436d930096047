//! Errors that end the terminal session. Scan problems never reach this
//! type; the engine recovers them on the Scan screen.
use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid `{key}` setting: {message}")]
    Setting { key: &'static str, message: String },
    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("terminal error: {0}")]
    Terminal(String),
}
