//! `tracing` subscriber setup shared by the CLI and the TUI.
//!
//! `RUST_LOG` takes precedence over the configured level.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("open log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("install subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Log to stderr.
pub fn init_stderr(level: &str) -> Result<(), LoggingError> {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()?;
    tracing::debug!(level, "logging initialized");
    Ok(())
}

/// Log to an append-only file. Used where stderr belongs to a terminal UI.
pub fn init_file(level: &str, path: &Path) -> Result<(), LoggingError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()?;
    tracing::debug!(level, path = %path.display(), "logging initialized");
    Ok(())
}
