//! Opt-in logging setup for applications built on this library.
//!
//! The helpers only emit `tracing` events; nothing is printed unless the
//! consuming application installs a subscriber, either its own or one of these.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,spider_util=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Opens `path` for appending, creating it if needed. Events from concurrent
/// threads are serialized through the mutex.
fn append_writer(path: &Path) -> Result<Mutex<fs::File>> {
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    Ok(Mutex::new(file))
}

/// Initialize structured logging to `~/.local/state/spider-util/spider-util.log`.
///
/// Returns Err when the state dir is unwritable or a global subscriber is
/// already installed, so the caller can fall back to [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("spider-util")?;
    let log_file_path = xdg_dirs.place_state_file("spider-util.log")?;
    init_logging_to(&log_file_path)
}

/// Like [`init_logging`], with an explicit log file path.
pub fn init_logging_to(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(append_writer(path)?)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {}", e))?;

    tracing::info!("spider-util logging initialized at {}", path.display());
    Ok(())
}

/// Initialize logging to stderr only. Does nothing if a subscriber is already set.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
