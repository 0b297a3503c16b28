//! Logging
//!
//! File-backed tracing subscriber. The terminal belongs to the TUI, so
//! nothing is written to stdout or stderr. Secrets are never logged.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins when set (e.g. `RUST_LOG=vaultinator=debug`).
const DEFAULT_FILTER: &str = "vaultinator=info";

pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(io::Error::other)
}
