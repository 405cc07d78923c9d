//! Tracing setup.
//!
//! The dashboard owns the terminal, so its events go to an append-only file
//! in the data directory. One-shot subcommands log to stderr instead.
//!
//!   zendash --debug                   # debug-level events
//!   RUST_LOG=zendash=trace zendash    # fine-grained control

use anyhow::{Context, Result, anyhow};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "zendash.log";

#[derive(Debug, Clone)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
}

impl LogTarget {
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::File(data_dir.join(LOG_FILE_NAME))
    }
}

/// Filter directive used when RUST_LOG is unset.
pub fn default_directive(debug: bool) -> &'static str {
    if debug || cfg!(feature = "dev-logging") {
        "zendash=debug"
    } else {
        "zendash=info"
    }
}

pub fn init(target: &LogTarget, debug: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    match target {
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory: {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_target(debug)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow!(err))
        }
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(debug)
            .compact()
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow!(err)),
    }
}
