//! `tracing` subscriber setup.
//!
//! CLI commands log to stderr; the TUI logs to a file because it owns the
//! terminal. `RUST_LOG` overrides the default level in both cases.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, EXIT_LOCAL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    fn default_level(&self) -> &'static str {
        match self {
            LogTarget::Stderr => "warn",
            LogTarget::File(_) => "info",
        }
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(target: &LogTarget) -> Result<(), AppError> {
    let level = target.default_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={level}", env!("CARGO_PKG_NAME"))));

    let installed = match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
    };
    if installed.is_ok() {
        tracing::debug!(?target, "logging initialised");
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<std::fs::File, AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::new(
                EXIT_LOCAL,
                format!("Failed to create log directory {}: {e}", parent.display()),
            )
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::new(EXIT_LOCAL, format!("Failed to open log file {}: {e}", path.display())))
}
