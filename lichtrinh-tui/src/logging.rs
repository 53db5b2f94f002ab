use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Where log lines go.
pub(crate) enum LogTarget<'path> {
    /// Append to a file; the terminal belongs to the UI.
    File(&'path Path),
    /// Standard error, for headless commands.
    Stderr,
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
pub(crate) fn init(level: &str, target: LogTarget<'_>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match target {
        LogTarget::Stderr => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_filter(env_filter),
            )
            .try_init()?,
        LogTarget::File(path) => {
            if let Some(parent) = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
            {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(true)
                        .with_line_number(true)
                        .with_writer(Mutex::new(file))
                        .with_filter(env_filter),
                )
                .try_init()?;
        }
    }

    tracing::debug!("logging initialized");
    Ok(())
}
