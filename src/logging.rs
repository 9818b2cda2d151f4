//! Logging setup for credo.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::Result;

/// Build an [`EnvFilter`] from a level string, falling back to `info`
/// when the string is not a valid filter directive.
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the logging system with the given configuration.
///
/// Logs to the console; when `config.file` is set, the same output is
/// also appended to that file (parent directories are created as needed).
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(&config.level);

    match &config.file {
        Some(path) => {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            let log_file = Arc::new(File::create(path)?);

            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stdout.and(log_file))
                        .with_ansi(false)
                        .with_target(true),
                )
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stdout)
                        .with_target(true),
                )
                .with(filter)
                .init();
        }
    }

    Ok(())
}

/// Initialize console-only logging at the given level (for tests and
/// development tooling).
pub fn init_console(level: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(build_filter(level))
        .init();
}
