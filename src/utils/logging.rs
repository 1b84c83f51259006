//! Structured logging setup.
//!
//! Installs a global `tracing-subscriber` fmt subscriber from a [`LoggingConfig`].
//! `RUST_LOG` wins over the configured level when set. Calling [`init_logging`]
//! more than once, or after the host application installed its own subscriber,
//! is a no-op.

use crate::config::LoggingConfig;
use crate::error::{ProtocolError, Result};
use std::fs::OpenOptions;
use std::sync::{Mutex, OnceLock};
use tracing::{debug, info};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

static INSTALLED: OnceLock<()> = OnceLock::new();

type InitResult = std::result::Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

/// Install the global subscriber described by `config`.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    if config.log_to_file && config.log_file_path.is_none() {
        return Err(ProtocolError::ConfigError(
            "log_file_path must be specified when log_to_file is true".into(),
        ));
    }
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.as_str().to_ascii_lowercase()))
        .map_err(|e| ProtocolError::ConfigError(format!("Invalid log filter: {e}")))?;

    let file = match config.log_file_path.as_deref().filter(|_| config.log_to_file) {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| ProtocolError::ConfigError(format!("Failed to open log file: {e}")))?,
        ),
        None => None,
    };

    let result = match (config.log_to_console, file) {
        (true, Some(file)) => install(
            filter,
            config.json_format,
            false,
            std::io::stderr.and(Mutex::new(file)),
        ),
        (false, Some(file)) => install(filter, config.json_format, false, Mutex::new(file)),
        (_, None) => install(filter, config.json_format, true, std::io::stderr),
    };

    if let Err(e) = result {
        // Someone else owns the global dispatcher; leave theirs in place.
        debug!(error = %e, "Global subscriber already installed");
    }
    let _ = INSTALLED.set(());

    info!(app = %config.app_name, level = %config.log_level, "Logging initialized");
    Ok(())
}

fn install<W>(filter: EnvFilter, json: bool, ansi: bool, writer: W) -> InitResult
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_writer(writer);
    if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}
