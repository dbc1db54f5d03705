//! Tracing initialization.
//! Builds a registry from the resolved Config: optional console layer, optional
//! file layer under `log_location`, compact or JSON formatting.
//!
//! Behavior:
//! - `enable_log = false` installs nothing; events are dropped.
//! - The level comes from the config only (no RUST_LOG override).
//! - File logging is refused if any ancestor of the log file is a symlink, and
//!   the run continues with console output only.
//!
//! Implementation notes:
//! - The file layer goes through tracing_appender::non_blocking; the returned
//!   guard must be held until exit so buffered lines are flushed.

use anyhow::Result;
use chrono::Local;
use file_organizer::output as out;
use file_organizer::{Config, LogLevel, path_has_symlink_ancestor};
use std::fmt as stdfmt;
use std::fs::OpenOptions;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry, registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Local timestamp, e.g. "2024-03-01 17:04:12".
struct LocalTime;
impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

#[inline]
fn env_filter_for(lvl: LogLevel) -> EnvFilter {
    let directive = match lvl {
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warning => "warn",
        LogLevel::Error => "error",
    };
    EnvFilter::new(directive)
}

fn console_layer(json: bool) -> BoxedLayer {
    if json {
        tsfmt::layer()
            .json()
            .with_timer(LocalTime)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tsfmt::layer()
            .compact()
            .with_timer(LocalTime)
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    }
}

fn file_layer(writer: NonBlocking, json: bool) -> BoxedLayer {
    if json {
        tsfmt::layer()
            .json()
            .with_timer(LocalTime)
            .with_writer(writer)
            .boxed()
    } else {
        tsfmt::layer()
            .compact()
            .with_timer(LocalTime)
            .with_ansi(false)
            .with_writer(writer)
            .boxed()
    }
}

/// Open the log file for appending behind a non-blocking writer.
/// Prints the reason to stderr and returns None when it cannot be used.
fn maybe_open_non_blocking_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => {
            eprintln!(
                "Refusing to enable file logging: ancestor of {} is a symlink.",
                path.display()
            );
            return None;
        }
        Err(e) => {
            eprintln!("Error checking log path {} for symlinks: {}", path.display(), e);
            return None;
        }
    }

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
            None
        }
    }
}

/// Initialize tracing from the config. Returns the file writer guard, if any.
pub fn init_tracing(cfg: &Config, json: bool) -> Result<Option<WorkerGuard>> {
    if !cfg.enable_log {
        return Ok(None);
    }

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guard = None;

    if cfg.enable_console_log {
        layers.push(console_layer(json));
    }
    if cfg.enable_file_log {
        let path = cfg.log_file_path();
        match maybe_open_non_blocking_writer(&path) {
            Some((writer, g)) => {
                layers.push(file_layer(writer, json));
                guard = Some(g);
            }
            None => out::print_warn(&format!(
                "File logging to '{}' was not enabled; check that log_location is writable.",
                path.display()
            )),
        }
    }

    if layers.is_empty() {
        return Ok(guard);
    }

    registry()
        .with(layers)
        .with(env_filter_for(cfg.log_level))
        .try_init()?;
    Ok(guard)
}
