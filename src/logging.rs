//! Tracing initialization for programs embedding vfs_move.
//! Builds a subscriber with an EnvFilter derived from `LogLevel`, compact or JSON
//! output on stdout, and an optional non-blocking file layer.
//!
//! File logging is refused if any ancestor of the log path is a symlink; the
//! subscriber is then installed with stdout only.

use anyhow::{Context, Result};
use chrono::Local;
use std::fmt as stdfmt;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::config::{path_has_symlink_ancestor, Config, LogLevel};
use crate::platform::open_log_file_secure_append;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// DD/MM/YY HH:MM:SS in local time.
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

pub(crate) fn level_filter(lvl: &LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::INFO,
        LogLevel::Info => LevelFilter::DEBUG,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

fn env_filter(lvl: &LogLevel) -> EnvFilter {
    EnvFilter::default().add_directive(level_filter(lvl).into())
}

fn fmt_layer(json: bool, writer: Option<NonBlocking>) -> BoxedLayer {
    let base = tsfmt::layer()
        .with_timer(LocalHumanTime)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(true);
    match (json, writer) {
        (true, Some(w)) => base.json().with_writer(w).boxed(),
        (true, None) => base.json().boxed(),
        (false, Some(w)) => base.compact().with_writer(w).boxed(),
        (false, None) => base.compact().boxed(),
    }
}

/// Open a non-blocking appender for `path`, or `None` (with a reason on stderr).
fn open_non_blocking_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(false) => {}
        Ok(true) => {
            eprintln!(
                "Refusing to enable file logging: ancestor of {} is a symlink; proceeding without file logging.",
                path.display()
            );
            return None;
        }
        Err(e) => {
            eprintln!(
                "Error checking log path {} for symlinks: {e}; proceeding without file logging.",
                path.display()
            );
            return None;
        }
    }
    match open_log_file_secure_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            eprintln!("Failed to open log file {}: {e}", path.display());
            None
        }
    }
}

/// Install the global subscriber. Returns the appender guard when a log file is in
/// use; hold it until shutdown so buffered lines get flushed.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(lvl: &LogLevel, log_file: Option<&Path>, json: bool) -> Result<Option<WorkerGuard>> {
    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(json, None)];
    let mut guard = None;
    if let Some((writer, g)) = log_file.and_then(open_non_blocking_writer) {
        layers.push(fmt_layer(json, Some(writer)));
        guard = Some(g);
    }
    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter(lvl))
        .try_init()
        .context("install tracing subscriber")?;
    Ok(guard)
}

/// `init_tracing` driven by the logging fields of a `Config`.
pub fn init_tracing_from_config(cfg: &Config) -> Result<Option<WorkerGuard>> {
    init_tracing(&cfg.log_level, cfg.log_file.as_deref(), cfg.log_json)
}
