//! Tracing setup for the command line.
//!
//! Events go to stderr, filtered by `RUST_LOG` or else by `-v`/`--quiet`.
//! With `debug = true` in the settings a daily-rotated file log is written to
//! the platform data directory as well.

use std::path::PathBuf;

use pdm_conf::Settings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;

use crate::args::GlobalArgs;

const LOG_FILE_PREFIX: &str = "pdm.log";

/// Install the global subscriber.
///
/// Returns a `WorkerGuard` when file logging is on; it must be kept alive for
/// buffered lines to reach the file.
pub fn init_tracing(args: &GlobalArgs, settings: &Settings) -> Option<WorkerGuard> {
    let stderr_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(stderr_filter);

    let (file_layer, guard) = match settings.debug.then(log_dir).flatten() {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    Registry::default()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

fn log_dir() -> Option<PathBuf> {
    pdm_conf::project_dirs().map(|dirs| dirs.data_local_dir().join("logs"))
}
