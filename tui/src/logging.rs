//! File logging. The terminal belongs to the UI, so all tracing output goes
//! to `<home>/log/project-showcase.log`. `RUST_LOG` overrides the default
//! filter.

use std::fs::OpenOptions;
use std::path::Path;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const LOG_FILE: &str = "project-showcase.log";
const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber. Keep the returned guard alive until exit
/// or buffered lines are lost.
pub fn init(log_dir: &Path) -> color_eyre::Result<WorkerGuard> {
    let path = prepare_log_file(log_dir)?;

    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options.open(&path)?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false),
        )
        .try_init()?;

    Ok(guard)
}

fn prepare_log_file(log_dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(log_dir)?;
    Ok(log_dir.join(LOG_FILE))
}
