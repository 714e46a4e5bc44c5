//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

pub const LOG_ENV: &str = "RIKKI_LOG";

/// Initialize the logging subsystem
///
/// The terminal belongs to the UI, so logs go to a daily-rolling file under
/// `~/.local/share/rikki/logs/`. Level is controlled by `RIKKI_LOG`.
///
/// # Examples
/// ```bash
/// RIKKI_LOG=debug rikki
/// RIKKI_LOG=rikki_core=trace rikki --remote
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "rikki.log");

    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("rikki_core=info,rikki_tui=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("Rikki starting (v{})", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(())
}

fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("rikki").join("logs")
}

/// Path of the active log file, for showing to users
pub fn current_log_file() -> PathBuf {
    get_log_directory().join("rikki.log")
}
