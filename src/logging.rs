//! File logging for the terminal UI.
//!
//! The TUI owns stdout and stderr while it runs, so log lines go to a file, and only when one is
//! configured. The filter comes from `SECTILE_LOG` and defaults to `info`.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "SECTILE_LOG";

/// Installs a global subscriber appending to `path`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed (tests, embedding); keep the first one.
    if let Err(e) = fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
    {
        tracing::debug!("keeping existing log subscriber: {e}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/logging.rs"]
mod tests;
