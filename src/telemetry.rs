use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing output.
///
/// When file logging is enabled, log lines append to the configured path
/// (`~` expanded) with ANSI off; otherwise a plain stdout subscriber is used
/// so log lines sit alongside the status prints.
pub fn init(enabled: bool, log_path: &str) -> Result<()> {
    if !enabled {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_target(false)
            .init();
        return Ok(());
    }

    let expanded_path = Config::expand_path(log_path)?;

    if let Some(parent) = expanded_path.parent() {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&expanded_path)
        .context("failed to open log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(file)
        .with_target(false)
        .with_ansi(false)
        .init();

    tracing::info!("file logging initialized: {}", expanded_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    #[ignore = "global tracing subscriber can only be initialized once per process"]
    fn test_init_stdout_subscriber() {
        // Covered indirectly by running the binary; init() is a thin wrapper
        // around tracing_subscriber::fmt and cannot be re-initialized here.
    }
}
