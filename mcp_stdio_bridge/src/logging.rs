//! # Logging Initialization
//!
//! stdout carries the JSON-RPC stream, so logs must never be written there.
//! [`init_logging`] installs a `tracing` subscriber that writes either to
//! stderr (the default) or to a daily rolling file in the user's cache
//! directory.
//!
//! Verbosity comes from `RUST_LOG` when set; otherwise the given level is used
//! for dependencies and `debug` for this crate.

use anyhow::Result;
use directories::ProjectDirs;
use std::{
    io::stderr,
    path::{Path, PathBuf},
    sync::Once,
};
use tracing_subscriber::{EnvFilter, fmt::layer, prelude::*};

static INIT: Once = Once::new();

const LOG_FILE_PREFIX: &str = "mcp_stdio_bridge.log";

/// Initializes the logging system.
///
/// Safe to call more than once; only the first call installs a subscriber.
/// If file logging is requested but the cache directory cannot be written,
/// logs go to stderr instead.
pub fn init_logging(log_level: &str, log_to_file: bool) -> Result<()> {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directives(log_level)));

        if log_to_file
            && let Some(log_dir) = log_directory()
            && can_write_to(&log_dir)
        {
            let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(layer().with_writer(non_blocking).with_ansi(false))
                .init();
            // Leaked so buffered lines are flushed at exit.
            Box::leak(Box::new(guard));
            return;
        }

        tracing_subscriber::registry()
            .with(env_filter)
            .with(layer().with_writer(stderr).with_ansi(false))
            .init();
    });

    Ok(())
}

fn default_directives(log_level: &str) -> String {
    format!("{log_level},mcp_stdio_bridge=debug")
}

/// Directory for log files, under the platform cache dir.
pub fn log_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "McpStdioBridge", "mcp_stdio_bridge")
        .map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Creates `dir` if needed and checks a file can be written inside it.
///
/// `tracing_appender::rolling::daily` panics on permission errors, so this
/// runs first.
fn can_write_to(dir: &Path) -> bool {
    if std::fs::create_dir_all(dir).is_err() {
        return false;
    }

    let probe = dir.join(".mcp_stdio_bridge_log_test");
    match std::fs::write(&probe, "test") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}
