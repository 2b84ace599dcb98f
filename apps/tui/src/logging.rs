//! tracing-subscriber setup.
//!
//! Headless runs log to stderr. The TUI owns the terminal, so it only logs
//! when debug is on, and then to the configured log file.

use std::fs::OpenOptions;
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

const DEFAULT_FILTER: &str = "info";
const DEBUG_FILTER: &str = "debug";

fn env_filter(debug: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { DEBUG_FILTER } else { DEFAULT_FILTER }))
}

pub fn init_logging(config: &AppConfig, headless: bool) -> Result<()> {
    if headless {
        return tracing_subscriber::fmt()
            .with_env_filter(env_filter(config.debug))
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|e| eyre!("Failed to initialize logging: {e}"));
    }

    if !config.debug {
        return Ok(());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(true))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!("Failed to initialize logging: {e}"))
}
