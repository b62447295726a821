use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const LOG_ENV: &str = "SWIPEDO_LOG";

pub enum LogTarget {
    /// The TUI owns the terminal, so logs go to the configured file.
    File,
    Stderr,
}

fn filter(config: &Config) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

pub fn init(config: &Config, target: LogTarget) -> Result<()> {
    match target {
        LogTarget::File => {
            let path = config.log_path()?;
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter(config))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow!("Could not initialise logging: {}", e))
        }
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter(config))
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!("Could not initialise logging: {}", e)),
    }
}
