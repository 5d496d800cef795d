use crate::config::Config;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initializes file logging.
///
/// The terminal belongs to the popup, so events go to the log file in the data
/// directory. `RUST_LOG` takes precedence over the configured filter. When the
/// file cannot be opened no subscriber is installed and events are dropped.
pub fn init(config: &Config) {
    let Ok(path) = config.log_file() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let initialized = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .try_init();

    if initialized.is_ok() {
        tracing::debug!(path = %path.display(), "logging initialized");
    }
}
