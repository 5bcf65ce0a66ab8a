//! Console logging for model runs.
//!
//! Log records go to stderr so that stdout stays free for run output written with
//! [`crate::Environment::write_csv`] when no output directory is configured.

use std::sync::{LazyLock, Mutex};

pub use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::{Config, Handle};

use crate::MrpError;

// ISO 8601 timestamp and color coded level tag
const DEFAULT_LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

const APPENDER_NAME: &str = "stderr";

/// Handle to the installed global logger, `None` until the first `init_logging`.
static ROOT_HANDLE: LazyLock<Mutex<Option<Handle>>> = LazyLock::new(Mutex::default);

fn build_config(level: LevelFilter) -> Result<Config, MrpError> {
    let encoder = Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN));
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(encoder)
        .build();

    Config::builder()
        .appender(Appender::builder().build(APPENDER_NAME, Box::new(stderr)))
        .build(Root::builder().appender(APPENDER_NAME).build(level))
        .map_err(|e| MrpError::LoggingError(e.to_string()))
}

/// Installs the global logger at `level`, or changes the level if it is already installed.
pub fn init_logging(level: LevelFilter) -> Result<(), MrpError> {
    let config = build_config(level)?;
    let mut root_handle = ROOT_HANDLE
        .lock()
        .map_err(|_| MrpError::LoggingError("logger state poisoned".to_string()))?;

    match root_handle.as_ref() {
        Some(handle) => handle.set_config(config),
        None => {
            let handle =
                log4rs::init_config(config).map_err(|e| MrpError::LoggingError(e.to_string()))?;
            *root_handle = Some(handle);
        }
    }
    Ok(())
}
