//! Tracing setup
//!
//! The terminal runs in raw mode on the alternate screen, so log output
//! goes to a file. Without a configured file no subscriber is installed.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::Result;

/// Environment variable overriding the configured filter
pub const LOG_ENV: &str = "BRACEPAD_LOG";

/// Install the global subscriber if the config names a log file
///
/// Returns whether logging was enabled.
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = config.log_file.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A subscriber may already be installed (tests); keep it
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();

    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_without_log_file() {
        let config = Config::default();
        assert!(!init(&config).unwrap());
    }

    #[test]
    fn test_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pad.log");
        let config = Config {
            log_file: Some(path.clone()),
            ..Config::default()
        };
        // Installation can lose the race against another test's subscriber
        let _ = init(&config).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            log_file: Some(dir.path().join("missing").join("pad.log")),
            ..Config::default()
        };
        assert!(init(&config).is_err());
    }
}
