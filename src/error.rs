//! Error types for bracepad

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for bracepad operations
pub type Result<T> = std::result::Result<T, EditorError>;

/// Editor error types
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid highlight pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("{0}")]
    Message(String),
}
