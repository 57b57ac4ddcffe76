//! Application layer errors

use std::path::PathBuf;
use thiserror::Error;

/// Per-message and transport errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Image library errors
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("cannot open image root {}: {source}", path.display())]
    RootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot list category folder {}: {source}", path.display())]
    CategoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Fatal errors raised before the update loop starts
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Image library unavailable: {0}")]
    Library(#[from] LibraryError),

    #[error("Failed to connect: {0}")]
    Connect(#[source] BotError),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}
