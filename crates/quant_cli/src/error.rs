//! CLI error type.

use quant_core::QuantError;
use thiserror::Error;

/// Errors surfaced by the `quant` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// An input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A command-line argument was rejected before reaching the core.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The configuration file could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The calculation core rejected the request.
    #[error(transparent)]
    Quant(#[from] QuantError),

    /// Reading an input file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON input or output could not be (de)serialised.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Reads and deserialises a JSON input file.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    if !std::path::Path::new(path).exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
