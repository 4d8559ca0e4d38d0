//! Error types for MTG Goldfish
//!
//! Game outcomes (win, loss) are never errors; these only cover the edges:
//! deck files, configuration and I/O.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoldfishError {
    #[error("Invalid deck format: {0}")]
    InvalidDeckFormat(String),

    #[error("Unknown card: {0}")]
    UnknownCard(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GoldfishError>;
