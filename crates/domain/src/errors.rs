//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Rotaboard
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum RotaBoardError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A rota record carries a `days` key that is not an integer in [1, 31].
    ///
    /// Non-fatal on read (the key is skipped), fatal on write (the record
    /// is rejected before it reaches storage).
    #[error("Malformed day key {key:?} in rota record {record_id}")]
    MalformedDayKey { record_id: String, key: String },

    /// A raw string failed to parse as one of the two rota types.
    ///
    /// Only reachable at the data-model boundary; inside the engine the
    /// type is a closed enum.
    #[error("Unknown rota type: {0}")]
    UnknownRotaType(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Rotaboard operations
pub type Result<T> = std::result::Result<T, RotaBoardError>;
