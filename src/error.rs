use thiserror::Error;

/// Errors surfaced by the game controller.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GameError {
    #[error("cell index out of range: {0}")]
    CellOutOfRange(usize),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Failures of the key-value store holding the tallies.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read key `{key}`: {reason}")]
    Read { key: String, reason: String },

    #[error("failed to write key `{key}`: {reason}")]
    Write { key: String, reason: String },

    #[error("failed to encode scores: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
