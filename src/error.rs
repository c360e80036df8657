//! Error types for the blackjack-q crate

use thiserror::Error;

/// Main error type for the blackjack-q crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action {value} (expected 0 for stand or 1 for hit)")]
    InvalidAction { value: i64 },

    #[error("invalid card rank {rank} (must be 1-10)")]
    InvalidCard { rank: u8 },

    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    #[error("shoe exhausted: needed {needed} card(s), {remaining} remaining")]
    ShoeExhausted { needed: usize, remaining: usize },

    #[error("no undealt card of rank {rank} among {remaining} remaining")]
    RankUnavailable { rank: u8, remaining: usize },

    #[error("player turn already finished")]
    TurnFinished,

    #[error("reward requested before the player turn finished")]
    TurnNotFinished,

    #[error("malformed policy at line {line}: {reason}")]
    MalformedPolicy { line: usize, reason: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}

impl Error {
    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        Error::InvalidState {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_policy(line: usize, reason: impl Into<String>) -> Self {
        Error::MalformedPolicy {
            line,
            reason: reason.into(),
        }
    }
}
