//! PHH error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::replay::SeatIndex;

/// PHH reading errors
#[derive(Debug, Error)]
pub enum PhhError {
    /// File could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid PHH TOML (includes malformed card codes)
    #[error("invalid PHH document: {0}")]
    Toml(#[from] toml::de::Error),

    /// A player's hole cards were not a pair
    #[error("seat {seat_idx} hole cards: expected 2 cards, got {count}")]
    HoleCards { seat_idx: SeatIndex, count: usize },
}

/// Result type for PHH operations
pub type PhhResult<T> = Result<T, PhhError>;
