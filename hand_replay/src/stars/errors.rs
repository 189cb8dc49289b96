//! PokerStars import error types.

use thiserror::Error;

use crate::replay::ParseCardError;

/// PokerStars import errors
#[derive(Debug, Error)]
pub enum StarsError {
    /// Text does not start a PokerStars hand
    #[error("not a PokerStars hand: missing header")]
    MissingHeader,

    /// A card code in the export was malformed
    #[error(transparent)]
    Card(#[from] ParseCardError),
}

/// Result type for PokerStars import operations
pub type StarsResult<T> = Result<T, StarsError>;
