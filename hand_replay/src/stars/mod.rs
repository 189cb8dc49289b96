//! PokerStars hand history import.
//!
//! Parses the site's text export into an intermediate [`StarsHand`] and
//! emits PHH TOML from it. Amount semantics differ between the two worlds:
//! the site reports raises as street totals ("raises 110 to 210") while PHH
//! actions carry incremental contributions, so emission converts totals to
//! increments against each player's running street contribution.

pub mod errors;
mod converter;

pub use converter::{StarsAction, StarsActionKind, StarsHand, StarsPlayer};
pub use errors::{StarsError, StarsResult};
