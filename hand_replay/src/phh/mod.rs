//! PHH (Poker Hand History) reading.
//!
//! PHH is a TOML document describing one complete hand: game info at the
//! root (`variant`, `antes`, `blinds_or_straddles`, `min_bet`, per-street
//! board card arrays), `[players.N]` tables keyed by stringified seat index,
//! an `[actions]` table mapping street names to action arrays, and optional
//! `[[winners]]` entries for explicit showdown results.
//!
//! Deserialization is where validation lives: a document that parses is a
//! structurally valid [`HandHistory`](crate::replay::HandHistory), and the
//! replay walk performs no further checking.
//!
//! ## Example
//!
//! ```
//! use hand_replay::HandHistory;
//!
//! let hand = HandHistory::from_phh_str(
//!     r#"
//!     variant = "NT"
//!     blinds_or_straddles = [10, 20]
//!
//!     [players.0]
//!     name = "alice"
//!     starting_stack = 1000
//!
//!     [players.1]
//!     name = "bob"
//!     starting_stack = 1000
//!
//!     [actions]
//!     preflop = [{ player = 0, action = "fold" }]
//!     "#,
//! )?;
//! assert_eq!(hand.players.len(), 2);
//! # Ok::<(), hand_replay::PhhError>(())
//! ```

pub mod errors;
mod reader;

pub use errors::{PhhError, PhhResult};
