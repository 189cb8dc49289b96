//! # Hand Replay
//!
//! A poker hand replay engine: recorded hands in, step-through table
//! snapshots out.
//!
//! The core is a pure, single-pass transform from a [`HandHistory`] to an
//! ordered sequence of [`TableState`] values, one per meaningful event
//! (blinds, deal, street reveals, actions, resolution). Every snapshot is
//! internally consistent in chip accounting: stacks, live bets, and the
//! collected pot always sum back to the starting stacks.
//!
//! ## Core Modules
//!
//! - [`replay`]: the engine — entities, chip ledger, and the stepping walk
//! - [`phh`]: PHH (TOML) hand history reading
//! - [`stars`]: PokerStars text export import and PHH conversion
//!
//! ## Example
//!
//! ```
//! use hand_replay::HandHistory;
//!
//! let hand = HandHistory::from_phh_str(
//!     r#"
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
//!
//! let frames = hand.replay();
//! assert_eq!(frames.last().unwrap().description, "bob wins $30");
//! # Ok::<(), hand_replay::PhhError>(())
//! ```

/// The replay engine: entities, ledger, and the stepping walk.
pub mod replay;
pub use replay::{
    Action, ActionKind, Blinds, Card, HandHistory, LastAction, Ledger, ParseCardError, Player,
    SeatIndex, Street, Suit, TableState, Usd, Username, Value, Winner, constants, frames,
};

/// PHH (TOML) hand history reading.
pub mod phh;
pub use phh::{PhhError, PhhResult};

/// PokerStars text import.
pub mod stars;
pub use stars::{StarsError, StarsHand, StarsResult};
