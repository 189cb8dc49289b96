//! Hand replay engine: a pure transform from a recorded hand to an ordered
//! sequence of table snapshots.
//!
//! Three cooperating pieces, in dependency order:
//! - [`entities`]: the immutable hand record and the snapshot type
//! - [`ledger`]: chip accounting (stacks, live bets, collected pot)
//! - [`stepper`]: the single forward walk that emits snapshots and settles
//!   the hand's outcome
//!
//! The walk is synchronous and shares nothing between invocations; replaying
//! a new hand constructs a fresh ledger and a fresh sequence.

pub mod constants;
pub mod entities;
pub mod ledger;
pub mod stepper;

pub use entities::{
    Action, ActionKind, Blinds, Card, HandHistory, LastAction, ParseCardError, Player, SeatIndex,
    Street, Suit, TableState, Usd, Username, Value, Winner,
};
pub use ledger::Ledger;
pub use stepper::frames;
