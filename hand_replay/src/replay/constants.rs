//! Table-level constants.

/// Seats in the standard supported layout.
pub const MAX_SEATS: usize = 6;

/// Community cards over a full hand (flop + turn + river).
pub const BOARD_SIZE: usize = 5;

/// Display names longer than this are truncated on the way in.
pub const MAX_NAME_LENGTH: usize = 32;
