use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    collections::BTreeMap,
    fmt::{self},
    str::FromStr,
};
use thiserror::Error;

use super::constants;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    /// The single-letter code used by hand history formats ("c", "s", "d", "h").
    #[must_use]
    pub fn code(self) -> char {
        match self {
            Self::Club => 'c',
            Self::Spade => 's',
            Self::Diamond => 'd',
            Self::Heart => 'h',
        }
    }

    #[must_use]
    pub fn from_code(c: char) -> Option<Self> {
        match c {
            'c' => Some(Self::Club),
            's' => Some(Self::Spade),
            'd' => Some(Self::Diamond),
            'h' => Some(Self::Heart),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values.
pub type Value = u8;

/// A card is a tuple of a uInt8 value (deuce=2u8 ... ace=14u8) and a suit.
/// The text form is the two-character code used by hand histories ("Tc",
/// "Ah"), which is also how cards serialize.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Card(pub Value, pub Suit);

impl Card {
    /// Two-character code, rank then suit ("Tc").
    #[must_use]
    pub fn code(&self) -> String {
        format!("{}{}", rank_char(self.0), self.1.code())
    }
}

fn rank_char(value: Value) -> char {
    match value {
        1 | 14 => 'A',
        13 => 'K',
        12 => 'Q',
        11 => 'J',
        10 => 'T',
        v => (b'0' + v) as char,
    }
}

#[derive(Debug, Eq, Error, PartialEq)]
#[error("invalid card {0:?}")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(rank), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseCardError(s.to_string()));
        };
        let value = match rank {
            'A' => 14,
            'K' => 13,
            'Q' => 12,
            'J' => 11,
            'T' => 10,
            '2'..='9' => rank as Value - b'0' as Value,
            _ => return Err(ParseCardError(s.to_string())),
        };
        let suit = Suit::from_code(suit).ok_or_else(|| ParseCardError(s.to_string()))?;
        Ok(Self(value, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", rank_char(self.0), self.1)
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.code())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Type alias for whole dollars. All bets and player stacks are represented
/// as whole dollars (there's no point arguing over pennies).
pub type Usd = u32;

/// Type alias for seat positions during the hand. Seat meaning is fixed by
/// position: seat 0 posts the small blind, seat 1 the big blind.
pub type SeatIndex = usize;

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Username(String);

impl Username {
    pub fn new(s: &str) -> Self {
        let mut username: String = s
            .chars()
            .map(|c| if c.is_ascii_whitespace() { '_' } else { c })
            .collect();
        username.truncate(constants::MAX_NAME_LENGTH);
        Self(username)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for Username {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Blinds {
    pub small: Usd,
    pub big: Usd,
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = format!("${}/{}", self.small, self.big);
        write!(f, "{repr}")
    }
}

/// A seated participant as recorded at hand start.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Player {
    pub seat_idx: SeatIndex,
    pub name: Username,
    pub starting_stack: Usd,
    /// Absent when the hand record never revealed this seat's cards.
    pub hole_cards: Option<[Card; 2]>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    /// Terminal synthetic kind: chips credited from the pot.
    Win,
}

impl ActionKind {
    /// Whether this action adds chips to the current street's live bet.
    #[must_use]
    pub fn is_wager(self) -> bool {
        matches!(self, Self::Call | Self::Bet | Self::Raise)
    }

    /// Sticky markers survive street boundaries; everything else is cleared
    /// when a street completes. Folds stay visible for the rest of the hand.
    #[must_use]
    pub fn is_sticky(self) -> bool {
        matches!(self, Self::Fold)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Fold => "folds",
            Self::Check => "checks",
            Self::Call => "calls",
            Self::Bet => "bets",
            Self::Raise => "raises",
            Self::Win => "wins",
        };
        write!(f, "{repr}")
    }
}

/// One recorded action. For `call`/`bet`/`raise`, `amount` is the chips this
/// action ADDS to the player's live bet for the street (a contribution), not
/// the resulting total. For `win` it is the amount credited from the pot.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Action {
    pub player: SeatIndex,
    pub action: ActionKind,
    pub amount: Option<Usd>,
}

/// A seat's most recent action, kept for display on the table.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct LastAction {
    pub action: ActionKind,
    pub amount: Option<Usd>,
}

impl From<&Action> for LastAction {
    fn from(value: &Action) -> Self {
        Self {
            action: value.action,
            amount: value.amount,
        }
    }
}

impl fmt::Display for LastAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.amount {
            Some(amount) => write!(f, "{} ${amount}", self.action),
            None => self.action.fmt(f),
        }
    }
}

/// The four betting rounds in walk order.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Self; 4] = [Self::Preflop, Self::Flop, Self::Turn, Self::River];

    /// Lowercase key used by hand history formats.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Preflop => "preflop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Preflop => "Preflop",
            Self::Flop => "Flop",
            Self::Turn => "Turn",
            Self::River => "River",
        };
        write!(f, "{repr}")
    }
}

/// An explicit showdown result: the seat credited and the amount it collects.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Winner {
    pub player: SeatIndex,
    pub amount: Usd,
}

/// A complete recorded hand. Supplied whole, never mutated: the replay walk
/// reads it and produces snapshots, nothing writes back.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct HandHistory {
    pub variant: String,
    /// Per-seat antes; short or empty vectors mean zero for the missing seats.
    pub antes: Vec<Usd>,
    /// Per-seat blinds, seat order (index 0 = small blind, 1 = big blind).
    pub blinds: Vec<Usd>,
    pub min_bet: Usd,
    /// Insertion order is seat order.
    pub players: Vec<Player>,
    pub flop_cards: Vec<Card>,
    pub turn_cards: Vec<Card>,
    pub river_cards: Vec<Card>,
    /// Streets with no recorded actions may be absent.
    pub actions: BTreeMap<Street, Vec<Action>>,
    /// Explicit showdown winners in award order; empty when the hand ended
    /// by folds or the record carries no result.
    pub winners: Vec<Winner>,
}

impl HandHistory {
    /// Actions for a street, empty for absent streets.
    #[must_use]
    pub fn actions(&self, street: Street) -> &[Action] {
        self.actions.get(&street).map_or(&[], Vec::as_slice)
    }

    /// Community cards revealed by a street (none for preflop).
    #[must_use]
    pub fn street_cards(&self, street: Street) -> &[Card] {
        match street {
            Street::Preflop => &[],
            Street::Flop => &self.flop_cards,
            Street::Turn => &self.turn_cards,
            Street::River => &self.river_cards,
        }
    }

    /// The full board in reveal order.
    #[must_use]
    pub fn board(&self) -> Vec<Card> {
        let mut board = Vec::with_capacity(constants::BOARD_SIZE);
        board.extend_from_slice(&self.flop_cards);
        board.extend_from_slice(&self.turn_cards);
        board.extend_from_slice(&self.river_cards);
        board
    }

    #[must_use]
    pub fn player(&self, seat_idx: SeatIndex) -> Option<&Player> {
        self.players.get(seat_idx)
    }

    #[must_use]
    pub fn player_by_name(&self, name: &Username) -> Option<&Player> {
        self.players.iter().find(|player| &player.name == name)
    }

    /// Display name for a seat, with a stable fallback for seats the record
    /// doesn't describe.
    #[must_use]
    pub fn name_of(&self, seat_idx: SeatIndex) -> String {
        self.player(seat_idx)
            .map_or_else(|| format!("Player{seat_idx}"), |p| p.name.to_string())
    }

    #[must_use]
    pub fn ante(&self, seat_idx: SeatIndex) -> Usd {
        self.antes.get(seat_idx).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn blind(&self, seat_idx: SeatIndex) -> Usd {
        self.blinds.get(seat_idx).copied().unwrap_or(0)
    }

    /// Small/big blind pair by seat convention.
    #[must_use]
    pub fn blind_levels(&self) -> Blinds {
        Blinds {
            small: self.blind(0),
            big: self.blind(1),
        }
    }

    /// Total chips on the table at hand start. Every snapshot's chips sum
    /// back to this.
    #[must_use]
    pub fn starting_total(&self) -> Usd {
        self.players.iter().map(|p| p.starting_stack).sum()
    }

    /// Quick one-paragraph summary of the hand.
    #[must_use]
    pub fn summary(&self) -> String {
        let names: Vec<String> = self.players.iter().map(|p| p.name.to_string()).collect();
        let starting_pot: Usd =
            self.antes.iter().sum::<Usd>() + self.blinds.iter().sum::<Usd>();
        format!(
            "{}-handed {} hand\nPlayers: {}\nStarting pot: ${starting_pot}",
            self.players.len(),
            self.variant,
            names.join(", "),
        )
    }
}

/// One immutable table snapshot. Fully self-describing: the presentation
/// layer renders seats, board, chips, and pot from this plus the static
/// [`HandHistory`], nothing else.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableState {
    /// Community cards visible so far; prefix-consistent across the sequence.
    pub board: Vec<Card>,
    /// Most recent action per seat. Fold markers persist across streets,
    /// everything else is dropped at street boundaries.
    pub last_actions: BTreeMap<SeatIndex, LastAction>,
    /// Chips already swept to the table center.
    pub collected_pot: Usd,
    /// Current-street bets not yet collected. Empty right after a sweep.
    pub live_bets: BTreeMap<SeatIndex, Usd>,
    pub stacks: BTreeMap<SeatIndex, Usd>,
    /// Seat to highlight as acting, if any.
    pub active_seat: Option<SeatIndex>,
    pub description: String,
    pub cards_dealt: bool,
}

impl TableState {
    #[must_use]
    pub fn live_bet(&self, seat_idx: SeatIndex) -> Usd {
        self.live_bets.get(&seat_idx).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn stack(&self, seat_idx: SeatIndex) -> Usd {
        self.stacks.get(&seat_idx).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn last_action(&self, seat_idx: SeatIndex) -> Option<&LastAction> {
        self.last_actions.get(&seat_idx)
    }

    /// Every chip on the table: stacks, live bets, and the collected pot.
    /// Constant across a hand's whole snapshot sequence.
    #[must_use]
    pub fn total_chips(&self) -> Usd {
        self.stacks.values().sum::<Usd>()
            + self.live_bets.values().sum::<Usd>()
            + self.collected_pot
    }
}
