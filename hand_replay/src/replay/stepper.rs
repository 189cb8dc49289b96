//! The replay walk: a single forward pass over a hand record that emits one
//! immutable snapshot per meaningful event.
//!
//! Emission order is fixed: blinds posted, hole cards dealt, then each
//! street in `preflop, flop, turn, river` order (boundary settlement, card
//! reveal, one snapshot per action), and finally the hand's resolution.

use super::entities::{Card, HandHistory, LastAction, SeatIndex, Street, TableState, Usd};
use super::ledger::Ledger;

impl HandHistory {
    /// Produce the full snapshot sequence for this hand. Pure and
    /// deterministic: identical records yield identical sequences.
    #[must_use]
    pub fn replay(&self) -> Vec<TableState> {
        frames(self)
    }
}

/// Transform a hand record into its ordered snapshot sequence.
#[must_use]
pub fn frames(hand: &HandHistory) -> Vec<TableState> {
    Stepper::new(hand).run()
}

struct Stepper<'a> {
    hand: &'a HandHistory,
    ledger: Ledger,
    board: Vec<Card>,
    cards_dealt: bool,
    starting_total: Usd,
    frames: Vec<TableState>,
}

impl<'a> Stepper<'a> {
    fn new(hand: &'a HandHistory) -> Self {
        Self {
            hand,
            ledger: Ledger::new(hand),
            board: Vec::new(),
            cards_dealt: false,
            starting_total: hand.starting_total(),
            frames: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<TableState> {
        self.push_frame(
            None,
            format!("Blinds posted {}", self.hand.blind_levels()),
        );
        self.cards_dealt = true;
        self.push_frame(None, "Hole cards dealt".to_string());
        for street in Street::ALL {
            self.walk_street(street);
        }
        self.resolve();
        self.frames
    }

    fn walk_street(&mut self, street: Street) {
        if street != Street::Preflop {
            // Boundary settlement happens before the new street's cards are
            // revealed, so the pot display updates ahead of the deal.
            self.ledger.sweep_to_collected();
            self.ledger.clear_transient_actions();
        }

        let revealed = self.hand.street_cards(street);
        if !revealed.is_empty() {
            self.board.extend_from_slice(revealed);
            let cards: Vec<String> = revealed.iter().map(ToString::to_string).collect();
            self.push_frame(None, format!("{street}: {}", cards.join(" ")));
        }

        for action in self.hand.actions(street) {
            self.ledger.apply_action(action);
            let description = format!(
                "{} {}",
                self.hand.name_of(action.player),
                LastAction::from(action),
            );
            self.push_frame(Some(action.player), description);
        }
    }

    /// Terminal step. Either a single survivor takes the pot (fold-out), or
    /// explicit showdown winners are each credited in list order. A walk
    /// that ends with multiple live players and no recorded winners gets no
    /// terminal snapshot: the record is silent and we don't guess.
    fn resolve(&mut self) {
        let survivors: Vec<SeatIndex> = self
            .hand
            .players
            .iter()
            .map(|player| player.seat_idx)
            .filter(|seat_idx| !self.ledger.has_folded(*seat_idx))
            .collect();

        if let [survivor] = survivors[..] {
            // The survivor's own uncalled bet is returned, not won.
            self.ledger.return_live_bet(survivor);
            self.ledger.sweep_to_collected();
            let amount = self.ledger.collected_pot();
            self.ledger.award_win(survivor, amount);
            self.push_frame(
                Some(survivor),
                format!("{} wins ${amount}", self.hand.name_of(survivor)),
            );
        } else if !self.hand.winners.is_empty() {
            self.ledger.sweep_to_collected();
            for winner in &self.hand.winners {
                self.ledger.award_win(winner.player, winner.amount);
                self.push_frame(
                    Some(winner.player),
                    format!(
                        "{} wins ${}",
                        self.hand.name_of(winner.player),
                        winner.amount
                    ),
                );
            }
        }
    }

    fn push_frame(&mut self, active_seat: Option<SeatIndex>, description: String) {
        let frame = self.ledger.snapshot(
            self.board.clone(),
            active_seat,
            description,
            self.cards_dealt,
        );
        // Chip conservation holds for every emitted snapshot.
        debug_assert_eq!(frame.total_chips(), self.starting_total);
        self.frames.push(frame);
    }
}
