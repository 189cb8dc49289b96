//! Chip accounting for a replay walk.
//!
//! The ledger tracks, as of any point in the walk, each seat's remaining
//! stack, each seat's live (uncollected) bet for the current street, and the
//! pot already swept from completed streets. All operations are infallible:
//! inputs are pre-validated by construction of the hand record.

use std::collections::BTreeMap;

use super::entities::{
    Action, ActionKind, Card, HandHistory, LastAction, SeatIndex, TableState, Usd,
};

#[derive(Clone, Debug)]
pub struct Ledger {
    collected_pot: Usd,
    live_bets: BTreeMap<SeatIndex, Usd>,
    stacks: BTreeMap<SeatIndex, Usd>,
    last_actions: BTreeMap<SeatIndex, LastAction>,
}

impl Ledger {
    /// Open the books for a hand: antes leave stacks and go straight into
    /// the pot, blinds leave stacks but stay live (they can still be raised
    /// over), and everything else stays in the stacks.
    #[must_use]
    pub fn new(hand: &HandHistory) -> Self {
        let mut collected_pot = 0;
        let mut live_bets = BTreeMap::new();
        let mut stacks = BTreeMap::new();
        for player in &hand.players {
            let seat_idx = player.seat_idx;
            let ante = hand.ante(seat_idx);
            let blind = hand.blind(seat_idx);
            stacks.insert(
                seat_idx,
                player.starting_stack.saturating_sub(ante + blind),
            );
            collected_pot += ante;
            if blind > 0 {
                live_bets.insert(seat_idx, blind);
            }
        }
        Self {
            collected_pot,
            live_bets,
            stacks,
            last_actions: BTreeMap::new(),
        }
    }

    /// Record an action. Wagers (`call`/`bet`/`raise`) with a positive
    /// amount move that contribution from the seat's stack into its live
    /// bet; `fold`/`check` only update the action marker.
    pub fn apply_action(&mut self, action: &Action) {
        self.last_actions.insert(action.player, LastAction::from(action));
        if !action.action.is_wager() {
            return;
        }
        if let Some(amount) = action.amount.filter(|amount| *amount > 0) {
            *self.live_bets.entry(action.player).or_default() += amount;
            let stack = self.stacks.entry(action.player).or_default();
            *stack = stack.saturating_sub(amount);
        }
    }

    /// Move every live bet into the collected pot. Used at street boundaries
    /// and before a win distribution.
    pub fn sweep_to_collected(&mut self) {
        self.collected_pot += self.live_bets.values().sum::<Usd>();
        self.live_bets.clear();
    }

    /// Street-boundary cleanup of action markers: sticky markers (folds)
    /// stay for the rest of the hand, everything else is dropped so stale
    /// check/call badges don't carry into the next street.
    pub fn clear_transient_actions(&mut self) {
        self.last_actions.retain(|_, last| last.action.is_sticky());
    }

    /// Return a seat's live bet to its stack (an uncalled bet is returned,
    /// not won).
    pub fn return_live_bet(&mut self, seat_idx: SeatIndex) {
        if let Some(returned) = self.live_bets.remove(&seat_idx) {
            *self.stacks.entry(seat_idx).or_default() += returned;
        }
    }

    /// Credit a winner: the amount moves from the collected pot to the
    /// seat's stack and the seat's marker becomes the terminal `win`.
    pub fn award_win(&mut self, seat_idx: SeatIndex, amount: Usd) {
        *self.stacks.entry(seat_idx).or_default() += amount;
        self.collected_pot = self.collected_pot.saturating_sub(amount);
        self.last_actions.insert(
            seat_idx,
            LastAction {
                action: ActionKind::Win,
                amount: Some(amount),
            },
        );
    }

    #[must_use]
    pub fn collected_pot(&self) -> Usd {
        self.collected_pot
    }

    #[must_use]
    pub fn has_folded(&self, seat_idx: SeatIndex) -> bool {
        self.last_actions
            .get(&seat_idx)
            .is_some_and(|last| last.action == ActionKind::Fold)
    }

    /// Freeze the current books into an immutable snapshot. The maps are
    /// deep copies: later ledger mutation never touches an emitted snapshot.
    #[must_use]
    pub fn snapshot(
        &self,
        board: Vec<Card>,
        active_seat: Option<SeatIndex>,
        description: String,
        cards_dealt: bool,
    ) -> TableState {
        TableState {
            board,
            last_actions: self.last_actions.clone(),
            collected_pot: self.collected_pot,
            live_bets: self.live_bets.clone(),
            stacks: self.stacks.clone(),
            active_seat,
            description,
            cards_dealt,
        }
    }
}
