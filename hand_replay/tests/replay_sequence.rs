//! End-to-end replay sequence tests.
//!
//! These walk complete hand records through the engine and verify the
//! emitted snapshot sequences: emission order, descriptions, chip movement
//! at street boundaries, and terminal resolution.

use std::collections::BTreeMap;

use hand_replay::{
    Action, ActionKind, Card, HandHistory, Player, SeatIndex, StarsHand, Street, TableState, Usd,
    Username, Winner,
};

fn player(seat_idx: SeatIndex, name: &str, starting_stack: Usd) -> Player {
    Player {
        seat_idx,
        name: Username::new(name),
        starting_stack,
        hole_cards: None,
    }
}

fn act(player: SeatIndex, action: ActionKind, amount: Option<Usd>) -> Action {
    Action {
        player,
        action,
        amount,
    }
}

fn cards(codes: &[&str]) -> Vec<Card> {
    codes.iter().map(|code| code.parse().unwrap()).collect()
}

fn heads_up(preflop: Vec<Action>) -> HandHistory {
    HandHistory {
        variant: "NT".to_string(),
        blinds: vec![10, 20],
        players: vec![player(0, "alice", 1000), player(1, "bob", 1000)],
        actions: BTreeMap::from([(Street::Preflop, preflop)]),
        ..HandHistory::default()
    }
}

fn assert_conserved(hand: &HandHistory, frames: &[TableState]) {
    let total = hand.starting_total();
    for (step, frame) in frames.iter().enumerate() {
        assert_eq!(
            frame.total_chips(),
            total,
            "chips not conserved at step {step} ({})",
            frame.description,
        );
    }
}

// ============================================================================
// Emission Order
// ============================================================================

#[test]
fn first_snapshot_is_blinds_posted() {
    let frames = heads_up(vec![]).replay();
    let first = &frames[0];
    assert!(first.board.is_empty());
    assert!(!first.cards_dealt);
    assert_eq!(first.description, "Blinds posted $10/20");
    // Pot holds antes only (none here); the blinds are still live.
    assert_eq!(first.collected_pot, 0);
    assert_eq!(first.live_bets, BTreeMap::from([(0, 10), (1, 20)]));
    assert_eq!(first.active_seat, None);
}

#[test]
fn second_snapshot_deals_hole_cards() {
    let frames = heads_up(vec![]).replay();
    assert_eq!(frames[1].description, "Hole cards dealt");
    assert!(frames[1].cards_dealt);
    assert!(frames[1].board.is_empty());
}

#[test]
fn antes_go_straight_to_the_pot() {
    let mut hand = heads_up(vec![]);
    hand.antes = vec![5, 5];
    let frames = hand.replay();
    assert_eq!(frames[0].collected_pot, 10);
    assert_eq!(frames[0].stacks, BTreeMap::from([(0, 985), (1, 975)]));
    assert_conserved(&hand, &frames);
}

#[test]
fn action_snapshots_highlight_the_actor() {
    let hand = heads_up(vec![
        act(0, ActionKind::Call, Some(10)),
        act(1, ActionKind::Check, None),
    ]);
    let frames = hand.replay();
    assert_eq!(frames[2].description, "alice calls $10");
    assert_eq!(frames[2].active_seat, Some(0));
    assert_eq!(frames[3].description, "bob checks");
    assert_eq!(frames[3].active_seat, Some(1));
    assert_conserved(&hand, &frames);
}

// ============================================================================
// Street Boundaries
// ============================================================================

#[test]
fn street_sweep_collects_preflop_bets_before_the_reveal() {
    let mut hand = heads_up(vec![
        act(0, ActionKind::Call, Some(10)),
        act(1, ActionKind::Check, None),
    ]);
    hand.flop_cards = cards(&["7d", "5h", "9d"]);
    let frames = hand.replay();

    // Preflop action snapshots still show live bets.
    assert_eq!(frames[2].live_bets, BTreeMap::from([(0, 20), (1, 20)]));
    assert_eq!(frames[3].live_bets, BTreeMap::from([(0, 20), (1, 20)]));

    // The reveal snapshot shows them swept.
    let reveal = &frames[4];
    assert_eq!(reveal.description, "Flop: 7♦ 5♥ 9♦");
    assert!(reveal.live_bets.is_empty());
    assert_eq!(reveal.collected_pot, 40);
    assert_eq!(reveal.board.len(), 3);
    assert_conserved(&hand, &frames);
}

#[test]
fn transient_action_markers_clear_at_the_boundary() {
    let mut hand = HandHistory {
        variant: "NT".to_string(),
        blinds: vec![10, 20],
        players: vec![
            player(0, "alice", 1000),
            player(1, "bob", 1000),
            player(2, "carol", 1000),
        ],
        actions: BTreeMap::from([(
            Street::Preflop,
            vec![
                act(2, ActionKind::Fold, None),
                act(0, ActionKind::Call, Some(10)),
                act(1, ActionKind::Check, None),
            ],
        )]),
        ..HandHistory::default()
    };
    hand.flop_cards = cards(&["2c", "3d", "4h"]);
    hand.winners = vec![Winner { player: 0, amount: 20 }, Winner { player: 1, amount: 20 }];
    let frames = hand.replay();

    let reveal = frames
        .iter()
        .find(|frame| frame.description.starts_with("Flop:"))
        .unwrap();
    // The fold badge survives the boundary; call/check badges do not.
    assert_eq!(
        reveal.last_action(2).map(|last| last.action),
        Some(ActionKind::Fold)
    );
    assert!(reveal.last_action(0).is_none());
    assert!(reveal.last_action(1).is_none());
    assert_conserved(&hand, &frames);
}

#[test]
fn board_grows_monotonically_across_the_sequence() {
    let mut hand = heads_up(vec![
        act(0, ActionKind::Call, Some(10)),
        act(1, ActionKind::Check, None),
    ]);
    hand.flop_cards = cards(&["7d", "5h", "9d"]);
    hand.turn_cards = cards(&["7c"]);
    hand.river_cards = cards(&["Qh"]);
    hand.winners = vec![Winner { player: 1, amount: 40 }];
    let frames = hand.replay();

    for pair in frames.windows(2) {
        assert!(
            pair[1].board.starts_with(&pair[0].board),
            "board shrank or reordered: {:?} -> {:?}",
            pair[0].board,
            pair[1].board,
        );
    }
    assert_eq!(frames.last().unwrap().board.len(), 5);
    assert_conserved(&hand, &frames);
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn fold_out_awards_the_pot_to_the_survivor() {
    let hand = heads_up(vec![act(0, ActionKind::Fold, None)]);
    let frames = hand.replay();

    // blinds, deal, the fold, and exactly one terminal snapshot.
    assert_eq!(frames.len(), 4);
    let terminal = &frames[3];
    assert_eq!(terminal.description, "bob wins $30");
    assert_eq!(terminal.active_seat, Some(1));
    assert_eq!(terminal.stack(1), 1010);
    assert_eq!(terminal.collected_pot, 0);
    assert!(terminal.live_bets.is_empty());
    assert_conserved(&hand, &frames);
}

#[test]
fn uncalled_river_bet_returns_to_the_survivor() {
    let mut hand = heads_up(vec![
        act(0, ActionKind::Call, Some(10)),
        act(1, ActionKind::Check, None),
    ]);
    hand.flop_cards = cards(&["7d", "5h", "9d"]);
    hand.turn_cards = cards(&["7c"]);
    hand.river_cards = cards(&["Qh"]);
    hand.actions.insert(
        Street::River,
        vec![
            act(0, ActionKind::Bet, Some(200)),
            act(1, ActionKind::Fold, None),
        ],
    );
    let frames = hand.replay();

    let terminal = frames.last().unwrap();
    // The $200 river bet was never called: it comes back, and alice wins
    // only the $40 that was actually contested.
    assert_eq!(terminal.description, "alice wins $40");
    assert_eq!(terminal.stack(0), 1020);
    assert_eq!(terminal.stack(1), 980);
    assert!(terminal.live_bets.is_empty());
    assert_conserved(&hand, &frames);
}

#[test]
fn split_pot_emits_one_snapshot_per_winner() {
    let hand = HandHistory {
        variant: "NT".to_string(),
        blinds: vec![50, 50],
        players: vec![player(0, "alice", 1000), player(1, "bob", 1000)],
        winners: vec![Winner { player: 0, amount: 50 }, Winner { player: 1, amount: 50 }],
        ..HandHistory::default()
    };
    let frames = hand.replay();

    let terminals: Vec<&TableState> = frames
        .iter()
        .filter(|frame| frame.description.contains("wins"))
        .collect();
    assert_eq!(terminals.len(), 2);
    assert_eq!(terminals[0].description, "alice wins $50");
    assert_eq!(terminals[0].active_seat, Some(0));
    // First award leaves bob's half still in the pot.
    assert_eq!(terminals[0].collected_pot, 50);
    assert_eq!(terminals[1].description, "bob wins $50");
    assert_eq!(terminals[1].collected_pot, 0);
    assert_eq!(terminals[1].stack(0), 1000);
    assert_eq!(terminals[1].stack(1), 1000);
    assert_conserved(&hand, &frames);
}

#[test]
fn unresolved_hand_gets_no_terminal_snapshot() {
    // Two live players, no recorded winners: the sequence just ends.
    let hand = heads_up(vec![
        act(0, ActionKind::Call, Some(10)),
        act(1, ActionKind::Check, None),
    ]);
    let frames = hand.replay();
    assert_eq!(frames.len(), 4);
    assert!(!frames.iter().any(|frame| frame.description.contains("wins")));
}

#[test]
fn replay_is_deterministic() {
    let mut hand = heads_up(vec![
        act(0, ActionKind::Call, Some(10)),
        act(1, ActionKind::Check, None),
    ]);
    hand.flop_cards = cards(&["7d", "5h", "9d"]);
    hand.winners = vec![Winner { player: 1, amount: 40 }];
    assert_eq!(hand.replay(), hand.replay());
}

// ============================================================================
// Full Hand (PokerStars import end to end)
// ============================================================================

const PLURIBUS_HAND: &str = "\
PokerStars Hand #100000: Hold'em No Limit (50/100) - 2019/07/12 03:46:40 ET
Table 'Pluribus Session 100' 6-max Seat #6 is the button
Seat 1: MrBlue (10000 in chips)
Seat 2: MrBlonde (10000 in chips)
Seat 3: MrWhite (10000 in chips)
Seat 4: MrPink (10000 in chips)
Seat 5: MrBrown (10000 in chips)
Seat 6: Pluribus (10000 in chips)
MrBlue: posts small blind 50
MrBlonde: posts big blind 100
*** HOLE CARDS ***
Dealt to MrBlue [Tc Qc]
Dealt to MrPink [Ah 4h]
MrWhite: folds
MrPink: raises 110 to 210
MrBrown: folds
Pluribus: folds
MrBlue: calls 160
MrBlonde: folds
*** FLOP *** [7d 5h 9d]
MrBlue: checks
MrPink: checks
*** TURN *** [7d 5h 9d] [7c]
MrBlue: checks
MrPink: checks
*** RIVER *** [7d 5h 9d] [7c] [Qh]
MrBlue: bets 230
MrPink: folds
Uncalled bet (230) returned to MrBlue
MrBlue collected 520.0 from pot
*** SUMMARY ***
Total pot 520 | Rake 0
Board [7d 5h 9d 7c Qh]
";

#[test]
fn imported_hand_replays_to_the_recorded_result() {
    let phh = StarsHand::parse(PLURIBUS_HAND).unwrap().to_phh();
    let hand = HandHistory::from_phh_str(&phh).unwrap();
    let frames = hand.replay();
    assert_conserved(&hand, &frames);

    // Pot after the preflop sweep matches the site's accounting.
    let flop_reveal = frames
        .iter()
        .find(|frame| frame.description.starts_with("Flop:"))
        .unwrap();
    assert_eq!(flop_reveal.collected_pot, 520);

    // MrPink's river fold leaves MrBlue the lone survivor: his uncalled bet
    // comes back and he collects the recorded $520.
    let terminal = frames.last().unwrap();
    assert_eq!(terminal.description, "MrBlue wins $520");
    assert_eq!(terminal.stack(0), 10310);
    assert_eq!(terminal.stack(3), 9790);
    assert_eq!(terminal.collected_pot, 0);
}
