use serde::Deserialize;
use std::{collections::BTreeMap, fs, path::Path};

use super::errors::{PhhError, PhhResult};
use crate::replay::entities::{Action, Card, HandHistory, Player, Street, Usd, Username, Winner};

/// Raw document shape. Everything is optional: absent keys fall back to the
/// same defaults the format has always implied (no antes, no blinds, empty
/// streets).
#[derive(Debug, Deserialize)]
struct PhhDocument {
    #[serde(default = "default_variant")]
    variant: String,
    #[serde(default)]
    antes: Vec<Usd>,
    #[serde(default)]
    blinds_or_straddles: Vec<Usd>,
    #[serde(default)]
    min_bet: Usd,
    #[serde(default)]
    starting_stacks: Vec<Usd>,
    #[serde(default)]
    flop_cards: Vec<Card>,
    #[serde(default)]
    turn_cards: Vec<Card>,
    #[serde(default)]
    river_cards: Vec<Card>,
    #[serde(default)]
    players: BTreeMap<String, PhhPlayer>,
    #[serde(default)]
    actions: BTreeMap<String, Vec<Action>>,
    #[serde(default)]
    winners: Vec<Winner>,
}

fn default_variant() -> String {
    "NT".to_string()
}

#[derive(Debug, Deserialize)]
struct PhhPlayer {
    name: Option<String>,
    starting_stack: Option<Usd>,
    hole_cards: Option<Vec<Card>>,
}

impl HandHistory {
    /// Parse a PHH document from its TOML text.
    pub fn from_phh_str(text: &str) -> PhhResult<Self> {
        let doc: PhhDocument = toml::from_str(text)?;
        doc.try_into()
    }

    /// Load a PHH document from a file.
    pub fn from_phh_file(path: impl AsRef<Path>) -> PhhResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| PhhError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_phh_str(&text)
    }
}

impl TryFrom<PhhDocument> for HandHistory {
    type Error = PhhError;

    fn try_from(doc: PhhDocument) -> PhhResult<Self> {
        // Player tables are keyed by stringified seat index; a missing index
        // still yields a seat with defaults, so seat order stays dense.
        let mut players = Vec::with_capacity(doc.players.len());
        for seat_idx in 0..doc.players.len() {
            let entry = doc.players.get(&seat_idx.to_string());
            let name = entry
                .and_then(|p| p.name.clone())
                .unwrap_or_else(|| format!("Player{seat_idx}"));
            let starting_stack = entry
                .and_then(|p| p.starting_stack)
                .or_else(|| doc.starting_stacks.get(seat_idx).copied())
                .unwrap_or(0);
            let hole_cards = match entry.and_then(|p| p.hole_cards.as_deref()) {
                None => None,
                Some(&[first, second]) => Some([first, second]),
                Some(cards) => {
                    return Err(PhhError::HoleCards {
                        seat_idx,
                        count: cards.len(),
                    });
                }
            };
            players.push(Player {
                seat_idx,
                name: Username::new(&name),
                starting_stack,
                hole_cards,
            });
        }

        // Keep the four known streets; anything else in the actions table is
        // ignored, matching how the format has always been read.
        let mut actions = BTreeMap::new();
        for street in Street::ALL {
            if let Some(list) = doc.actions.get(street.key()) {
                if !list.is_empty() {
                    actions.insert(street, list.clone());
                }
            }
        }

        Ok(Self {
            variant: doc.variant,
            antes: doc.antes,
            blinds: doc.blinds_or_straddles,
            min_bet: doc.min_bet,
            players,
            flop_cards: doc.flop_cards,
            turn_cards: doc.turn_cards,
            river_cards: doc.river_cards,
            actions,
            winners: doc.winners,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::entities::{ActionKind, Suit};

    const SAMPLE: &str = r#"
variant = "NT"
antes = [0, 0]
blinds_or_straddles = [50, 100]
min_bet = 100
starting_stacks = [10000, 10000]
flop_cards = ["7d", "5h", "9d"]
turn_cards = ["7c"]
river_cards = ["Qh"]

[players.0]
name = "MrBlue"
starting_stack = 10000
hole_cards = ["Tc", "Qc"]

[players.1]
name = "MrPink"
starting_stack = 10000
hole_cards = ["Ah", "4h"]

[actions]
preflop = [
  { player = 1, action = "raise", amount = 210 },
  { player = 0, action = "call", amount = 160 },
]
flop = [
  { player = 0, action = "check" },
  { player = 1, action = "check" },
]
river = [
  { player = 0, action = "bet", amount = 230 },
  { player = 1, action = "fold" },
]
"#;

    #[test]
    fn test_parses_sample_document() {
        let hand = HandHistory::from_phh_str(SAMPLE).unwrap();
        assert_eq!(hand.variant, "NT");
        assert_eq!(hand.blinds, vec![50, 100]);
        assert_eq!(hand.min_bet, 100);
        assert_eq!(hand.players.len(), 2);
        assert_eq!(hand.players[0].name.as_str(), "MrBlue");
        assert_eq!(
            hand.players[0].hole_cards,
            Some([Card(10, Suit::Club), Card(12, Suit::Club)])
        );
        assert_eq!(hand.flop_cards.len(), 3);
        assert_eq!(hand.actions(Street::Preflop).len(), 2);
        assert_eq!(hand.actions(Street::Preflop)[0].action, ActionKind::Raise);
        assert_eq!(hand.actions(Street::Preflop)[0].amount, Some(210));
        // Turn was never recorded; that's an empty street, not an error.
        assert!(hand.actions(Street::Turn).is_empty());
    }

    #[test]
    fn test_minimal_document_defaults() {
        let hand = HandHistory::from_phh_str("").unwrap();
        assert_eq!(hand.variant, "NT");
        assert!(hand.players.is_empty());
        assert!(hand.antes.is_empty());
        assert!(hand.winners.is_empty());
    }

    #[test]
    fn test_player_defaults_fill_missing_fields() {
        let hand = HandHistory::from_phh_str(
            r#"
starting_stacks = [500]

[players.0]
"#,
        )
        .unwrap();
        assert_eq!(hand.players[0].name.as_str(), "Player0");
        // Root starting_stacks backs a player table without its own stack.
        assert_eq!(hand.players[0].starting_stack, 500);
        assert!(hand.players[0].hole_cards.is_none());
    }

    #[test]
    fn test_bad_card_code_is_a_parse_error() {
        let result = HandHistory::from_phh_str(r#"flop_cards = ["7d", "xx", "9d"]"#);
        assert!(matches!(result, Err(PhhError::Toml(_))));
    }

    #[test]
    fn test_three_hole_cards_rejected() {
        let result = HandHistory::from_phh_str(
            r#"
[players.0]
hole_cards = ["Ah", "Kh", "Qh"]
"#,
        );
        assert!(matches!(
            result,
            Err(PhhError::HoleCards { seat_idx: 0, count: 3 })
        ));
    }

    #[test]
    fn test_winners_entries() {
        let hand = HandHistory::from_phh_str(
            r#"
[[winners]]
player = 0
amount = 50

[[winners]]
player = 1
amount = 50
"#,
        )
        .unwrap();
        assert_eq!(
            hand.winners,
            vec![
                Winner { player: 0, amount: 50 },
                Winner { player: 1, amount: 50 },
            ]
        );
    }
}
