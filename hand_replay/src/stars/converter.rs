use regex::Regex;
use std::{collections::BTreeMap, sync::OnceLock};

use super::errors::{StarsError, StarsResult};
use crate::replay::entities::{Card, Street, Usd};

/// A player as listed in the seat lines.
#[derive(Clone, Debug)]
pub struct StarsPlayer {
    /// The site's 1-based seat number.
    pub seat: usize,
    pub name: String,
    pub starting_stack: Usd,
    pub hole_cards: Option<Vec<Card>>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StarsActionKind {
    PostSmallBlind,
    PostBigBlind,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl StarsActionKind {
    fn is_blind_post(self) -> bool {
        matches!(self, Self::PostSmallBlind | Self::PostBigBlind)
    }
}

/// One action line. Call amounts are increments; bet and blind amounts open
/// a street; raise amounts are the resulting street total, exactly as the
/// site reports them ("raises 110 to 210" stores 210).
#[derive(Clone, Debug)]
pub struct StarsAction {
    pub player: String,
    pub kind: StarsActionKind,
    pub amount: Option<Usd>,
    pub all_in: bool,
}

/// A parsed PokerStars hand, close to the text it came from. Convert with
/// [`StarsHand::to_phh`]; feed session stack tracking with
/// [`StarsHand::net_changes`].
#[derive(Clone, Debug, Default)]
pub struct StarsHand {
    pub hand_id: String,
    /// Table name; hands sharing it belong to one session.
    pub session: String,
    pub variant: String,
    pub small_blind: Usd,
    pub big_blind: Usd,
    pub ante: Usd,
    pub button_seat: usize,
    pub players: Vec<StarsPlayer>,
    pub actions: BTreeMap<Street, Vec<StarsAction>>,
    pub board_by_street: BTreeMap<Street, Vec<Card>>,
    pub board: Vec<Card>,
    /// (player, amount) pairs from "Uncalled bet (N) returned to" lines.
    pub uncalled: Vec<(String, Usd)>,
    /// (player, amount) pairs from "collected N from pot" lines, in order.
    pub collections: Vec<(String, Usd)>,
    pub total_pot: Usd,
    pub rake: Usd,
}

struct Patterns {
    hand_id: Regex,
    blinds: Regex,
    table: Regex,
    button: Regex,
    seat: Regex,
    dealt: Regex,
    post_sb: Regex,
    post_bb: Regex,
    fold: Regex,
    check: Regex,
    call: Regex,
    bet: Regex,
    raise: Regex,
    bracket: Regex,
    uncalled: Regex,
    collected: Regex,
    total_pot: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let compile = |pattern| Regex::new(pattern).expect("hardcoded pattern");
        Patterns {
            hand_id: compile(r"Hand #(\d+):"),
            blinds: compile(r"\((\d+)/(\d+)\)"),
            table: compile(r"Table '([^']+)'"),
            button: compile(r"Seat #(\d+) is the button"),
            seat: compile(r"Seat (\d+): (\w+) \((\d+) in chips\)"),
            dealt: compile(r"Dealt to (\w+) \[([^\]]+)\]"),
            post_sb: compile(r"(\w+): posts small blind (\d+)"),
            post_bb: compile(r"(\w+): posts big blind (\d+)"),
            fold: compile(r"(\w+): folds"),
            check: compile(r"(\w+): checks"),
            call: compile(r"(\w+): calls (\d+)"),
            bet: compile(r"(\w+): bets (\d+)"),
            raise: compile(r"(\w+): raises (\d+) to (\d+)"),
            bracket: compile(r"\[([^\]]+)\]"),
            uncalled: compile(r"Uncalled bet \((\d+)\) returned to (\w+)"),
            collected: compile(r"(\w+) collected (\d+)(?:\.0)? from pot"),
            total_pot: compile(r"Total pot (\d+)(?:\.0)?\s*\|\s*Rake (\d+)"),
        }
    })
}

fn parse_cards(list: &str) -> StarsResult<Vec<Card>> {
    list.split_whitespace()
        .map(|code| code.parse().map_err(StarsError::from))
        .collect()
}

impl StarsHand {
    /// Parse one complete hand from the site's text export.
    pub fn parse(text: &str) -> StarsResult<Self> {
        let p = patterns();
        if !text.trim_start().starts_with("PokerStars Hand") {
            return Err(StarsError::MissingHeader);
        }

        let mut hand = Self {
            variant: "NT".to_string(),
            ..Self::default()
        };
        let mut street = Street::Preflop;
        let mut in_summary = false;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with("PokerStars Hand") {
                if let Some(captures) = p.hand_id.captures(line) {
                    hand.hand_id = captures[1].to_string();
                }
                if let Some(captures) = p.blinds.captures(line) {
                    hand.small_blind = captures[1].parse().unwrap_or(0);
                    hand.big_blind = captures[2].parse().unwrap_or(0);
                }
            } else if let Some(captures) = p.table.captures(line) {
                hand.session = captures[1].to_string();
                if let Some(captures) = p.button.captures(line) {
                    hand.button_seat = captures[1].parse().unwrap_or(0);
                }
            } else if line.starts_with("Seat ") && !in_summary {
                if let Some(captures) = p.seat.captures(line) {
                    hand.players.push(StarsPlayer {
                        seat: captures[1].parse().unwrap_or(0),
                        name: captures[2].to_string(),
                        starting_stack: captures[3].parse().unwrap_or(0),
                        hole_cards: None,
                    });
                }
            } else if line.starts_with("Dealt to") {
                if let Some(captures) = p.dealt.captures(line) {
                    let cards = parse_cards(&captures[2])?;
                    let name = &captures[1];
                    match hand.players.iter_mut().find(|p| p.name == name) {
                        Some(player) => player.hole_cards = Some(cards),
                        None => log::warn!("hole cards dealt to unseated player {name}"),
                    }
                }
            } else if line.starts_with("*** FLOP ***") {
                street = Street::Flop;
                hand.record_reveal(street, line, false)?;
            } else if line.starts_with("*** TURN ***") {
                street = Street::Turn;
                hand.record_reveal(street, line, true)?;
            } else if line.starts_with("*** RIVER ***") {
                street = Street::River;
                hand.record_reveal(street, line, true)?;
            } else if line.starts_with("*** SUMMARY ***") {
                in_summary = true;
            } else if in_summary {
                if let Some(captures) = p.total_pot.captures(line) {
                    hand.total_pot = captures[1].parse().unwrap_or(0);
                    hand.rake = captures[2].parse().unwrap_or(0);
                }
                if line.starts_with("Board") {
                    if let Some(captures) = p.bracket.captures(line) {
                        hand.board = parse_cards(&captures[1])?;
                    }
                }
            } else if let Some(captures) = p.uncalled.captures(line) {
                hand.uncalled
                    .push((captures[2].to_string(), captures[1].parse().unwrap_or(0)));
            } else if let Some(captures) = p.collected.captures(line) {
                hand.collections
                    .push((captures[1].to_string(), captures[2].parse().unwrap_or(0)));
            } else if line.contains(':') {
                hand.parse_action(line, street);
            }
        }

        Ok(hand)
    }

    /// Street reveal lines carry the full prior board in one bracket and the
    /// new card(s) in the last; the flop's single bracket IS the new cards.
    fn record_reveal(&mut self, street: Street, line: &str, last_bracket: bool) -> StarsResult<()> {
        let p = patterns();
        let bracket = if last_bracket {
            p.bracket.captures_iter(line).last()
        } else {
            p.bracket.captures_iter(line).next()
        };
        if let Some(captures) = bracket {
            let cards = parse_cards(&captures[1])?;
            self.board.extend_from_slice(&cards);
            self.board_by_street.insert(street, cards);
        }
        Ok(())
    }

    fn parse_action(&mut self, line: &str, street: Street) {
        let p = patterns();
        let parsed = if let Some(c) = p.post_sb.captures(line) {
            Some((c[1].to_string(), StarsActionKind::PostSmallBlind, c[2].parse().ok()))
        } else if let Some(c) = p.post_bb.captures(line) {
            Some((c[1].to_string(), StarsActionKind::PostBigBlind, c[2].parse().ok()))
        } else if line.contains(": folds") {
            p.fold
                .captures(line)
                .map(|c| (c[1].to_string(), StarsActionKind::Fold, None))
        } else if line.contains(": checks") {
            p.check
                .captures(line)
                .map(|c| (c[1].to_string(), StarsActionKind::Check, None))
        } else if line.contains(": calls") {
            p.call
                .captures(line)
                .map(|c| (c[1].to_string(), StarsActionKind::Call, c[2].parse().ok()))
        } else if line.contains(": bets") {
            p.bet
                .captures(line)
                .map(|c| (c[1].to_string(), StarsActionKind::Bet, c[2].parse().ok()))
        } else if line.contains(": raises") {
            // Keep the "to" total; emission converts it to an increment.
            p.raise
                .captures(line)
                .map(|c| (c[1].to_string(), StarsActionKind::Raise, c[3].parse().ok()))
        } else {
            None
        };

        if let Some((player, kind, amount)) = parsed {
            self.actions.entry(street).or_default().push(StarsAction {
                player,
                kind,
                amount,
                all_in: line.contains("and is all-in"),
            });
        }
    }

    fn player_index(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    /// Emit the hand as a PHH TOML document. Blind posts become the
    /// `blinds_or_straddles` vector rather than preflop actions, and raise
    /// totals are rewritten as incremental contributions.
    #[must_use]
    pub fn to_phh(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("variant = \"{}\"", self.variant));
        lines.push("ante_trimming_status = true".to_string());
        let antes: Vec<String> = self.players.iter().map(|_| self.ante.to_string()).collect();
        lines.push(format!("antes = [{}]", antes.join(", ")));

        // Blind posters keep their recorded amounts, everyone else zero.
        let mut blinds = vec![0; self.players.len()];
        for action in self.actions.get(&Street::Preflop).into_iter().flatten() {
            if let (true, Some(index)) =
                (action.kind.is_blind_post(), self.player_index(&action.player))
            {
                blinds[index] = match action.kind {
                    StarsActionKind::PostSmallBlind => self.small_blind,
                    _ => self.big_blind,
                };
            }
        }
        let blinds: Vec<String> = blinds.iter().map(Usd::to_string).collect();
        lines.push(format!("blinds_or_straddles = [{}]", blinds.join(", ")));
        lines.push(format!("min_bet = {}", self.big_blind));

        let stacks: Vec<String> = self
            .players
            .iter()
            .map(|p| p.starting_stack.to_string())
            .collect();
        lines.push(format!("starting_stacks = [{}]", stacks.join(", ")));
        lines.push("starting_board = []".to_string());

        for (street, key) in [
            (Street::Flop, "flop_cards"),
            (Street::Turn, "turn_cards"),
            (Street::River, "river_cards"),
        ] {
            if let Some(cards) = self.board_by_street.get(&street) {
                lines.push(format!("{key} = [{}]", quoted_codes(cards)));
            }
        }
        if !self.board.is_empty() {
            lines.push(format!("board = [{}]", quoted_codes(&self.board)));
        }

        for (index, player) in self.players.iter().enumerate() {
            lines.push(String::new());
            lines.push(format!("[players.{index}]"));
            lines.push(format!("name = \"{}\"", player.name));
            lines.push(format!("starting_stack = {}", player.starting_stack));
            if let Some(cards) = &player.hole_cards {
                lines.push(format!("hole_cards = [{}]", quoted_codes(cards)));
            }
        }

        lines.push(String::new());
        lines.push("[actions]".to_string());
        for street in Street::ALL {
            let Some(actions) = self.actions.get(&street) else {
                continue;
            };
            // Running street contribution per player, seeded with the blinds,
            // so raise totals convert to increments.
            let mut contributed: BTreeMap<&str, Usd> = BTreeMap::new();
            let mut entries = Vec::new();
            for action in actions {
                if action.kind.is_blind_post() {
                    contributed.insert(&action.player, action.amount.unwrap_or(0));
                    continue;
                }
                let Some(index) = self.player_index(&action.player) else {
                    continue;
                };
                let put_in = contributed.entry(&action.player).or_default();
                let entry = match (action.kind, action.amount) {
                    (StarsActionKind::Fold, _) => {
                        format!("{{ player = {index}, action = \"fold\" }}")
                    }
                    (StarsActionKind::Check, _) => {
                        format!("{{ player = {index}, action = \"check\" }}")
                    }
                    (StarsActionKind::Call, Some(amount)) => {
                        *put_in += amount;
                        format!("{{ player = {index}, action = \"call\", amount = {amount} }}")
                    }
                    (StarsActionKind::Bet, Some(amount)) => {
                        *put_in += amount;
                        format!("{{ player = {index}, action = \"bet\", amount = {amount} }}")
                    }
                    (StarsActionKind::Raise, Some(total)) => {
                        let increment = total.saturating_sub(*put_in);
                        *put_in = total;
                        format!("{{ player = {index}, action = \"raise\", amount = {increment} }}")
                    }
                    _ => continue,
                };
                entries.push(entry);
            }
            if !entries.is_empty() {
                lines.push(format!("{} = [", street.key()));
                for entry in entries {
                    lines.push(format!("  {entry},"));
                }
                lines.push("]".to_string());
            }
        }

        for (name, amount) in &self.collections {
            match self.player_index(name) {
                Some(index) => {
                    lines.push(String::new());
                    lines.push("[[winners]]".to_string());
                    lines.push(format!("player = {index}"));
                    lines.push(format!("amount = {amount}"));
                }
                None => log::warn!("hand {}: collection by unseated player {name}", self.hand_id),
            }
        }

        lines.join("\n")
    }

    /// Net chip change per player over the hand: collections minus chips
    /// committed, with uncalled bets credited back. Drives running session
    /// stacks during batch conversion.
    #[must_use]
    pub fn net_changes(&self) -> BTreeMap<String, i64> {
        let mut committed: BTreeMap<&str, i64> = BTreeMap::new();
        for actions in self.actions.values() {
            // Per-street totals; the site's raise lines carry the total, so
            // set semantics apply everywhere except incremental calls.
            let mut street: BTreeMap<&str, i64> = BTreeMap::new();
            for action in actions {
                let amount = i64::from(action.amount.unwrap_or(0));
                let entry = street.entry(&action.player).or_default();
                match action.kind {
                    StarsActionKind::Call => *entry += amount,
                    StarsActionKind::PostSmallBlind
                    | StarsActionKind::PostBigBlind
                    | StarsActionKind::Bet
                    | StarsActionKind::Raise => *entry = amount,
                    StarsActionKind::Fold | StarsActionKind::Check => {}
                }
            }
            for (name, total) in street {
                *committed.entry(name).or_default() += total;
            }
        }
        for (name, amount) in &self.uncalled {
            *committed.entry(name).or_default() -= i64::from(*amount);
        }

        let mut net: BTreeMap<String, i64> = self
            .players
            .iter()
            .map(|p| {
                let committed = committed.get(p.name.as_str()).copied().unwrap_or(0);
                (p.name.clone(), -committed)
            })
            .collect();
        for (name, amount) in &self.collections {
            *net.entry(name.clone()).or_default() += i64::from(*amount);
        }
        net
    }
}

fn quoted_codes(cards: &[Card]) -> String {
    let codes: Vec<String> = cards.iter().map(|card| format!("\"{}\"", card.code())).collect();
    codes.join(", ")
}
