//! Step-through TUI for a recorded hand.
//!
//! Owns an integer cursor into the replay sequence and re-renders the whole
//! table from the single snapshot under the cursor plus the static hand
//! record. The cursor's direction of travel is tracked purely by comparing
//! indices; it only influences presentation (the sweep indicator), never
//! the rendered state itself.

use anyhow::Result;
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, Event, KeyCode, KeyEventKind},
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Cell, List, ListDirection, ListItem, Padding, Paragraph, Row, Table},
};

use hand_replay::{Card, HandHistory, SeatIndex, Suit, TableState};

/// Role labels for the supported six-seat layout. Keyed by seat index only,
/// never by name, so the mapping is stable across hands.
pub const SEAT_LABELS: [&str; 6] = ["SB", "BB", "UTG", "MP", "CO", "BTN"];

/// Role label for a seat; larger layouts degrade to numbered seats.
#[must_use]
pub fn seat_label(seat_idx: SeatIndex) -> String {
    SEAT_LABELS
        .get(seat_idx)
        .map_or_else(|| format!("S{seat_idx}"), |label| (*label).to_string())
}

fn make_card_span(card: &Card) -> Span<'static> {
    let Card(.., suit) = card;
    let repr = card.to_string();
    match suit {
        Suit::Club => Span::styled(repr, Style::default().light_green()),
        Suit::Diamond => Span::styled(repr, Style::default().light_blue()),
        Suit::Heart => Span::styled(repr, Style::default().light_red()),
        Suit::Spade => Span::raw(repr),
    }
}

fn make_board_spans(state: &TableState) -> Vec<Span<'_>> {
    (!state.board.is_empty())
        .then(|| {
            std::iter::once(" board: ".into()).chain(
                state
                    .board
                    .iter()
                    .flat_map(|card| vec![make_card_span(card), "  ".into()]),
            )
        })
        .into_iter()
        .flatten()
        .collect()
}

/// TUI App state
pub struct TuiApp {
    title: String,
    hand: HandHistory,
    frames: Vec<TableState>,
    /// Index of the snapshot currently rendered.
    cursor: usize,
    /// Whether the last cursor move was a step forward. Presentation-only:
    /// chooses the sweep indicator in the status bar.
    forward: bool,
}

impl TuiApp {
    #[must_use]
    pub fn new(title: String, hand: HandHistory) -> Self {
        let frames = hand.replay();
        Self {
            title,
            hand,
            frames,
            cursor: 0,
            forward: true,
        }
    }

    /// The snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> &TableState {
        &self.frames[self.cursor]
    }

    pub fn step_forward(&mut self) {
        if self.cursor + 1 < self.frames.len() {
            self.cursor += 1;
            self.forward = true;
        }
    }

    pub fn step_back(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.forward = false;
        }
    }

    pub fn jump_to_first(&mut self) {
        self.forward = self.cursor == 0;
        self.cursor = 0;
    }

    pub fn jump_to_last(&mut self) {
        self.forward = true;
        self.cursor = self.frames.len() - 1;
    }

    /// Run the viewer until the user quits.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => break,
                    KeyCode::Right | KeyCode::Char('l') => self.step_forward(),
                    KeyCode::Left | KeyCode::Char('h') => self.step_back(),
                    KeyCode::Home | KeyCode::Char('g') => self.jump_to_first(),
                    KeyCode::End | KeyCode::Char('G') => self.jump_to_last(),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        let [table_area, log_area, help_area] = Layout::vertical([
            Constraint::Length(self.hand.players.len() as u16 + 4),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.draw_table(frame, table_area);
        self.draw_log(frame, log_area);
        self.draw_help_bar(frame, help_area);
    }

    /// Create a table row for a single seat
    fn make_seat_row(&self, seat_idx: SeatIndex) -> Row<'_> {
        let state = self.current();
        let player = &self.hand.players[seat_idx];

        let move_repr = if state.active_seat == Some(seat_idx) {
            "→"
        } else {
            ""
        };
        let bet = state.live_bet(seat_idx);
        let bet_repr = if bet > 0 {
            format!("${bet}")
        } else {
            String::new()
        };
        let action_repr = state
            .last_action(seat_idx)
            .map_or_else(String::new, ToString::to_string);

        let mut row = vec![
            Cell::new(Text::from(move_repr).alignment(Alignment::Center)),
            Cell::new(Text::from(seat_label(seat_idx)).alignment(Alignment::Left)),
            Cell::new(Text::from(player.name.to_string()).alignment(Alignment::Left)),
            Cell::new(
                Text::from(format!("${}", state.stack(seat_idx))).alignment(Alignment::Right),
            ),
            Cell::new(Text::from(bet_repr).alignment(Alignment::Right)),
            Cell::new(Text::from(action_repr).alignment(Alignment::Left)),
        ];

        // Hole cards, once dealt and only where the record knows them.
        for card_idx in 0..2 {
            let card_repr = state
                .cards_dealt
                .then(|| player.hole_cards.as_ref())
                .flatten()
                .map(|cards| make_card_span(&cards[card_idx]))
                .unwrap_or_else(|| "".into());
            row.push(Cell::new(Text::from(card_repr).alignment(Alignment::Right)));
        }

        let mut row = Row::new(row);
        if state.active_seat == Some(seat_idx) {
            row = row.bold().white();
        }
        row
    }

    /// Render the main table with all seats
    fn draw_table(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let state = self.current();
        let table = Table::new(
            (0..self.hand.players.len()).map(|seat_idx| self.make_seat_row(seat_idx)),
            [
                Constraint::Max(3),
                Constraint::Fill(1),
                Constraint::Fill(2),
                Constraint::Fill(1),
                Constraint::Fill(1),
                Constraint::Fill(2),
                Constraint::Fill(1),
                Constraint::Fill(1),
            ],
        )
        .block(
            Block::bordered()
                .padding(Padding::uniform(1))
                .title_top(make_board_spans(state))
                .title_bottom(format!(
                    " {}  blinds: {}  pot: ${}  ",
                    self.title,
                    self.hand.blind_levels(),
                    state.collected_pot,
                )),
        );
        frame.render_widget(table, area);
    }

    /// Render the step log up to the cursor
    fn draw_log(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let items: Vec<ListItem> = self.frames[..=self.cursor]
            .iter()
            .enumerate()
            .rev()
            .map(|(step, state)| {
                let line = Line::from(vec![
                    Span::styled(format!("{step:>3}  "), Style::default().dark_gray()),
                    if step == self.cursor {
                        state.description.clone().bold().white()
                    } else {
                        state.description.clone().into()
                    },
                ]);
                ListItem::new(line)
            })
            .collect();
        let log = List::new(items)
            .direction(ListDirection::TopToBottom)
            .block(Block::bordered().title(" steps  "));
        frame.render_widget(log, area);
    }

    /// Render the status/help bar at the bottom
    fn draw_help_bar(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let direction_indicator = if self.forward {
            "▶ forward".green()
        } else {
            "◀ rewind".yellow()
        };

        let help_message = vec![
            format!("step {}/{} ", self.cursor + 1, self.frames.len()).into(),
            direction_indicator,
            " | ".into(),
            "←/→".bold().white(),
            " step, ".into(),
            "Home/End".bold().white(),
            " jump, ".into(),
            "q".bold().white(),
            " to quit".into(),
        ];
        let help_message = Paragraph::new(Line::from(help_message));
        frame.render_widget(help_message, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_replay::{Action, ActionKind, Player, Street, Username};
    use std::collections::BTreeMap;

    fn fold_out_hand() -> HandHistory {
        HandHistory {
            variant: "NT".to_string(),
            blinds: vec![10, 20],
            players: vec![
                Player {
                    seat_idx: 0,
                    name: Username::new("alice"),
                    starting_stack: 1000,
                    hole_cards: None,
                },
                Player {
                    seat_idx: 1,
                    name: Username::new("bob"),
                    starting_stack: 1000,
                    hole_cards: None,
                },
            ],
            actions: BTreeMap::from([(
                Street::Preflop,
                vec![Action {
                    player: 0,
                    action: ActionKind::Fold,
                    amount: None,
                }],
            )]),
            ..HandHistory::default()
        }
    }

    // === Seat Label Tests ===

    #[test]
    fn test_six_seat_labels() {
        assert_eq!(seat_label(0), "SB");
        assert_eq!(seat_label(1), "BB");
        assert_eq!(seat_label(5), "BTN");
    }

    #[test]
    fn test_label_fallback_past_six_seats() {
        assert_eq!(seat_label(6), "S6");
        assert_eq!(seat_label(8), "S8");
    }

    // === Cursor Tests ===

    #[test]
    fn test_new_app_starts_at_step_zero() {
        let app = TuiApp::new("test".to_string(), fold_out_hand());
        assert_eq!(app.cursor, 0);
        assert!(app.forward);
        assert!(!app.current().cards_dealt);
    }

    #[test]
    fn test_stepping_is_clamped_to_the_sequence() {
        let mut app = TuiApp::new("test".to_string(), fold_out_hand());
        app.step_back();
        assert_eq!(app.cursor, 0);

        app.jump_to_last();
        let last = app.cursor;
        app.step_forward();
        assert_eq!(app.cursor, last);
    }

    #[test]
    fn test_direction_tracks_cursor_movement() {
        let mut app = TuiApp::new("test".to_string(), fold_out_hand());
        app.step_forward();
        assert!(app.forward);
        app.step_back();
        assert!(!app.forward);
        app.jump_to_last();
        assert!(app.forward);
    }

    #[test]
    fn test_current_follows_the_cursor() {
        let mut app = TuiApp::new("test".to_string(), fold_out_hand());
        app.jump_to_last();
        assert_eq!(app.current().description, "bob wins $30");
    }
}
