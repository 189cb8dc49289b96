//! Hand listing and replay API handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use hand_replay::{HandHistory, TableState, Usd};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct HandListItem {
    pub id: String,
    pub variant: String,
    pub num_players: usize,
    pub players: Vec<String>,
    pub small_blind: Usd,
    pub big_blind: Usd,
}

impl HandListItem {
    fn new(id: &str, hand: &HandHistory) -> Self {
        let blinds = hand.blind_levels();
        Self {
            id: id.to_string(),
            variant: hand.variant.clone(),
            num_players: hand.players.len(),
            players: hand.players.iter().map(|p| p.name.to_string()).collect(),
            small_blind: blinds.small,
            big_blind: blinds.big,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type NotFound = (StatusCode, Json<ErrorResponse>);

fn not_found(hand_id: &str) -> NotFound {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("no hand with id {hand_id}"),
        }),
    )
}

/// List all available hands with a short summary each.
pub async fn list_hands(State(state): State<AppState>) -> Json<Vec<HandListItem>> {
    let items = state
        .store
        .iter()
        .map(|(id, hand)| HandListItem::new(id, hand))
        .collect();
    Json(items)
}

/// Get one parsed hand record.
///
/// # Errors
///
/// - `404 Not Found`: no hand with the given id
pub async fn get_hand(
    State(state): State<AppState>,
    Path(hand_id): Path<String>,
) -> Result<Json<HandHistory>, NotFound> {
    state
        .store
        .get(&hand_id)
        .map(|hand| Json(hand.clone()))
        .ok_or_else(|| not_found(&hand_id))
}

/// Get the full replay sequence for a hand, so thin clients can step
/// through snapshots without an engine of their own.
///
/// # Errors
///
/// - `404 Not Found`: no hand with the given id
pub async fn get_replay(
    State(state): State<AppState>,
    Path(hand_id): Path<String>,
) -> Result<Json<Vec<TableState>>, NotFound> {
    state
        .store
        .get(&hand_id)
        .map(|hand| Json(hand.replay()))
        .ok_or_else(|| not_found(&hand_id))
}
