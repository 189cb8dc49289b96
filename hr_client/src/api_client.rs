//! HTTP API client for the hand replay backend.

use anyhow::{Context, Result};
use serde::Deserialize;

use hand_replay::{HandHistory, Usd};

/// API client for communicating with the backend
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
pub struct HandInfo {
    pub id: String,
    pub variant: String,
    pub num_players: usize,
    pub players: Vec<String>,
    pub small_blind: Usd,
    pub big_blind: Usd,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// List all available hands
    pub async fn list_hands(&self) -> Result<Vec<HandInfo>> {
        let response = self
            .client
            .get(format!("{}/api/hands", self.base_url))
            .send()
            .await
            .context("Failed to list hands")?;

        let hands: Vec<HandInfo> = response
            .json()
            .await
            .context("Failed to parse hand list")?;

        Ok(hands)
    }

    /// Fetch one hand record by id
    pub async fn get_hand(&self, hand_id: &str) -> Result<HandHistory> {
        let response = self
            .client
            .get(format!("{}/api/hands/{hand_id}", self.base_url))
            .send()
            .await
            .context("Failed to fetch hand")?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
            anyhow::bail!("Fetching hand failed: {error_text}");
        }

        let hand: HandHistory = response
            .json()
            .await
            .context("Failed to parse hand")?;

        Ok(hand)
    }
}
