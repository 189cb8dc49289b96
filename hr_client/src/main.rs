//! A hand replay TUI viewer.
//!
//! Loads a recorded hand from a local PHH file or from the replay backend,
//! then steps through its snapshot sequence in the terminal.

use anyhow::{Context, Result};
use pico_args::Arguments;
use std::io::{self, Write};
use std::path::PathBuf;

use hand_replay::HandHistory;
use hr_client::{api_client::ApiClient, tui_app::TuiApp};

const HELP: &str = "\
Step through a recorded poker hand

USAGE:
  hr_client [OPTIONS]

OPTIONS:
  --file   PATH         Replay a local .phh file
  --server URL          Fetch hands from a backend  [default: http://localhost:5000]
  --hand   ID           Hand id to fetch (skips the picker)

FLAGS:
  -h, --help            Print help information
";

struct Args {
    file: Option<PathBuf>,
    server_url: String,
    hand_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        file: pargs.opt_value_from_str("--file")?,
        server_url: pargs
            .value_from_str("--server")
            .unwrap_or_else(|_| "http://localhost:5000".to_string()),
        hand_id: pargs.opt_value_from_str("--hand")?,
    };

    let (title, hand) = load_hand(&args).await?;

    let terminal = ratatui::init();
    let result = TuiApp::new(title, hand).run(terminal);
    ratatui::restore();
    result
}

async fn load_hand(args: &Args) -> Result<(String, HandHistory)> {
    if let Some(path) = &args.file {
        let hand = HandHistory::from_phh_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        let title = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("hand")
            .to_string();
        return Ok((title, hand));
    }

    let api_client = ApiClient::new(args.server_url.clone());

    let hand_id = match &args.hand_id {
        Some(id) => id.clone(),
        None => pick_hand(&api_client).await?,
    };

    let hand = api_client
        .get_hand(&hand_id)
        .await
        .context("Failed to fetch hand")?;
    Ok((hand_id, hand))
}

/// Interactive hand picker over the backend's hand list.
async fn pick_hand(api_client: &ApiClient) -> Result<String> {
    let hands = api_client
        .list_hands()
        .await
        .context("Failed to list hands")?;

    if hands.is_empty() {
        anyhow::bail!("No hands available on the server");
    }

    println!("Available hands:");
    for (i, hand) in hands.iter().enumerate() {
        println!(
            "  {}. {} - {} players ({}) - Blinds: {}/{}",
            i + 1,
            hand.id,
            hand.num_players,
            hand.players.join(", "),
            hand.small_blind,
            hand.big_blind,
        );
    }

    print!("\nSelect hand (1-{}): ", hands.len());
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    let hand_index: usize = input.trim().parse().context("Invalid hand number")?;

    if hand_index == 0 || hand_index > hands.len() {
        anyhow::bail!("Invalid hand selection");
    }

    Ok(hands[hand_index - 1].id.clone())
}
