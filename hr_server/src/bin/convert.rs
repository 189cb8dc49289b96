//! Batch convert PokerStars hand history exports to individual PHH files.
//!
//! Tracks running stacks per session so that each hand's `starting_stack`
//! reflects chips carried over from prior hands (the raw exports repeat the
//! configured buy-in for every player, which is incorrect mid-session).

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use anyhow::{Context, Error};
use log::{error, info, warn};
use pico_args::Arguments;

use hand_replay::StarsHand;

const HELP: &str = "\
Convert PokerStars hand history exports to PHH files

USAGE:
  convert [OPTIONS]

OPTIONS:
  --input      DIR         Directory of PokerStars .txt session files  [default: data/raw]
  --output     DIR         Directory to write .phh files into          [default: data/hands]

FLAGS:
  -h, --help               Print help information
";

struct Args {
    input: PathBuf,
    output: PathBuf,
}

fn main() -> Result<(), Error> {
    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        input: pargs
            .opt_value_from_str("--input")?
            .unwrap_or_else(|| PathBuf::from("data/raw")),
        output: pargs
            .opt_value_from_str("--output")?
            .unwrap_or_else(|| PathBuf::from("data/hands")),
    };

    env_logger::builder().format_target(false).init();

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;

    let mut files: Vec<PathBuf> = std::fs::read_dir(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();

    // Running stacks per session, keyed by player name.
    let mut session_stacks: HashMap<String, HashMap<String, i64>> = HashMap::new();
    let mut seen_hand_ids: HashSet<String> = HashSet::new();
    let mut converted = 0usize;
    let mut skipped = 0usize;

    for path in files {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        for chunk in content.split("\n\n") {
            let chunk = chunk.trim();
            if chunk.is_empty() || !chunk.starts_with("PokerStars Hand") {
                skipped += 1;
                continue;
            }

            let mut hand = match StarsHand::parse(chunk) {
                Ok(hand) => hand,
                Err(e) => {
                    error!("error converting hand from {}: {e}", path.display());
                    skipped += 1;
                    continue;
                }
            };
            if hand.hand_id.is_empty() || !seen_hand_ids.insert(hand.hand_id.clone()) {
                skipped += 1;
                continue;
            }

            // Override starting stacks from the session's running totals.
            if let Some(stacks) = session_stacks.get(&hand.session) {
                for player in &mut hand.players {
                    if let Some(stack) = stacks.get(&player.name) {
                        player.starting_stack = (*stack).max(0) as u32;
                    }
                }
            }

            let output_path = args.output.join(format!("{}.phh", hand.hand_id));
            if let Err(e) = std::fs::write(&output_path, hand.to_phh()) {
                error!("failed to write {}: {e}", output_path.display());
                skipped += 1;
                continue;
            }
            converted += 1;

            // Update running stacks for this session. Players first seen
            // mid-session enter at the stack this hand recorded for them.
            let hand_stacks: HashMap<String, i64> = hand
                .players
                .iter()
                .map(|p| (p.name.clone(), i64::from(p.starting_stack)))
                .collect();
            let stacks = session_stacks
                .entry(hand.session.clone())
                .or_insert_with(|| hand_stacks.clone());
            for (name, delta) in hand.net_changes() {
                let old = stacks
                    .get(&name)
                    .or_else(|| hand_stacks.get(&name))
                    .copied()
                    .unwrap_or(0);
                // Cap losses at the player's carried stack. The raw exports
                // record the full buy-in every hand, so recorded all-in
                // amounts can exceed a player's real carried-over stack.
                if old + delta < 0 {
                    warn!(
                        "hand {}: {name} lost more than the carried stack",
                        hand.hand_id
                    );
                }
                stacks.insert(name, (old + delta).max(0));
            }
        }
    }

    info!("converted: {converted}, skipped: {skipped}");
    Ok(())
}
