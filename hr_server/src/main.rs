//! Hand replay backend server.
//!
//! Loads a directory of PHH hand files into memory and serves them (and
//! their computed replay sequences) over a small read-only HTTP API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Error};
use pico_args::Arguments;

use hr_server::{api, config::ServerConfig, logging, store::HandStore};

const HELP: &str = "\
Run a hand replay backend server

USAGE:
  hr_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:5000]
  --data-dir   DIR         Directory of .phh hands     [default: env HANDS_DATA_DIR or data/hands]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:5000)
  HANDS_DATA_DIR           Directory of .phh hand files
  RUST_LOG                 Log filter (e.g., debug)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let data_dir: Option<PathBuf> = pargs.opt_value_from_str("--data-dir")?;

    logging::init();

    let config = ServerConfig::from_env(bind, data_dir)?;
    tracing::info!("starting hand replay server at {}", config.bind);

    let store = HandStore::load_dir(&config.data_dir)
        .with_context(|| format!("failed to read {}", config.data_dir.display()))?;
    if store.is_empty() {
        tracing::warn!("no hands found in {}", config.data_dir.display());
    } else {
        tracing::info!(
            "loaded {} hand(s) from {}",
            store.len(),
            config.data_dir.display()
        );
    }

    let state = api::AppState {
        store: Arc::new(store),
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind))?;

    tracing::info!(
        "server is running at http://{}; press Ctrl+C to stop",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shutting down server");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
}
