//! High-score service binary.
//!
//! Serves `POST /submit_score` and `GET /get_high_scores` from memory.
//! Logs to stderr at `info` unless `RUST_LOG` says otherwise.

use anyhow::Result;
use env_logger::Env;

use blockfall::leaderboard::server::{serve, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();
    log::info!("starting high-score service on {}", config.addr);
    let result = serve(config).await;
    if let Err(err) = &result {
        log::error!("high-score service stopped: {:#}", err);
    }
    result
}
