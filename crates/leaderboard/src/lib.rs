//! Leaderboard module - remote high scores over HTTP
//!
//! The game submits a final score with three initials and shows the top ten
//! entries. Both sides live here:
//!
//! - **Client**: [`HttpLeaderboard`] behind the [`LeaderboardClient`] trait
//! - **Runtime**: [`LeaderboardRuntime`] runs calls on a tokio runtime and
//!   hands results back to the sync game loop as [`LeaderboardEvent`]s
//! - **Service**: [`server::router`], an axum app with an in-memory table
//!
//! # Wire Format
//!
//! ```text
//! POST /submit_score      {"initials":"ABC","score":140}
//!                      -> [{"id":1,"initials":"ABC","score":140,"timestamp":"..."}]
//! GET  /get_high_scores   -> [{"id":1,"initials":"ABC","score":140,"timestamp":"..."}]
//! POST /submit_score      {"initials":"","score":0}
//!                      -> 400 {"error":"Invalid input"}
//! ```
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_LEADERBOARD_URL`: Service root (default: "http://localhost:420")
//! - `BLOCKFALL_LEADERBOARD_TIMEOUT_MS`: Per-request timeout (default: 5000)
//! - `BLOCKFALL_LEADERBOARD_DISABLED`: Set to "1" or "true" to make no calls
//! - `BLOCKFALL_SERVER_ADDR` / `BLOCKFALL_SERVER_PORT`: Service bind address
//!   (default: "0.0.0.0:420")
//!
//! Failures are logged and reported as events; nothing is retried.

pub mod client;
pub mod config;
pub mod entry;
pub mod error;
pub mod runtime;
pub mod server;

pub use blockfall_types as types;

pub use client::{HttpLeaderboard, LeaderboardClient};
pub use config::LeaderboardConfig;
pub use entry::{Initials, ScoreEntry};
pub use error::LeaderboardError;
pub use runtime::{
    run_request, LeaderboardEvent, LeaderboardOp, LeaderboardRequest, LeaderboardRuntime,
};
pub use server::{AppState, HighScoreTable, ServerConfig, StoredScore};
