//! Leaderboard errors

use thiserror::Error;

/// Everything that can go wrong talking to (or preparing a call for) the
/// high-score service.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    /// Initials were not exactly three characters after trimming.
    #[error("Please enter exactly 3 initials")]
    InvalidInitials,

    /// Calls are turned off by configuration
    #[error("leaderboard is disabled")]
    Disabled,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}
