//! Engine module - drives one game from input to leaderboard.
//!
//! Sits between the pure core and the terminal: the [`Controller`] owns the
//! [`GameSession`](crate::core::GameSession), routes every [`Command`] into
//! it, and tracks the UI state around it (high-score overlay, initials
//! prompt). [`GravityTimer`] supplies the fixed tick cadence.

pub mod config;
pub mod controller;
pub mod dispatch;
pub mod prompt;
pub mod scores;
pub mod timer;

pub use blockfall_core as core;
pub use blockfall_leaderboard as leaderboard;
pub use blockfall_types as types;

pub use config::GameConfig;
pub use controller::{Command, Controller};
pub use dispatch::{dispatch_intent, IntentHandler};
pub use prompt::{ScorePrompt, PROMPT_MAX_CHARS};
pub use scores::HighScoresView;
pub use timer::GravityTimer;
