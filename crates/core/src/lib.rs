//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules and the state of one game. It has no
//! dependencies on the terminal, the network, or the clock, which makes it:
//!
//! - **Deterministic**: Same seed and same calls produce the same game
//! - **Testable**: Every rule is a plain method call on plain data
//! - **Portable**: The terminal frontend is only one possible driver
//!
//! # Module Structure
//!
//! - [`board`]: Grid of colored cells with occupancy queries and row clearing
//! - [`shape`]: Rectangular occupancy matrices and clockwise rotation
//! - [`pieces`]: The seven-piece catalog and uniform random selection
//! - [`piece`]: The falling piece and the collision rule
//! - [`scoring`]: Classic line-clear score table
//! - [`session`]: Piece lifecycle, locking, scoring, and game over
//!
//! # Game Rules
//!
//! - **Spawn**: Horizontally centered on the top row; a blocked spawn ends the game
//! - **Rotation**: Clockwise only, no wall kicks; a blocked rotation is discarded
//! - **Locking**: Immediate when a downward step is blocked, no lock delay
//! - **Randomizer**: Independent uniform draws from the catalog
//! - **Scoring**: 40 / 100 / 300 / 1200 for one to four rows
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//!
//! let mut game = GameSession::new(20, 10, 12345);
//! game.start();
//!
//! game.move_piece(1, 0);
//! game.rotate();
//!
//! // Gravity until the first piece lands
//! while game.tick() {}
//! assert_eq!(game.pieces_locked(), 1);
//! assert!(!game.is_over());
//! ```
//!
//! # Timing
//!
//! Nothing here reads a clock. The driver calls
//! [`GameSession::tick`](session::GameSession::tick) once per gravity
//! interval (500ms by default).

pub mod board;
pub mod piece;
pub mod pieces;
pub mod scoring;
pub mod session;
pub mod shape;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use piece::{check_collision, ActivePiece};
pub use pieces::{catalog, definition, spawn_definition, PieceDefinition};
pub use scoring::{accumulate, score_delta};
pub use session::{GameSession, LockEvent, Phase};
pub use shape::{Shape, ShapeError};
