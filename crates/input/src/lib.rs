//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::Intent`] and [`crate::types::MenuAction`], and
//! recognizes swipe gestures from pointer samples (terminal mouse drags).

pub mod gesture;
pub mod map;

pub use blockfall_types as types;

pub use gesture::{classify_swipe, MouseSwipe, SwipeTracker, MOUSE_CELL_PX};
pub use map::{handle_key_event, handle_menu_key, map_key, should_quit, InputAction, KeyMode};
