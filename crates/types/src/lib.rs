//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data with no external dependencies, so it can be
//! shared by the game core, the input layer, the renderer and the binaries.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (the board itself accepts any size):
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRAVITY_INTERVAL_MS` | 500 | One gravity step per interval |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, PieceKind, BOARD_COLUMNS, BOARD_ROWS};
//!
//! assert_eq!(PieceKind::T.color(), Color::Purple);
//! assert_eq!(Color::Purple.rgb(), (0x80, 0x00, 0x80));
//!
//! assert_eq!(BOARD_COLUMNS, 10);
//! assert_eq!(BOARD_ROWS, 20);
//! ```

/// Default board width in cells
pub const BOARD_COLUMNS: u16 = 10;

/// Default board height in cells
pub const BOARD_ROWS: u16 = 20;

/// Gravity cadence (milliseconds per downward step)
pub const GRAVITY_INTERVAL_MS: u64 = 500;

/// Minimum swipe travel along the dominant axis, in pixels
pub const SWIPE_THRESHOLD_PX: f32 = 30.0;

/// Required length of leaderboard initials
pub const INITIALS_LEN: usize = 3;

/// Number of entries the leaderboard keeps and returns
pub const HIGH_SCORE_LIMIT: usize = 10;

/// Line clear scoring table, indexed by lines cleared in one lock.
///
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Block palette. One color per catalog piece.
///
/// Colors are opaque identifiers as far as the game rules go; the RGB triple
/// exists for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Yellow,
    Green,
    Red,
    Blue,
    Orange,
    Purple,
}

impl Color {
    /// All palette entries in catalog order
    pub const ALL: [Color; 7] = [
        Color::Cyan,
        Color::Yellow,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::Orange,
        Color::Purple,
    ];

    /// Truecolor components
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Cyan => (0x00, 0xFF, 0xFF),
            Color::Yellow => (0xFF, 0xFF, 0x00),
            Color::Green => (0x00, 0xFF, 0x00),
            Color::Red => (0xFF, 0x00, 0x00),
            Color::Blue => (0x00, 0x00, 0xFF),
            Color::Orange => (0xFF, 0xA5, 0x00),
            Color::Purple => (0x80, 0x00, 0x80),
        }
    }
}

/// The seven catalog pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    S,
    Z,
    J,
    L,
    T,
}

impl PieceKind {
    /// All kinds in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Lowercase name, for log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::T => "t",
        }
    }

    /// Palette color used for this piece
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
            PieceKind::T => Color::Purple,
        }
    }
}

/// Discrete player intents.
///
/// Keyboard and swipe input both reduce to these; each intent maps to exactly
/// one move or rotate call on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (locks if it cannot)
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
}

impl Intent {
    pub const ALL: [Intent; 4] = [
        Intent::MoveLeft,
        Intent::MoveRight,
        Intent::SoftDrop,
        Intent::Rotate,
    ];
}

/// Non-gameplay actions: session lifecycle, score entry and overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Start a fresh session
    NewGame,
    /// Toggle the high score overlay (opening it refreshes the list)
    ToggleHighScores,
    /// Append a character to the initials prompt
    TypeChar(char),
    /// Delete the last character of the initials prompt
    Backspace,
    /// Submit the initials prompt
    SubmitScore,
    /// Close the initials prompt without submitting
    DismissPrompt,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Occupied, tagged with the locking piece's color
pub type Cell = Option<Color>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_line_score_table() {
        assert_eq!(LINE_SCORES, [0, 40, 100, 300, 1200]);
    }

    #[test]
    fn every_piece_has_a_distinct_color() {
        let mut colors: Vec<Color> = PieceKind::ALL.iter().map(|k| k.color()).collect();
        colors.dedup();
        assert_eq!(colors.len(), 7);
        assert_eq!(colors, Color::ALL.to_vec());
    }

    #[test]
    fn palette_rgb_is_distinct() {
        let mut seen: Vec<(u8, u8, u8)> = Color::ALL.iter().map(|c| c.rgb()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), Color::ALL.len());
        assert_eq!(Color::Orange.rgb(), (0xFF, 0xA5, 0x00));
    }
}
