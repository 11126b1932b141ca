//! Active piece module - the falling piece and its collision rule
//!
//! Positions are the top-left of the shape's bounding box in board
//! coordinates. Sub-cells above the top edge (negative y) are allowed; they
//! only collide through the side walls.

use crate::board::Board;
use crate::pieces::PieceDefinition;
use crate::shape::Shape;
use crate::types::Color;

/// Currently falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub shape: Shape,
    pub color: Color,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// Place a definition at the spawn position: horizontally centered, top row.
    ///
    /// `x = floor(columns / 2) - ceil(width / 2)`, `y = 0`. The spawn cells
    /// are not checked here; a colliding spawn is the game-over signal.
    pub fn spawn(board: &Board, definition: &PieceDefinition) -> Self {
        let width = definition.shape.width() as i32;
        Self {
            shape: definition.shape.clone(),
            color: definition.color,
            x: (board.columns() / 2) as i32 - (width + 1) / 2,
            y: 0,
        }
    }

    /// Board coordinates of every filled sub-cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Whether the piece overlaps a wall, the floor, or an occupied cell
    pub fn collides(&self, board: &Board) -> bool {
        check_collision(board, self)
    }

    /// Translate by (dx, dy). On collision the piece is left untouched and
    /// the call reports false.
    pub fn try_move(&mut self, board: &Board, dx: i32, dy: i32) -> bool {
        self.x += dx;
        self.y += dy;
        if self.collides(board) {
            self.x -= dx;
            self.y -= dy;
            return false;
        }
        true
    }

    /// Rotate a quarter turn clockwise in place. On collision the original
    /// shape is kept and the call reports false.
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let rotated = self.shape.rotated_cw();
        let original = std::mem::replace(&mut self.shape, rotated);
        if self.collides(board) {
            self.shape = original;
            return false;
        }
        true
    }
}

/// True iff any filled sub-cell lies at `x < 0`, `x >= columns`, `y >= rows`,
/// or on an occupied cell with `y >= 0`.
pub fn check_collision(board: &Board, piece: &ActivePiece) -> bool {
    piece.cells().any(|(x, y)| board.is_occupied(x, y))
}
