//! Game session module - the complete state of one game
//!
//! Ties together the board, the falling piece, the catalog and scoring, and
//! runs the piece lifecycle:
//!
//! ```text
//! Ready -> Falling -> (lock, clear, spawn) -> Falling
//!                                          \-> GameOver
//! ```
//!
//! A downward move that fails locks the piece, clears full rows, adds the
//! score and spawns the next piece in the same call. A spawn that collides
//! ends the game; after that every move, rotation and tick is rejected.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::Board;
use crate::piece::ActivePiece;
use crate::pieces::{spawn_definition, PieceDefinition};
use crate::scoring::{accumulate, score_delta};
use crate::types::{BOARD_COLUMNS, BOARD_ROWS};

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, no piece spawned yet
    Ready,
    /// A piece is falling and accepts input
    Falling,
    /// A spawn collided; terminal
    GameOver,
}

/// Emitted each time a piece locks (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub score_delta: u32,
    /// The follow-up spawn collided
    pub game_over: bool,
}

/// One game, from first spawn to game over
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    active: Option<ActivePiece>,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    phase: Phase,
    last_event: Option<LockEvent>,
    rng: StdRng,
}

impl GameSession {
    /// Create a session on an empty `rows x columns` board
    pub fn new(rows: u16, columns: u16, seed: u64) -> Self {
        Self::with_board(Board::new(rows, columns), seed)
    }

    /// Create a session on an existing board (pre-filled setups)
    pub fn with_board(board: Board, seed: u64) -> Self {
        Self {
            board,
            active: None,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            phase: Phase::Ready,
            last_event: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Spawn the first piece. Does nothing once started.
    pub fn start(&mut self) {
        if self.phase != Phase::Ready {
            return;
        }
        self.spawn_next();
    }

    /// Empty the board and zero the score, keeping the random stream going.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.pieces_locked = 0;
        self.phase = Phase::Ready;
        self.last_event = None;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != Phase::Ready
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared this session
    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// The falling piece. After game over this is the spawn that collided.
    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for pre-filled setups.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Spawn a specific definition as the active piece.
    ///
    /// Returns false, and ends the game, if the spawn position collides.
    /// Rejected outright once the game is over.
    pub fn spawn_piece(&mut self, definition: &PieceDefinition) -> bool {
        if self.is_over() {
            return false;
        }

        let piece = ActivePiece::spawn(&self.board, definition);
        let blocked = piece.collides(&self.board);
        self.active = Some(piece);

        if blocked {
            self.phase = Phase::GameOver;
            log::info!(
                "spawn of {} blocked, game over with score {}",
                definition.kind.as_str(),
                self.score
            );
            return false;
        }

        self.phase = Phase::Falling;
        true
    }

    /// Spawn a random catalog piece
    fn spawn_next(&mut self) -> bool {
        let definition = spawn_definition(&mut self.rng);
        self.spawn_piece(definition)
    }

    /// Try to move the active piece.
    ///
    /// A blocked move with `dy > 0` means the piece has landed: it is locked,
    /// full rows are cleared, and the next piece spawns. The call still
    /// reports false since the piece itself did not move.
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        if active.try_move(&self.board, dx, dy) {
            return true;
        }

        if dy > 0 {
            self.lock_piece();
        }
        false
    }

    /// Try to rotate the active piece clockwise
    pub fn rotate(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        match self.active.as_mut() {
            Some(active) => active.try_rotate(&self.board),
            None => false,
        }
    }

    /// One gravity step. No-op once the game is over.
    pub fn tick(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        self.move_piece(0, 1)
    }

    /// Merge the active piece into the board, clear rows, score, respawn.
    ///
    /// Sub-cells above the top edge are dropped.
    pub fn lock_piece(&mut self) {
        if self.is_over() {
            return;
        }
        let Some(active) = self.active.take() else {
            return;
        };

        for (x, y) in active.cells() {
            if y >= 0 {
                self.board.set_cell(x, y, active.color);
            }
        }
        self.pieces_locked = self.pieces_locked.wrapping_add(1);

        let lines_cleared = self.board.clear_full_rows();
        let delta = score_delta(lines_cleared);
        self.score = accumulate(self.score, delta);
        self.lines = self.lines.saturating_add(lines_cleared as u32);

        let spawned = self.spawn_next();

        log::debug!(
            "locked piece #{} at ({}, {}): {} lines, +{}",
            self.pieces_locked,
            active.x,
            active.y,
            lines_cleared,
            delta
        );

        self.last_event = Some(LockEvent {
            lines_cleared: lines_cleared as u32,
            score_delta: delta,
            game_over: !spawned,
        });
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(BOARD_ROWS, BOARD_COLUMNS, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::definition;
    use crate::types::{Color, PieceKind};

    fn session_with(kind: PieceKind) -> GameSession {
        let mut state = GameSession::new(20, 10, 12345);
        assert!(state.spawn_piece(definition(kind)));
        state
    }

    #[test]
    fn test_new_session() {
        let state = GameSession::new(20, 10, 12345);
        assert_eq!(state.phase(), Phase::Ready);
        assert!(!state.started());
        assert!(!state.is_over());
        assert_eq!(state.score(), 0);
        assert_eq!(state.lines(), 0);
        assert!(state.active().is_none());
        assert_eq!(state.board().occupied_count(), 0);
    }

    #[test]
    fn test_start_spawns_piece() {
        let mut state = GameSession::new(20, 10, 12345);
        state.start();
        assert_eq!(state.phase(), Phase::Falling);
        assert!(state.active().is_some());
        assert_eq!(state.active().unwrap().y, 0);

        // A second start is ignored.
        let before = state.active().cloned();
        state.start();
        assert_eq!(state.active().cloned(), before);
    }

    #[test]
    fn test_moves_before_start_are_rejected() {
        let mut state = GameSession::new(20, 10, 1);
        assert!(!state.move_piece(1, 0));
        assert!(!state.rotate());
        assert!(!state.tick());
    }

    #[test]
    fn test_move_piece() {
        let mut state = session_with(PieceKind::T);
        let x = state.active().unwrap().x;

        assert!(state.move_piece(1, 0));
        assert_eq!(state.active().unwrap().x, x + 1);
        assert!(state.move_piece(-1, 0));
        assert_eq!(state.active().unwrap().x, x);
        assert!(state.move_piece(0, 1));
        assert_eq!(state.active().unwrap().y, 1);
    }

    #[test]
    fn test_move_left_stops_at_wall() {
        let mut state = session_with(PieceKind::O);
        let mut moved = 0;
        for _ in 0..10 {
            if state.move_piece(-1, 0) {
                moved += 1;
            }
        }
        // Spawned at x = 4
        assert_eq!(moved, 4);
        assert_eq!(state.active().unwrap().x, 0);
        assert_eq!(state.pieces_locked(), 0);
    }

    #[test]
    fn test_failed_upward_move_does_not_lock() {
        let mut state = session_with(PieceKind::I);
        for x in 0..10 {
            state.board_mut().set_cell(x, 5, Color::Red);
        }
        state.active.as_mut().unwrap().y = 6;
        assert!(!state.move_piece(0, -1));
        assert_eq!(state.pieces_locked(), 0);
        assert_eq!(state.active().unwrap().y, 6);
    }

    #[test]
    fn test_landing_locks_and_respawns() {
        let mut state = session_with(PieceKind::O);
        while state.move_piece(0, 1) {}

        assert_eq!(state.pieces_locked(), 1);
        assert_eq!(state.board().cell(4, 18), Some(Some(Color::Yellow)));
        assert_eq!(state.board().cell(5, 19), Some(Some(Color::Yellow)));
        assert_eq!(state.active().unwrap().y, 0);
        assert_eq!(state.phase(), Phase::Falling);

        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 0);
        assert_eq!(event.score_delta, 0);
        assert!(!event.game_over);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_rotate() {
        let mut state = session_with(PieceKind::T);
        state.move_piece(0, 1);
        let before = state.active().unwrap().shape.clone();
        assert!(state.rotate());
        assert_eq!(state.active().unwrap().shape, before.rotated_cw());
    }

    #[test]
    fn test_lock_clears_line_and_scores() {
        let mut state = session_with(PieceKind::I);
        // Bottom row filled except where the I piece lands (x = 3..=6).
        for x in (0..3).chain(7..10) {
            state.board_mut().set_cell(x, 19, Color::Red);
        }
        while state.move_piece(0, 1) {}

        assert_eq!(state.score(), 40);
        assert_eq!(state.lines(), 1);
        assert!(!state.board().is_row_full(19));
        assert_eq!(state.board().occupied_count(), 0);
        assert_eq!(
            state.take_last_event().map(|e| (e.lines_cleared, e.score_delta)),
            Some((1, 40))
        );
    }

    #[test]
    fn test_lock_drops_cells_above_top() {
        let mut state = session_with(PieceKind::T);
        state.active.as_mut().unwrap().y = -1;
        state.lock_piece();
        // Only the bottom row of the T (y = 0) reaches the board.
        assert_eq!(state.board().occupied_count(), 3);
    }

    #[test]
    fn test_game_over_on_blocked_spawn() {
        let mut state = session_with(PieceKind::O);
        // Every catalog piece spawns over columns 3..=6 of rows 0 and 1.
        for x in 3..7 {
            state.board_mut().set_cell(x, 0, Color::Blue);
            state.board_mut().set_cell(x, 1, Color::Blue);
        }
        // A ledge under the O parked in the corner makes it land at once.
        state.board_mut().set_cell(0, 2, Color::Blue);
        state.board_mut().set_cell(1, 2, Color::Blue);
        state.active.as_mut().unwrap().x = 0;

        assert!(!state.move_piece(0, 1));
        assert_eq!(state.pieces_locked(), 1);
        assert!(state.is_over());
        assert_eq!(state.phase(), Phase::GameOver);
        assert!(state.take_last_event().unwrap().game_over);
    }

    #[test]
    fn test_game_over_stops_everything() {
        let mut state = GameSession::new(20, 10, 3);
        for x in 0..10 {
            state.board_mut().set_cell(x, 0, Color::Green);
        }
        state.start();
        assert!(state.is_over());

        let snapshot = state.active().cloned();
        assert!(!state.move_piece(1, 0));
        assert!(!state.move_piece(0, 1));
        assert!(!state.rotate());
        assert!(!state.tick());
        assert!(!state.spawn_piece(definition(PieceKind::O)));
        assert_eq!(state.active().cloned(), snapshot);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_reset() {
        let mut state = session_with(PieceKind::O);
        while state.move_piece(0, 1) {}
        state.reset();
        assert_eq!(state.phase(), Phase::Ready);
        assert_eq!(state.board().occupied_count(), 0);
        assert_eq!(state.pieces_locked(), 0);
        state.start();
        assert_eq!(state.phase(), Phase::Falling);
    }
}
