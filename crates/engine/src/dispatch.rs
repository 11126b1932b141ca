//! Intent dispatch table.
//!
//! Each intent maps to exactly one session operation. The table is the only
//! place input reaches the session.

use crate::core::GameSession;
use crate::types::Intent;

pub type IntentHandler = fn(&mut GameSession) -> bool;

fn move_left(session: &mut GameSession) -> bool {
    session.move_piece(-1, 0)
}

fn move_right(session: &mut GameSession) -> bool {
    session.move_piece(1, 0)
}

fn soft_drop(session: &mut GameSession) -> bool {
    session.move_piece(0, 1)
}

fn rotate(session: &mut GameSession) -> bool {
    session.rotate()
}

/// Indexed by the intent's discriminant, in `Intent::ALL` order.
const INTENT_TABLE: [IntentHandler; Intent::ALL.len()] = [move_left, move_right, soft_drop, rotate];

/// Apply an intent; returns whether the piece moved or rotated.
pub fn dispatch_intent(session: &mut GameSession, intent: Intent) -> bool {
    INTENT_TABLE[intent as usize](session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pieces::definition;
    use crate::types::PieceKind;

    #[test]
    fn test_discriminants_index_the_table() {
        for (i, intent) in Intent::ALL.iter().enumerate() {
            assert_eq!(*intent as usize, i);
        }
    }

    #[test]
    fn test_each_intent_reaches_its_own_handler() {
        // Only a right move lands at x = 4 from the T spawn at x = 3.
        let moved_to = |intent| {
            let mut session = GameSession::new(20, 10, 1);
            session.spawn_piece(definition(PieceKind::T));
            dispatch_intent(&mut session, intent);
            let active = session.active().unwrap();
            (active.x, active.y, active.shape.width())
        };
        assert_eq!(moved_to(Intent::MoveLeft), (2, 0, 3));
        assert_eq!(moved_to(Intent::MoveRight), (4, 0, 3));
        assert_eq!(moved_to(Intent::SoftDrop), (3, 1, 3));
        assert_eq!(moved_to(Intent::Rotate), (3, 0, 2));
    }

    #[test]
    fn test_dispatch_moves_piece() {
        let mut session = GameSession::new(20, 10, 1);
        assert!(session.spawn_piece(definition(PieceKind::T)));

        assert!(dispatch_intent(&mut session, Intent::MoveRight));
        assert_eq!(session.active().unwrap().x, 4);
        assert!(dispatch_intent(&mut session, Intent::MoveLeft));
        assert_eq!(session.active().unwrap().x, 3);
        assert!(dispatch_intent(&mut session, Intent::SoftDrop));
        assert_eq!(session.active().unwrap().y, 1);
        assert!(dispatch_intent(&mut session, Intent::Rotate));
        assert_eq!(session.active().unwrap().shape.width(), 2);
    }

    #[test]
    fn test_soft_drop_on_floor_locks() {
        let mut session = GameSession::new(20, 10, 1);
        assert!(session.spawn_piece(definition(PieceKind::O)));
        for _ in 0..18 {
            assert!(dispatch_intent(&mut session, Intent::SoftDrop));
        }
        assert!(!dispatch_intent(&mut session, Intent::SoftDrop));
        assert_eq!(session.pieces_locked(), 1);
    }
}
