//! Pieces module - the static catalog of spawnable pieces
//!
//! Seven tetromino definitions, each a spawn-orientation shape plus a palette
//! color. New pieces are drawn uniformly at random with independent draws.

use std::sync::OnceLock;

use rand::Rng;

use crate::shape::Shape;
use crate::types::{Color, PieceKind};

/// Immutable catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceDefinition {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: Color,
}

/// Spawn-orientation shape for a piece kind (top row first)
fn spawn_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_grid(&[[1, 1, 1, 1]]),
        PieceKind::O => Shape::from_grid(&[[1, 1], [1, 1]]),
        PieceKind::S => Shape::from_grid(&[[0, 1, 1], [1, 1, 0]]),
        PieceKind::Z => Shape::from_grid(&[[1, 1, 0], [0, 1, 1]]),
        PieceKind::J => Shape::from_grid(&[[1, 0, 0], [1, 1, 1]]),
        PieceKind::L => Shape::from_grid(&[[0, 0, 1], [1, 1, 1]]),
        PieceKind::T => Shape::from_grid(&[[0, 1, 0], [1, 1, 1]]),
    }
}

fn build_catalog() -> Vec<PieceDefinition> {
    PieceKind::ALL
        .iter()
        .map(|&kind| PieceDefinition {
            kind,
            shape: spawn_shape(kind),
            color: kind.color(),
        })
        .collect()
}

/// The full catalog, in order I, O, S, Z, J, L, T
pub fn catalog() -> &'static [PieceDefinition] {
    static CATALOG: OnceLock<Vec<PieceDefinition>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

/// Look up the definition for a piece kind
pub fn definition(kind: PieceKind) -> &'static PieceDefinition {
    let index = PieceKind::ALL
        .iter()
        .position(|&k| k == kind)
        .unwrap_or_default();
    &catalog()[index]
}

/// Pick a definition uniformly at random (independent draws, no bag)
pub fn spawn_definition<R: Rng + ?Sized>(rng: &mut R) -> &'static PieceDefinition {
    let pieces = catalog();
    &pieces[rng.gen_range(0..pieces.len())]
}
