//! Single-step pieces: knight and king.

use super::{classify, MoveKind, MoveTarget};
use crate::board::{Board, BoardError, Occupant, PieceId};

pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

pub fn knight_targets(board: &Board, id: PieceId) -> Result<Vec<MoveTarget>, BoardError> {
    let from = board.pieces()[id.0].position();
    let mut targets = Vec::new();
    for (dx, dy) in KNIGHT_OFFSETS {
        let Some(square) = from.add(dx, dy) else {
            continue;
        };
        if let Some(kind) = classify(board, square, id)? {
            targets.push(MoveTarget::new(square, kind));
        }
    }
    Ok(targets)
}

/// Kings only step onto empty squares; they never form or enter unions.
pub fn king_targets(board: &Board, id: PieceId) -> Result<Vec<MoveTarget>, BoardError> {
    let from = board.pieces()[id.0].position();
    let mut targets = Vec::new();
    for (dx, dy) in KING_OFFSETS {
        let Some(square) = from.add(dx, dy) else {
            continue;
        };
        if board.at(square)? == Occupant::Empty {
            targets.push(MoveTarget::new(square, MoveKind::Plain));
        }
    }
    Ok(targets)
}
