//! Sliding pieces: rook, bishop, queen.

use super::{classify, MoveKind, MoveTarget};
use crate::board::{Board, BoardError, PieceId};

pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub const QUEEN_DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Walks each ray until the board edge or the first occupied square.
///
/// An occupied square ends the ray: a union yields a chain target, a lone
/// opposing piece a union target, and an own piece nothing.
pub fn slide_targets(
    board: &Board,
    id: PieceId,
    directions: &[(i32, i32)],
) -> Result<Vec<MoveTarget>, BoardError> {
    let from = board.pieces()[id.0].position();
    let mut targets = Vec::new();

    for &(dx, dy) in directions {
        let mut square = from.add(dx, dy);
        while let Some(s) = square {
            match classify(board, s, id)? {
                Some(MoveKind::Plain) => {
                    targets.push(MoveTarget::new(s, MoveKind::Plain));
                    square = s.add(dx, dy);
                }
                Some(kind) => {
                    targets.push(MoveTarget::new(s, kind));
                    break;
                }
                None => break,
            }
        }
    }

    Ok(targets)
}
