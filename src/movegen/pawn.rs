//! Pawn move generation.
//!
//! Pawns step forward onto empty squares only, with a double step from
//! their starting rank. Diagonal steps are only offered onto a lone
//! opposing piece (union) or an existing union (chain).

use super::{MoveKind, MoveTarget};
use crate::board::{Board, BoardError, Color, Occupant, PieceId};

/// Rank a pawn of the given color starts on.
const fn start_rank(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

pub fn pawn_targets(board: &Board, id: PieceId) -> Result<Vec<MoveTarget>, BoardError> {
    let piece = &board.pieces()[id.0];
    let color = piece.color();
    let from = piece.position();
    let forward = color.forward();
    let mut targets = Vec::new();

    for dx in [-1, 1] {
        let Some(strike) = from.add(dx, forward) else {
            continue;
        };
        match board.at(strike)? {
            Occupant::Single(other) if board.pieces()[other.0].color() != color => {
                targets.push(MoveTarget::new(strike, MoveKind::Union));
            }
            Occupant::Paired(_) => targets.push(MoveTarget::new(strike, MoveKind::Chain)),
            _ => {}
        }
    }

    if let Some(step) = from.add(0, forward) {
        if board.at(step)? == Occupant::Empty {
            targets.push(MoveTarget::new(step, MoveKind::Plain));
            if from.y() == start_rank(color) {
                if let Some(leap) = from.add(0, 2 * forward) {
                    if board.at(leap)? == Occupant::Empty {
                        targets.push(MoveTarget::new(leap, MoveKind::Plain));
                    }
                }
            }
        }
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Coord, Piece, PieceType};

    fn at(x: i32, y: i32) -> Coord {
        Coord::new(x, y).unwrap()
    }

    fn sorted(mut v: Vec<MoveTarget>) -> Vec<(Coord, MoveKind)> {
        v.sort_by_key(|t| t.target);
        v.into_iter().map(|t| (t.target, t.kind)).collect()
    }

    #[test]
    fn opening_pawn_single_and_double_step() {
        let board = Board::new();
        let targets = sorted(pawn_targets(&board, PieceId(8)).unwrap());
        assert_eq!(
            targets,
            vec![(at(0, 2), MoveKind::Plain), (at(0, 3), MoveKind::Plain)]
        );
    }

    #[test]
    fn black_pawn_moves_down() {
        let board = Board::new();
        let targets = sorted(pawn_targets(&board, PieceId(24)).unwrap());
        assert_eq!(
            targets,
            vec![(at(0, 4), MoveKind::Plain), (at(0, 5), MoveKind::Plain)]
        );
    }

    #[test]
    fn blocked_pawn_has_no_forward_moves() {
        let pieces = vec![
            Piece::new(PieceType::Pawn, Color::White, at(3, 1)),
            Piece::new(PieceType::Knight, Color::Black, at(3, 2)),
        ];
        let board = Board::from_parts(pieces, Color::White, None).unwrap();
        assert!(pawn_targets(&board, PieceId(0)).unwrap().is_empty());
    }

    #[test]
    fn double_step_needs_empty_destination() {
        let pieces = vec![
            Piece::new(PieceType::Pawn, Color::White, at(3, 1)),
            Piece::new(PieceType::Knight, Color::Black, at(3, 3)),
        ];
        let board = Board::from_parts(pieces, Color::White, None).unwrap();
        let targets = sorted(pawn_targets(&board, PieceId(0)).unwrap());
        assert_eq!(targets, vec![(at(3, 2), MoveKind::Plain)]);
    }

    #[test]
    fn diagonals_offer_union_and_chain_only() {
        let pieces = vec![
            Piece::new(PieceType::Pawn, Color::White, at(3, 3)),
            Piece::new(PieceType::Pawn, Color::Black, at(4, 4)),
            Piece::new(PieceType::Rook, Color::White, at(2, 4)),
            Piece::new(PieceType::Rook, Color::Black, at(2, 4)),
            Piece::new(PieceType::Bishop, Color::Black, at(3, 4)),
        ];
        let board = Board::from_parts(pieces, Color::White, None).unwrap();
        let targets = sorted(pawn_targets(&board, PieceId(0)).unwrap());
        assert_eq!(
            targets,
            vec![(at(2, 4), MoveKind::Chain), (at(4, 4), MoveKind::Union)]
        );
    }

    #[test]
    fn own_piece_on_diagonal_is_skipped() {
        let pieces = vec![
            Piece::new(PieceType::Pawn, Color::White, at(3, 3)),
            Piece::new(PieceType::Pawn, Color::White, at(4, 4)),
        ];
        let board = Board::from_parts(pieces, Color::White, None).unwrap();
        let targets = sorted(pawn_targets(&board, PieceId(0)).unwrap());
        assert_eq!(targets, vec![(at(3, 4), MoveKind::Plain)]);
    }
}
