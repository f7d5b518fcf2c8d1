//! Legal move generation.
//!
//! Computes the squares a piece may move to, tagged with what happens
//! there. Each generator only reads the board; legality of the selection
//! itself (whose turn it is, chain locks, union restrictions) is decided
//! by `Board::select`.

pub mod pawn;
pub mod slide;
pub mod step;

use rand::Rng;

use crate::board::{Board, BoardError, Coord, Occupant, PieceId, PieceType};

/// What a move does at its target square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoveKind {
    /// Onto an empty square.
    Plain,
    /// Onto a lone opposing piece, forming a union.
    Union,
    /// Into an existing union, displacing the same-colored member.
    Chain,
}

impl MoveKind {
    pub const fn name(self) -> &'static str {
        match self {
            MoveKind::Plain => "plain",
            MoveKind::Union => "union",
            MoveKind::Chain => "chain",
        }
    }

    pub fn from_name(s: &str) -> Option<MoveKind> {
        match s {
            "plain" => Some(MoveKind::Plain),
            "union" => Some(MoveKind::Union),
            "chain" => Some(MoveKind::Chain),
            _ => None,
        }
    }
}

/// A square a selected piece may move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveTarget {
    pub target: Coord,
    pub kind: MoveKind,
}

impl MoveTarget {
    pub fn new(target: Coord, kind: MoveKind) -> Self {
        MoveTarget { target, kind }
    }
}

/// Classifies a square for a piece of the given color entering it.
///
/// Returns `None` for a lone piece of the same color.
pub(crate) fn classify(
    board: &Board,
    square: Coord,
    mover: PieceId,
) -> Result<Option<MoveKind>, BoardError> {
    let color = board.pieces()[mover.0].color();
    Ok(match board.at(square)? {
        Occupant::Empty => Some(MoveKind::Plain),
        Occupant::Paired(_) => Some(MoveKind::Chain),
        Occupant::Single(other) => {
            if board.pieces()[other.0].color() != color {
                Some(MoveKind::Union)
            } else {
                None
            }
        }
    })
}

/// Generates every target for the piece `id` according to its type.
///
/// List order carries no meaning.
pub fn legal_targets(board: &Board, id: PieceId) -> Result<Vec<MoveTarget>, BoardError> {
    let piece = board.piece(id).ok_or(BoardError::UnknownPiece(id.0))?;
    match piece.piece_type() {
        PieceType::Pawn => pawn::pawn_targets(board, id),
        PieceType::Rook => slide::slide_targets(board, id, &slide::ROOK_DIRECTIONS),
        PieceType::Bishop => slide::slide_targets(board, id, &slide::BISHOP_DIRECTIONS),
        PieceType::Queen => slide::slide_targets(board, id, &slide::QUEEN_DIRECTIONS),
        PieceType::Knight => step::knight_targets(board, id),
        PieceType::King => step::king_targets(board, id),
    }
}

/// Every legal `(start, target)` for the side to move.
///
/// During a chain only the chaining piece is considered.
pub fn all_moves(board: &Board) -> Result<Vec<(Coord, MoveTarget)>, BoardError> {
    let starts: Vec<Coord> = match board.chaining_position() {
        Some(p) => vec![p],
        None => board
            .iter()
            .filter(|(_, p)| p.color() == board.current_player())
            .map(|(_, p)| p.position())
            .collect(),
    };

    let mut moves = Vec::new();
    for start in starts {
        if let Some(targets) = board.select(start)? {
            moves.extend(targets.into_iter().map(|t| (start, t)));
        }
    }
    Ok(moves)
}

/// Picks a uniformly random legal move, or `None` if the side to move is stuck.
pub fn random_move(
    board: &Board,
    rng: &mut impl Rng,
) -> Result<Option<(Coord, MoveTarget)>, BoardError> {
    let moves = all_moves(board)?;
    if moves.is_empty() {
        return Ok(None);
    }
    let idx = rng.gen_range(0..moves.len());
    Ok(Some(moves[idx]))
}
