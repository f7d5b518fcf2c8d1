//! Errors raised by the rules engine.
//!
//! `OutOfBounds`, `IllegalMove` and `IllegalPromotion` are ordinary
//! rejections a caller can recover from. `InvalidUnion` and
//! `BoardCorruption` mean an invariant was broken somewhere and the board
//! should no longer be trusted.

use super::coord::Coord;

/// Errors that can occur while querying or mutating a board.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("coordinate ({x}, {y}) is off the board")]
    OutOfBounds { x: i32, y: i32 },

    #[error("moving from {start} to {target} is not allowed")]
    IllegalMove { start: Coord, target: Coord },

    #[error("a chain is active, the piece leaving {chaining} must move")]
    MustMoveChainingPiece { chaining: Coord },

    #[error("there is no piece at {0}")]
    NoPieceAtStart(Coord),

    #[error("can't form a union from pieces with the same color at {0}")]
    SameColorUnion(Coord),

    #[error("unions may only move onto empty squares, {0} is occupied")]
    PairTargetOccupied(Coord),

    #[error("illegal promotion: {0}")]
    IllegalPromotion(&'static str),

    #[error("invalid union: {0}")]
    InvalidUnion(String),

    #[error("board corruption: {0}")]
    BoardCorruption(String),

    #[error("no piece with index {0}")]
    UnknownPiece(usize),
}
