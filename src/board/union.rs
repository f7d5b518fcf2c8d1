//! Unions: one white and one black piece sharing a square.
//!
//! A `Union` is never stored. The board builds one on demand from the two
//! pieces it finds on a square.

use super::coord::Coord;
use super::error::BoardError;
use super::piece::{Color, Piece, PieceId};

/// A validated pair of opposite-colored pieces on the same square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Union {
    white: PieceId,
    black: PieceId,
}

impl Union {
    /// Builds a union from exactly two arena members.
    pub fn new(pieces: &[Piece], members: &[PieceId]) -> Result<Self, BoardError> {
        if members.len() != 2 {
            return Err(BoardError::InvalidUnion(format!(
                "a union has exactly two members, received {}",
                members.len()
            )));
        }
        let find = |color: Color| -> Result<Option<PieceId>, BoardError> {
            for &id in members {
                if piece(pieces, id)?.color() == color {
                    return Ok(Some(id));
                }
            }
            Ok(None)
        };
        let white = find(Color::White)?
            .ok_or_else(|| BoardError::InvalidUnion("no white member".to_string()))?;
        let black = find(Color::Black)?
            .ok_or_else(|| BoardError::InvalidUnion("no black member".to_string()))?;
        let union = Union { white, black };
        union.position(pieces)?;
        Ok(union)
    }

    pub fn white(&self) -> PieceId {
        self.white
    }

    pub fn black(&self) -> PieceId {
        self.black
    }

    pub fn of_color(&self, color: Color) -> PieceId {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    /// Shared square of both members, re-checked on every call.
    pub fn position(&self, pieces: &[Piece]) -> Result<Coord, BoardError> {
        let w = piece(pieces, self.white)?.position();
        let b = piece(pieces, self.black)?.position();
        if w != b {
            return Err(BoardError::InvalidUnion(format!(
                "members must share a square, found {} and {}",
                w, b
            )));
        }
        Ok(w)
    }
}

fn piece(pieces: &[Piece], id: PieceId) -> Result<&Piece, BoardError> {
    pieces.get(id.0).ok_or(BoardError::UnknownPiece(id.0))
}
