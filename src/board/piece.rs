//! Piece types, colors, and the piece record itself.
//!
//! Pieces are never removed in Paco Ŝako. A board owns all of them in a
//! dense arena and refers to them by `PieceId`.

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use super::error::BoardError;

/// The kind of a chess piece.
///
/// Encoded on the wire as an integer in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceType {
    /// Returns the uppercase letter used in diagrams.
    pub const fn letter(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Rook => 'R',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }
}

impl From<PieceType> for u8 {
    fn from(t: PieceType) -> u8 {
        t as u8
    }
}

impl TryFrom<u8> for PieceType {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(PieceType::Pawn),
            1 => Ok(PieceType::Rook),
            2 => Ok(PieceType::Knight),
            3 => Ok(PieceType::Bishop),
            4 => Ok(PieceType::Queen),
            5 => Ok(PieceType::King),
            _ => Err(format!("invalid piece type {}", v)),
        }
    }
}

/// A player color. White moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Direction pawns of this color advance along y.
    pub const fn forward(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank a pawn of this color has to reach for promotion.
    pub const fn promotion_rank(self) -> i32 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }

    pub fn from_name(s: &str) -> Option<Color> {
        match s {
            "white" => Some(Color::White),
            "black" => Some(Color::Black),
            _ => None,
        }
    }
}

impl From<Color> for u8 {
    fn from(c: Color) -> u8 {
        c as u8
    }
}

impl TryFrom<u8> for Color {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Color::White),
            1 => Ok(Color::Black),
            _ => Err(format!("invalid color {}", v)),
        }
    }
}

/// Why a piece currently shares its square, if it does.
///
/// Derived from the board layout and the chaining pointer; never read
/// back from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnionRole {
    Alone,
    Dancing,
    TakingOver,
    LeavingUnion,
}

/// Index of a piece in its board's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub usize);

/// A single piece on the board.
///
/// Identity is the `PieceId`, not the field values: two pieces may be
/// equal field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    piece_type: PieceType,
    color: Color,
    position: Coord,
    role: UnionRole,
}

impl Piece {
    /// Creates a lone piece.
    pub fn new(piece_type: PieceType, color: Color, position: Coord) -> Self {
        Piece {
            piece_type,
            color,
            position,
            role: UnionRole::Alone,
        }
    }

    pub fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    pub fn role(&self) -> UnionRole {
        self.role
    }

    pub(crate) fn set_position(&mut self, position: Coord) {
        self.position = position;
    }

    pub(crate) fn set_role(&mut self, role: UnionRole) {
        self.role = role;
    }

    /// Checks whether `promote` would succeed, without mutating.
    pub fn check_promotion(&self) -> Result<(), BoardError> {
        if self.piece_type != PieceType::Pawn {
            return Err(BoardError::IllegalPromotion("only pawns can be promoted"));
        }
        if self.position.y() != self.color.promotion_rank() {
            return Err(BoardError::IllegalPromotion(match self.color {
                Color::White => "white pawns may only be promoted in row 7",
                Color::Black => "black pawns may only be promoted in row 0",
            }));
        }
        Ok(())
    }

    /// Promotes a pawn on its last rank to a queen.
    pub fn promote(&mut self) -> Result<(), BoardError> {
        self.check_promotion()?;
        self.piece_type = PieceType::Queen;
        Ok(())
    }
}
