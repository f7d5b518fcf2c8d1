//! Data-only board encoding.
//!
//! A board is exchanged as a JSON object:
//!
//! ```text
//! {"pieces":[{"type":1,"color":0,"position":{"x":0,"y":0}}, ...],
//!  "chaining":null,
//!  "currentPlayer":0}
//! ```
//!
//! `pieces` keeps arena order so `chaining` can refer to a piece by index.
//! Piece types and colors use their integer codes. Roles are not part of
//! the format: they are recomputed on load. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::board::{Board, BoardError, Color, Coord, Piece, PieceId, PieceType};

/// Errors that can occur while loading or saving a board.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("malformed board JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("chaining index {index} is out of range for {count} pieces")]
    ChainingOutOfRange { index: usize, count: usize },

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionData {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceData {
    #[serde(rename = "type")]
    pub piece_type: PieceType,
    pub color: Color,
    pub position: PositionData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardData {
    pub pieces: Vec<PieceData>,
    /// Required, but may be `null`.
    #[serde(deserialize_with = "Option::deserialize")]
    pub chaining: Option<usize>,
    pub current_player: Color,
}

impl From<Coord> for PositionData {
    fn from(c: Coord) -> Self {
        PositionData { x: c.x(), y: c.y() }
    }
}

impl TryFrom<PositionData> for Coord {
    type Error = BoardError;

    fn try_from(p: PositionData) -> Result<Self, Self::Error> {
        Coord::new(p.x, p.y)
    }
}

/// Converts a board into its data-only form.
pub fn to_data(board: &Board) -> BoardData {
    BoardData {
        pieces: board
            .pieces()
            .iter()
            .map(|p| PieceData {
                piece_type: p.piece_type(),
                color: p.color(),
                position: p.position().into(),
            })
            .collect(),
        chaining: board.chaining().map(|id| id.0),
        current_player: board.current_player(),
    }
}

/// Rebuilds a board from its data-only form, recomputing all roles.
pub fn from_data(data: &BoardData) -> Result<Board, JsonError> {
    if let Some(index) = data.chaining {
        if index >= data.pieces.len() {
            return Err(JsonError::ChainingOutOfRange {
                index,
                count: data.pieces.len(),
            });
        }
    }
    let pieces = data
        .pieces
        .iter()
        .map(|p| -> Result<Piece, BoardError> {
            Ok(Piece::new(p.piece_type, p.color, Coord::try_from(p.position)?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Board::from_parts(
        pieces,
        data.current_player,
        data.chaining.map(PieceId),
    )?)
}

/// Encodes a board as a single-line JSON string.
pub fn encode_json(board: &Board) -> Result<String, JsonError> {
    Ok(serde_json::to_string(&to_data(board))?)
}

/// Parses a board from a JSON string.
pub fn parse_json(s: &str) -> Result<Board, JsonError> {
    let data: BoardData = serde_json::from_str(s)?;
    from_data(&data)
}
