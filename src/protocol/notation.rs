//! Text notation for move targets and board diagrams.
//!
//! A target is written `<square>:<kind>`, e.g. `e4:plain` or `d5:chain`.
//! A target list is space-separated.

use std::fmt::Write;

use crate::board::{Board, Color, Coord, ParseCoordError, BOARD_SIZE};
use crate::movegen::{MoveKind, MoveTarget};

/// Errors from parsing target notation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("expected '<square>:<kind>', got '{0}'")]
    MissingKind(String),

    #[error("unknown move kind '{0}'")]
    UnknownKind(String),

    #[error(transparent)]
    Square(#[from] ParseCoordError),
}

pub fn format_target(t: &MoveTarget) -> String {
    format!("{}:{}", t.target, t.kind.name())
}

pub fn format_targets(targets: &[MoveTarget]) -> String {
    targets
        .iter()
        .map(format_target)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn parse_target(s: &str) -> Result<MoveTarget, NotationError> {
    let (square, kind) = s
        .split_once(':')
        .ok_or_else(|| NotationError::MissingKind(s.to_string()))?;
    let kind =
        MoveKind::from_name(kind).ok_or_else(|| NotationError::UnknownKind(kind.to_string()))?;
    Ok(MoveTarget::new(square.parse::<Coord>()?, kind))
}

pub fn parse_targets(s: &str) -> Result<Vec<MoveTarget>, NotationError> {
    s.split_whitespace().map(parse_target).collect()
}

/// Renders the board with rank 8 on top.
///
/// Each square shows its white occupant in uppercase and its black occupant
/// in lowercase, `.` for none. The chaining piece is listed below the grid
/// since it has no square of its own.
pub fn render_board(board: &Board) -> String {
    let mut cells = [['.', '.']; 64];
    for (id, piece) in board.iter() {
        if Some(id) == board.chaining() {
            continue;
        }
        let letter = piece.piece_type().letter();
        let cell = &mut cells[piece.position().index()];
        match piece.color() {
            Color::White => cell[0] = letter,
            Color::Black => cell[1] = letter.to_ascii_lowercase(),
        }
    }

    let mut out = String::new();
    for y in (0..BOARD_SIZE).rev() {
        let _ = write!(out, "{} ", y + 1);
        for x in 0..BOARD_SIZE {
            let cell = cells[(y * BOARD_SIZE + x) as usize];
            let _ = write!(out, " {}{}", cell[0], cell[1]);
        }
        out.push('\n');
    }
    out.push_str("   a  b  c  d  e  f  g  h\n");
    let _ = write!(out, "turn {}", board.current_player().name());
    if let (Some(id), Some(square)) = (board.chaining(), board.chaining_position()) {
        if let Some(piece) = board.piece(id) {
            let _ = write!(out, " chaining {} {}", piece.piece_type().letter(), square);
        }
    }
    out
}
