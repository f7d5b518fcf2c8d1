//! Protocol handling.
//!
//! This module implements the data-only JSON board encoding, the text
//! notation for squares and targets, and the command parser for the
//! main loop.

pub mod json;
pub mod notation;
pub mod parser;

pub use json::{
    encode_json, from_data, parse_json, to_data, BoardData, JsonError, PieceData, PositionData,
};
pub use notation::{format_targets, parse_targets, render_board, NotationError};
pub use parser::{parse_command, Command};
