//! Board representation and game-state types.
//!
//! Contains coordinates, pieces, the derived union view, and the board
//! state machine that executes moves and tracks chains.

pub mod coord;
pub mod error;
pub mod piece;
pub mod state;
pub mod union;

pub use coord::{Coord, ParseCoordError, BOARD_SIZE};
pub use error::BoardError;
pub use piece::{Color, Piece, PieceId, PieceType, UnionRole};
pub use state::{Board, MoveReport, Occupant, PieceChange, BACK_RANK, PIECE_COUNT};
pub use union::Union;
