//! Board coordinates.
//!
//! A `Coord` is a validated square on the 8x8 board. `x` is the file
//! (0 = a) and `y` is the rank (0 = white's back rank).

use std::fmt;
use std::str::FromStr;

use super::error::BoardError;

/// Width and height of the board.
pub const BOARD_SIZE: i32 = 8;

/// A square on the board. Both components are in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    x: u8,
    y: u8,
}

impl Coord {
    /// Creates a coordinate, failing with `OutOfBounds` off the board.
    pub fn new(x: i32, y: i32) -> Result<Self, BoardError> {
        if !(0..BOARD_SIZE).contains(&x) || !(0..BOARD_SIZE).contains(&y) {
            return Err(BoardError::OutOfBounds { x, y });
        }
        Ok(Coord { x: x as u8, y: y as u8 })
    }

    /// Builds a coordinate from components already known to be in range.
    pub(crate) const fn from_raw(x: u8, y: u8) -> Self {
        Coord { x: x & 7, y: y & 7 }
    }

    pub const fn x(self) -> i32 {
        self.x as i32
    }

    pub const fn y(self) -> i32 {
        self.y as i32
    }

    /// Dense index in `0..64`, rank-major.
    pub const fn index(self) -> usize {
        self.y as usize * BOARD_SIZE as usize + self.x as usize
    }

    /// Returns the square at the given offset, or `None` if it falls off the board.
    pub fn add(self, dx: i32, dy: i32) -> Option<Coord> {
        Coord::new(self.x() + dx, self.y() + dy).ok()
    }

    /// Parity of `x + y`. Only used for tile coloring.
    pub const fn is_even(self) -> bool {
        (self.x + self.y) % 2 == 0
    }

    /// Iterates over all 64 squares, rank by rank starting at a1.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE as u8).flat_map(|y| (0..BOARD_SIZE as u8).map(move |x| Coord { x, y }))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.x) as char, self.y + 1)
    }
}

/// Errors from parsing algebraic square names.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ParseCoordError {
    #[error("expected a square like 'e4', got '{0}'")]
    Malformed(String),

    #[error(transparent)]
    Board(#[from] BoardError),
}

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ParseCoordError::Malformed(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !file.is_ascii_lowercase() || !rank.is_ascii_digit() {
            return Err(ParseCoordError::Malformed(s.to_string()));
        }
        let x = (file - b'a') as i32;
        let y = (rank - b'0') as i32 - 1;
        Ok(Coord::new(x, y)?)
    }
}
