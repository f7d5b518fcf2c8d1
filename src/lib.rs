//! Paco Ŝako rules engine library.
//!
//! Exposes the board representation, move generation, protocol, and
//! self-play modules for use by integration tests and the binary entry
//! points.

pub mod board;
pub mod engine;
pub mod movegen;
pub mod protocol;
pub mod selfplay;
