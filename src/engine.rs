//! Engine state management.
//!
//! Holds the board of the current game and the engine options, and answers
//! protocol commands. One engine serves one game; callers that host several
//! games keep one engine per game and serialize commands to each.

use std::collections::HashMap;
use std::io::{self, Write};

use crate::board::{Board, BoardError, Coord};
use crate::movegen::MoveTarget;
use crate::protocol::json::{encode_json, parse_json, JsonError};
use crate::protocol::notation::{format_targets, render_board};

/// Errors surfaced by engine command handlers.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to load position: {0}")]
    Position(#[from] JsonError),

    #[error("output error: {0}")]
    Io(#[from] io::Error),
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub board: Board,
    pub options: HashMap<String, String>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with a fresh board and no options set.
    pub fn new() -> Self {
        Engine {
            board: Board::new(),
            options: HashMap::new(),
        }
    }

    /// Resets the board for a new game. Options are kept.
    pub fn new_game(&mut self) {
        self.board = Board::new();
    }

    /// Replaces the board with one parsed from JSON.
    /// On failure the current board is kept.
    pub fn set_position(&mut self, json: &str) -> Result<(), EngineError> {
        self.board = parse_json(json)?;
        if self.verbose() {
            eprintln!("position loaded, {} to move", self.board.current_player().name());
        }
        Ok(())
    }

    /// Sets an engine option.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Reads a boolean option. A name set without a value counts as true.
    fn flag(&self, name: &str) -> bool {
        match self.options.get(name).map(|v| v.to_ascii_lowercase()) {
            Some(v) => matches!(v.as_str(), "" | "true" | "on" | "1"),
            None => false,
        }
    }

    /// Whether moves are logged to stderr.
    pub fn verbose(&self) -> bool {
        self.flag("Verbose")
    }

    /// Whether eligible pawns are promoted after every completed move.
    pub fn auto_promote(&self) -> bool {
        self.flag("AutoPromote")
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `select <sq>`.
    pub fn handle_select<W: Write>(&self, square: Coord, out: &mut W) -> io::Result<()> {
        let selection = self.board.select(square);
        if let Err(e) = &selection {
            eprintln!("select {}: {}", square, e);
        }
        writeln!(out, "{}", select_response(selection))?;
        out.flush()
    }

    /// Handles `move <from> <to>`.
    pub fn handle_move<W: Write>(
        &mut self,
        start: Coord,
        target: Coord,
        out: &mut W,
    ) -> io::Result<()> {
        let report = match self.board.apply_move(start, target) {
            Ok(r) => r,
            Err(e) => {
                if self.verbose() {
                    eprintln!("rejected move {} {}: {}", start, target, e);
                }
                writeln!(out, "illegal {}", e)?;
                return out.flush();
            }
        };

        if self.verbose() {
            eprintln!(
                "{} move {} {}, {} piece(s) changed",
                report.kind.name(),
                start,
                target,
                report.changes.len()
            );
        }

        write!(out, "moved {} {} turn {}", start, target, report.current_player.name())?;
        match self.board.chaining_position() {
            Some(square) => writeln!(out, " chaining {}", square)?,
            None => writeln!(out)?,
        }

        if report.turn_passed && self.auto_promote() {
            for id in self.board.promotable() {
                let Some(square) = self.board.piece(id).map(|p| p.position()) else {
                    continue;
                };
                match self.board.promote_at(square) {
                    Ok(_) => writeln!(out, "promoted {}", square)?,
                    Err(e) => eprintln!("auto-promotion on {} failed: {}", square, e),
                }
            }
        }
        out.flush()
    }

    /// Handles `promote <sq>`.
    pub fn handle_promote<W: Write>(&mut self, square: Coord, out: &mut W) -> io::Result<()> {
        match self.board.promote_at(square) {
            Ok(_) => writeln!(out, "promoted {}", square)?,
            Err(e) => {
                if self.verbose() {
                    eprintln!("rejected promotion on {}: {}", square, e);
                }
                writeln!(out, "illegal {}", e)?;
            }
        }
        out.flush()
    }

    /// Handles `json`.
    pub fn handle_json<W: Write>(&self, out: &mut W) -> Result<(), EngineError> {
        writeln!(out, "{}", encode_json(&self.board)?)?;
        out.flush()?;
        Ok(())
    }

    /// Handles `d`.
    pub fn handle_display<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", render_board(&self.board))?;
        out.flush()
    }
}

/// Formats the reply to `select`. A board error is reported as `illegal`,
/// never as `noselect`.
fn select_response(selection: Result<Option<Vec<MoveTarget>>, BoardError>) -> String {
    match selection {
        Ok(Some(targets)) if targets.is_empty() => "targets".to_string(),
        Ok(Some(targets)) => format!("targets {}", format_targets(&targets)),
        Ok(None) => "noselect".to_string(),
        Err(e) => format!("illegal {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn isready_replies_readyok() {
        let engine = Engine::new();
        let mut buf = Vec::new();
        engine.handle_isready(&mut buf).unwrap();
        assert_eq!(output(buf), "readyok\n");
    }

    #[test]
    fn select_lists_targets() {
        let engine = Engine::new();
        let mut buf = Vec::new();
        engine.handle_select(sq("b1"), &mut buf).unwrap();
        engine.handle_select(sq("b8"), &mut buf).unwrap();
        engine.handle_select(sq("e4"), &mut buf).unwrap();
        engine.handle_select(sq("a1"), &mut buf).unwrap();
        assert_eq!(
            output(buf),
            "targets c3:plain a3:plain\nnoselect\nnoselect\ntargets\n"
        );
    }

    #[test]
    fn select_errors_are_not_noselect() {
        let corrupt = Err(BoardError::BoardCorruption("3 pieces share e4".to_string()));
        assert_eq!(select_response(corrupt), "illegal board corruption: 3 pieces share e4");
        assert_eq!(select_response(Ok(None)), "noselect");
        assert_eq!(select_response(Ok(Some(vec![]))), "targets");
    }

    #[test]
    fn rejected_promotion_under_verbose() {
        let mut engine = Engine::new();
        engine.set_option("Verbose".to_string(), None);
        let mut buf = Vec::new();
        engine.handle_promote(sq("e2"), &mut buf).unwrap();
        assert_eq!(
            output(buf),
            "illegal illegal promotion: white pawns may only be promoted in row 7\n"
        );
    }

    #[test]
    fn position_with_foreign_chain_is_rejected() {
        let json = r#"{"pieces":[
            {"type":0,"color":0,"position":{"x":4,"y":4}},
            {"type":0,"color":1,"position":{"x":4,"y":4}},
            {"type":1,"color":0,"position":{"x":4,"y":4}}
        ],"chaining":0,"currentPlayer":1}"#;
        let mut engine = Engine::new();
        assert!(engine.set_position(json).is_err());
        assert_eq!(engine.board, Board::new());
    }

    #[test]
    fn move_reports_turn_and_rejections() {
        let mut engine = Engine::new();
        let mut buf = Vec::new();
        engine.handle_move(sq("e2"), sq("e4"), &mut buf).unwrap();
        engine.handle_move(sq("e4"), sq("e5"), &mut buf).unwrap();
        let out = output(buf);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "moved e2 e4 turn black");
        assert!(lines[1].starts_with("illegal "));
        assert_eq!(engine.board.current_player(), Color::Black);
    }

    #[test]
    fn bad_position_keeps_board() {
        let mut engine = Engine::new();
        let mut buf = Vec::new();
        engine.handle_move(sq("e2"), sq("e4"), &mut buf).unwrap();
        let before = engine.board.clone();
        assert!(engine.set_position("{not json").is_err());
        assert_eq!(engine.board, before);
    }

    #[test]
    fn options_are_flags() {
        let mut engine = Engine::new();
        assert!(!engine.verbose());
        engine.set_option("Verbose".to_string(), None);
        assert!(engine.verbose());
        engine.set_option("AutoPromote".to_string(), Some("false".to_string()));
        assert!(!engine.auto_promote());
        engine.set_option("AutoPromote".to_string(), Some("On".to_string()));
        assert!(engine.auto_promote());
    }

    #[test]
    fn auto_promote_after_move() {
        let json = r#"{"pieces":[
            {"type":0,"color":0,"position":{"x":0,"y":6}},
            {"type":5,"color":1,"position":{"x":7,"y":0}}
        ],"chaining":null,"currentPlayer":0}"#;
        let mut engine = Engine::new();
        engine.set_position(json).unwrap();
        engine.set_option("AutoPromote".to_string(), None);
        let mut buf = Vec::new();
        engine.handle_move(sq("a7"), sq("a8"), &mut buf).unwrap();
        assert_eq!(output(buf), "moved a7 a8 turn black\npromoted a8\n");
    }

    #[test]
    fn json_roundtrips_through_position() {
        let mut engine = Engine::new();
        let mut buf = Vec::new();
        engine.handle_move(sq("g1"), sq("f3"), &mut buf).unwrap();
        let mut json = Vec::new();
        engine.handle_json(&mut json).unwrap();
        let mut other = Engine::new();
        other.set_position(output(json).trim()).unwrap();
        assert_eq!(other.board, engine.board);
    }
}
