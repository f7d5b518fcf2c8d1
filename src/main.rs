//! pacosako -- a Paco Ŝako rules engine speaking a line protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr.

use std::io::{self, BufRead};

use pacosako::engine::{Engine, EngineError};
use pacosako::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let result: Result<(), EngineError> = match cmd {
            Command::IsReady => engine.handle_isready(&mut out).map_err(Into::into),
            Command::SetOption { name, value } => {
                engine.set_option(name, value);
                Ok(())
            }
            Command::NewGame => {
                engine.new_game();
                Ok(())
            }
            Command::Position { json } => {
                if let Err(e) = engine.set_position(&json) {
                    eprintln!("{}", e);
                }
                Ok(())
            }
            Command::Select { square } => {
                engine.handle_select(square, &mut out).map_err(Into::into)
            }
            Command::Move { start, target } => {
                engine.handle_move(start, target, &mut out).map_err(Into::into)
            }
            Command::Promote { square } => {
                engine.handle_promote(square, &mut out).map_err(Into::into)
            }
            Command::Json => engine.handle_json(&mut out),
            Command::Display => engine.handle_display(&mut out).map_err(Into::into),
            Command::Quit => break,
        };

        if let Err(e) = result {
            eprintln!("{}", e);
            break;
        }
    }
}
