//! Command parser for the line protocol.
//!
//! Parses incoming protocol commands from raw text into structured
//! `Command` variants that the main loop can dispatch on.

use crate::board::Coord;

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Reset to the initial setup.
    NewGame,

    /// Load a board from its JSON encoding.
    Position { json: String },

    /// List legal targets for the piece or union on a square.
    Select { square: Coord },

    /// Move from one square to another.
    Move { start: Coord, target: Coord },

    /// Promote the eligible pawn on a square.
    Promote { square: Coord },

    /// Print the board as JSON.
    Json,

    /// Print an ASCII diagram of the board.
    Display,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "json" => Some(Command::Json),
        "d" => Some(Command::Display),

        "setoption" => parse_setoption(&tokens),
        "position" => parse_position(&tokens, trimmed),
        "select" => parse_square(&tokens).map(|square| Command::Select { square }),
        "promote" => parse_square(&tokens).map(|square| Command::Promote { square }),
        "move" => parse_move(&tokens),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    // Minimum: setoption name <id>
    if tokens.len() < 3 || tokens[1] != "name" {
        eprintln!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                eprintln!("malformed setoption: empty name");
                return None;
            }
            let name = name_parts.join(" ");
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name, value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `position <json>`, keeping everything after the keyword.
fn parse_position(tokens: &[&str], full_line: &str) -> Option<Command> {
    if tokens.len() < 2 {
        eprintln!("malformed position: expected 'position <json>'");
        return None;
    }
    let json = full_line
        .strip_prefix("position")
        .unwrap_or("")
        .trim()
        .to_string();
    Some(Command::Position { json })
}

/// Parses the single square argument of `select` and `promote`.
fn parse_square(tokens: &[&str]) -> Option<Coord> {
    if tokens.len() != 2 {
        eprintln!("malformed {}: expected '{} <square>'", tokens[0], tokens[0]);
        return None;
    }
    match tokens[1].parse::<Coord>() {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("{}", e);
            None
        }
    }
}

/// Parses `move <from> <to>`.
fn parse_move(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 3 {
        eprintln!("malformed move: expected 'move <from> <to>'");
        return None;
    }
    match (tokens[1].parse::<Coord>(), tokens[2].parse::<Coord>()) {
        (Ok(start), Ok(target)) => Some(Command::Move { start, target }),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("{}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Coord {
        s.parse().unwrap()
    }

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("newgame"), Some(Command::NewGame));
        assert_eq!(parse_command("json"), Some(Command::Json));
        assert_eq!(parse_command("d"), Some(Command::Display));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("foobar"), None);
    }

    #[test]
    fn parse_setoption_with_value() {
        let cmd = parse_command("setoption name Verbose value true").unwrap();
        assert_eq!(
            cmd,
            Command::SetOption {
                name: "Verbose".to_string(),
                value: Some("true".to_string()),
            }
        );
    }

    #[test]
    fn parse_setoption_no_value() {
        let cmd = parse_command("setoption name AutoPromote").unwrap();
        assert_eq!(
            cmd,
            Command::SetOption {
                name: "AutoPromote".to_string(),
                value: None,
            }
        );
    }

    #[test]
    fn parse_setoption_malformed_returns_none() {
        assert_eq!(parse_command("setoption"), None);
        assert_eq!(parse_command("setoption foo"), None);
        assert_eq!(parse_command("setoption name value 3"), None);
    }

    #[test]
    fn parse_position_keeps_spaces() {
        let json = r#"{"pieces": [], "chaining": null, "currentPlayer": 0}"#;
        let cmd = parse_command(&format!("position {}", json)).unwrap();
        assert_eq!(cmd, Command::Position { json: json.to_string() });
        assert_eq!(parse_command("position"), None);
    }

    #[test]
    fn parse_select_and_promote() {
        assert_eq!(
            parse_command("select e2"),
            Some(Command::Select { square: sq("e2") })
        );
        assert_eq!(
            parse_command("promote a8"),
            Some(Command::Promote { square: sq("a8") })
        );
        assert_eq!(parse_command("select"), None);
        assert_eq!(parse_command("select j2"), None);
        assert_eq!(parse_command("select e2 e4"), None);
    }

    #[test]
    fn parse_move_command() {
        assert_eq!(
            parse_command("move e2 e4"),
            Some(Command::Move {
                start: sq("e2"),
                target: sq("e4"),
            })
        );
        assert_eq!(parse_command("move e2"), None);
        assert_eq!(parse_command("move e2 e9"), None);
    }

    #[test]
    fn parse_with_leading_trailing_whitespace() {
        assert_eq!(parse_command("  isready  "), Some(Command::IsReady));
        assert_eq!(
            parse_command("  move a2   a3 "),
            Some(Command::Move {
                start: sq("a2"),
                target: sq("a3"),
            })
        );
    }
}
