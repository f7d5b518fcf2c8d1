//! Integration tests for the pacosako engine binary.
//!
//! Tests full protocol sessions by spawning the engine process, sending
//! commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

use pacosako::board::{Color, PieceId, UnionRole};
use pacosako::movegen::MoveKind;
use pacosako::protocol::json::parse_json;
use pacosako::protocol::notation::parse_targets;

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_pacosako");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start pacosako");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

/// Target squares of a `targets ...` line, sorted.
fn target_squares(line: &str) -> Vec<String> {
    let rest = line.strip_prefix("targets").expect("not a targets line");
    let mut squares: Vec<String> = parse_targets(rest)
        .unwrap()
        .into_iter()
        .map(|t| format!("{}:{}", t.target, t.kind.name()))
        .collect();
    squares.sort();
    squares
}

/// A white+black pawn union on e5, a white rook on e1, the black king on a8.
const CHAIN_POSITION: &str = r#"position {"pieces":[{"type":0,"color":0,"position":{"x":4,"y":4}},{"type":0,"color":1,"position":{"x":4,"y":4}},{"type":1,"color":0,"position":{"x":4,"y":0}},{"type":5,"color":1,"position":{"x":0,"y":7}}],"chaining":null,"currentPlayer":0}"#;

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_engine(&["frobnicate", "", "select", "move e2", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn opening_pawn_selection() {
    let lines = run_engine(&["select a2", "select a7", "select e4", "quit"]);
    assert_eq!(lines.len(), 3);
    assert_eq!(target_squares(&lines[0]), vec!["a3:plain", "a4:plain"]);
    assert_eq!(lines[1], "noselect");
    assert_eq!(lines[2], "noselect");
}

#[test]
fn moves_alternate_turns() {
    let lines = run_engine(&["move e2 e4", "move d7 d5", "move e4 d5", "quit"]);
    assert_eq!(
        lines,
        vec![
            "moved e2 e4 turn black",
            "moved d7 d5 turn white",
            "moved e4 d5 turn black",
        ]
    );
}

#[test]
fn union_formed_over_protocol() {
    let lines = run_engine(&[
        "move e2 e4",
        "move d7 d5",
        "select e4",
        "move e4 d5",
        "json",
        "quit",
    ]);
    assert!(target_squares(&lines[2]).contains(&"d5:union".to_string()));

    let board = parse_json(&lines[4]).unwrap();
    let white = board.piece(PieceId(12)).unwrap();
    let black = board.piece(PieceId(27)).unwrap();
    assert_eq!(white.position(), black.position());
    assert_eq!(white.role(), UnionRole::Dancing);
    assert_eq!(black.role(), UnionRole::Dancing);
    assert_eq!(board.current_player(), Color::Black);
}

#[test]
fn illegal_moves_are_reported() {
    let lines = run_engine(&["move e4 e5", "move e2 e5", "move e7 e5", "quit"]);
    assert_eq!(lines.len(), 3);
    assert!(lines.iter().all(|l| l.starts_with("illegal ")), "{:?}", lines);
}

#[test]
fn chain_session() {
    let lines = run_engine(&[
        CHAIN_POSITION,
        "select e1",
        "move e1 e5",
        "select a8",
        "select e5",
        "move a8 a7",
        "move e5 e6",
        "quit",
    ]);
    assert_eq!(lines.len(), 6, "{:?}", lines);
    assert!(target_squares(&lines[0]).contains(&format!("e5:{}", MoveKind::Chain.name())));
    assert_eq!(lines[1], "moved e1 e5 turn white chaining e5");
    assert_eq!(lines[2], "noselect");
    assert_eq!(target_squares(&lines[3]), vec!["e6:plain"]);
    assert!(lines[4].starts_with("illegal "));
    assert_eq!(lines[5], "moved e5 e6 turn black");
}

#[test]
fn bad_position_keeps_current_board() {
    let lines = run_engine(&["move e2 e4", "position {\"pieces\":[", "json", "quit"]);
    assert_eq!(lines.len(), 2);
    let board = parse_json(&lines[1]).unwrap();
    assert_eq!(board.current_player(), Color::Black);
}

#[test]
fn inconsistent_chain_position_is_refused() {
    let orphan = r#"position {"pieces":[{"type":0,"color":0,"position":{"x":4,"y":3}}],"chaining":0,"currentPlayer":0}"#;
    let lines = run_engine(&["move e2 e4", orphan, "json", "quit"]);
    assert_eq!(lines.len(), 2);
    let board = parse_json(&lines[1]).unwrap();
    assert_eq!(board.pieces().len(), 32);
    assert_eq!(board.chaining(), None);
}

#[test]
fn promotion_commands() {
    let position = r#"position {"pieces":[{"type":0,"color":0,"position":{"x":0,"y":6}},{"type":5,"color":1,"position":{"x":7,"y":0}}],"chaining":null,"currentPlayer":0}"#;

    let lines = run_engine(&[position, "promote a7", "move a7 a8", "promote a8", "quit"]);
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("illegal "));
    assert_eq!(lines[1], "moved a7 a8 turn black");
    assert_eq!(lines[2], "promoted a8");

    let lines = run_engine(&[
        position,
        "setoption name AutoPromote value true",
        "move a7 a8",
        "quit",
    ]);
    assert_eq!(lines, vec!["moved a7 a8 turn black", "promoted a8"]);
}

#[test]
fn newgame_resets_board() {
    let lines = run_engine(&["move e2 e4", "newgame", "select e2", "quit"]);
    assert_eq!(lines.len(), 2);
    assert_eq!(target_squares(&lines[1]), vec!["e3:plain", "e4:plain"]);
}

#[test]
fn display_shows_diagram() {
    let lines = run_engine(&["d", "quit"]);
    assert!(lines.iter().any(|l| l.starts_with("8 ")));
    assert!(lines.iter().any(|l| l.starts_with("1 ")));
    assert_eq!(lines.last().map(String::as_str), Some("turn white"));
}

#[test]
fn eof_without_quit_exits_cleanly() {
    let lines = run_engine(&["isready"]);
    assert_eq!(lines, vec!["readyok"]);
}
