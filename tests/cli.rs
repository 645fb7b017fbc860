//! Integration tests for the cartel engine binary.
//!
//! Tests the full protocol session flow by spawning the engine process,
//! sending commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_cartel");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start cartel");

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

#[test]
fn new_game_reports_board_and_renders_it() {
    let lines = run_engine(&["new 1 rectangle 42", "show", "quit"]);
    assert_eq!(lines[0], "ok board 12 style rectangle players 1");
    // A 12-cell rectangle renders as 4 rows of cells.
    let rows: Vec<&String> = lines[1..].iter().filter(|l| l.starts_with("| ")).collect();
    assert_eq!(rows.len(), 4);
}

#[test]
fn seeded_sessions_replay_identically() {
    let a = run_engine(&["new 2 diamond 7", "show", "quit"]);
    let b = run_engine(&["new 2 diamond 7", "show", "quit"]);
    assert_eq!(a, b);
}

#[test]
fn net_reports_the_breakdown_line() {
    let lines = run_engine(&["new 1 rectangle 42", "net 0", "quit"]);
    assert_eq!(lines[1], "player 0: buy 0 | process 0 | sell 0 | units 0 | buildings 0 | employees 0 | net 0");
}

#[test]
fn apply_validates_moves() {
    let lines = run_engine(&[
        "new 1 rectangle 42",
        "apply 0 sell +1",
        "apply 0 buy -1",
        "quit",
    ]);
    assert_eq!(lines[1], "ok");
    assert_eq!(lines[2], "error: invalid move");
}

#[test]
fn go_returns_a_bestmove_line() {
    let lines = run_engine(&["new 1 rectangle 42", "depth 1", "go 0", "quit"]);
    assert_eq!(lines[1], "ok");
    assert!(lines[2].starts_with("bestmove "), "got: {}", lines[2]);
    assert!(lines[2].contains(" net "));
}

#[test]
fn turn_plays_and_reports() {
    let lines = run_engine(&["new 1 rectangle 42", "depth 1", "turn", "state", "quit"]);
    assert!(lines[2].starts_with("player 0 move ["), "got: {}", lines[2]);
    assert!(lines[3].starts_with("round 1 next 0 capitals "), "got: {}", lines[3]);
}

#[test]
fn card_renders_a_value_table() {
    let lines = run_engine(&["card buy_market", "quit"]);
    assert_eq!(lines[0], "Wheat Market, max players: 2");
    // 8 value rows plus the x-axis line.
    assert_eq!(lines.len(), 10);
}

#[test]
fn config_errors_are_reported_not_fatal() {
    let lines = run_engine(&["new 9", "new 1 rectangle 42", "quit"]);
    assert_eq!(lines[0], "error: unsupported player count 9, expected 1-4");
    assert_eq!(lines[1], "ok board 12 style rectangle players 1");
}

#[test]
fn malformed_commands_report_parse_errors() {
    let lines = run_engine(&["frobnicate", "go", "quit"]);
    assert_eq!(lines[0], "error: unknown command 'frobnicate'");
    assert_eq!(lines[1], "error: missing argument: expected a player index");
}

#[test]
fn settings_override_shapes_the_next_game() {
    let lines = run_engine(&[
        r#"settings {"board_sizes": [16, 16, 20, 24], "industry_cards": [6, 6, 8, 10], "farm_cards": [5, 5, 6, 7], "residential_cards": [5, 5, 6, 7]}"#,
        "new 1 rectangle 3",
        "quit",
    ]);
    assert_eq!(lines[0], "ok");
    assert_eq!(lines[1], "ok board 16 style rectangle players 1");
}
