//! Cartel -- a business-simulation board game engine.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! line by line: `new` starts a game, `go` searches for a player's best
//! move, `apply` plays a move, `turn` lets the engine play the next
//! player's turn itself. Diagnostics go to stderr via the logger.

use std::io::{self, BufRead, Write};

use cartel::engine::Engine;
use cartel::eval::net_breakdown;
use cartel::movegen::enumerate_moves;
use cartel::protocol::{
    format_outcome, format_report, format_table, parse_command, Command, ParseError,
};

/// Runs the main protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() {
    // The handle keeps the logger alive for the whole session.
    let logger = flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(flexi_logger::Logger::start);
    if let Err(e) = &logger {
        eprintln!("logger init failed: {e}");
    }

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
            Ok(c) => c,
            Err(ParseError::EmptyInput) => continue,
            Err(e) => {
                let _ = writeln!(out, "error: {e}");
                let _ = out.flush();
                continue;
            }
        };

        if !dispatch(cmd, &mut engine, &mut out) {
            break;
        }
        let _ = out.flush();
    }
}

/// Handles one command. Returns false when the session should end.
fn dispatch(cmd: Command, engine: &mut Engine, out: &mut impl Write) -> bool {
    match cmd {
        Command::Settings { json } => match engine.load_settings(&json) {
            Ok(()) => {
                let _ = writeln!(out, "ok");
            }
            Err(e) => {
                let _ = writeln!(out, "error: {e}");
            }
        },

        Command::New { players, style, seed } => {
            if let Some(seed) = seed {
                engine.reseed(seed);
            }
            match engine.new_game(players, true, style) {
                Ok(()) => {
                    let size = engine.board().map_or(0, |b| b.layout().size());
                    let _ = writeln!(out, "ok board {size} style {} players {players}", style.name());
                }
                Err(e) => {
                    let _ = writeln!(out, "error: {e}");
                }
            }
        }

        Command::Show => match engine.board() {
            Some(board) => {
                let _ = write!(out, "{board}");
            }
            None => {
                let _ = writeln!(out, "error: no game in progress");
            }
        },

        Command::Card { kind } => {
            let _ = write!(out, "{}", format_table(kind, engine.settings()));
        }

        Command::Net { player } => match engine.board() {
            Some(board) if player < board.player_count() => {
                let breakdown = net_breakdown(player, board);
                let _ = writeln!(out, "player {player}: {breakdown}");
            }
            _ => {
                let _ = writeln!(out, "error: no such player");
            }
        },

        Command::Moves { player } => match engine.board() {
            Some(board) if player < board.player_count() => {
                let moves = enumerate_moves(player, board, engine.hand());
                let _ = writeln!(out, "moves {}", moves.len());
                for mv in moves {
                    let _ = writeln!(out, "  {mv}");
                }
            }
            _ => {
                let _ = writeln!(out, "error: no such player");
            }
        },

        Command::Go { player } => match engine.best_move(player) {
            Some(outcome) => {
                let _ = writeln!(out, "{}", format_outcome(&outcome));
            }
            None => {
                let _ = writeln!(out, "error: no such player");
            }
        },

        Command::Depth { plies } => {
            engine.limits_mut().max_depth = plies;
            let _ = writeln!(out, "ok");
        }
        Command::Breadth { cap } => {
            engine.limits_mut().moves_to_try = Some(cap);
            let _ = writeln!(out, "ok");
        }
        Command::Budget { nodes } => {
            engine.limits_mut().node_budget = Some(nodes);
            let _ = writeln!(out, "ok");
        }

        Command::Apply { mv } => {
            if engine.apply_move(mv) {
                let _ = writeln!(out, "ok");
            } else {
                let _ = writeln!(out, "error: invalid move");
            }
        }

        Command::Turn => match engine.play_turn() {
            Some(report) => {
                let _ = writeln!(out, "{}", format_report(&report));
            }
            None => {
                let _ = writeln!(out, "error: no game in progress or game over");
            }
        },

        Command::State => match engine.board() {
            Some(board) => {
                let capitals: Vec<String> = (0..board.player_count())
                    .map(|p| engine.capital(p).unwrap_or(0).to_string())
                    .collect();
                let _ = writeln!(
                    out,
                    "round {} next {} capitals {}{}",
                    engine.round(),
                    engine.next_player(),
                    capitals.join(" "),
                    if engine.game_over() { " over" } else { "" }
                );
            }
            None => {
                let _ = writeln!(out, "error: no game in progress");
            }
        },

        Command::Quit => return false,
    }
    true
}
