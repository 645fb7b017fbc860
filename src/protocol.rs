//! Protocol command parsing and response formatting.
//!
//! The engine binary speaks a line-oriented text protocol on stdin/stdout:
//! a front end (or a human) issues commands like `new`, `go`, and `apply`,
//! and the engine answers with plain-text lines. This module turns raw
//! input lines into structured `Command` variants and formats the engine's
//! answers; all dispatching lives in the binary's main loop.

use thiserror::Error;

use crate::board::{BoardStyle, BuildingKind, Cell, Move, MoveError};
use crate::config::Settings;
use crate::engine::TurnReport;
use crate::search::SearchOutcome;

/// A parsed front-end command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the settings from an inline JSON document.
    Settings { json: String },

    /// Start a new game: `new <players> [style] [seed]`.
    New { players: usize, style: BoardStyle, seed: Option<u64> },

    /// Render the board.
    Show,

    /// Render a building kind's value table.
    Card { kind: BuildingKind },

    /// Report a player's net-income breakdown.
    Net { player: usize },

    /// List a player's valid moves.
    Moves { player: usize },

    /// Search for a player's best move.
    Go { player: usize },

    /// Set the lookahead depth in plies.
    Depth { plies: u32 },

    /// Cap the per-ply candidate list.
    Breadth { cap: usize },

    /// Cap the searched node count.
    Budget { nodes: u64 },

    /// Validate and apply a move.
    Apply { mv: Move },

    /// Play the next player's turn with the search.
    Turn,

    /// Report round, rotation, and capital.
    State,

    /// Terminate the engine process.
    Quit,
}

/// Errors from parsing a command line.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("missing argument: expected {0}")]
    MissingArgument(&'static str),

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unknown building kind '{0}'")]
    UnknownBuildingKind(String),

    #[error("unknown board style '{0}'")]
    UnknownStyle(String),

    #[error("unknown move action '{0}', expected place/staff/sell/buy")]
    UnknownAction(String),

    #[error(transparent)]
    Move(#[from] MoveError),
}

/// Parses a single input line into a `Command`.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "show" => Ok(Command::Show),
        "turn" => Ok(Command::Turn),
        "state" => Ok(Command::State),
        "quit" => Ok(Command::Quit),

        "settings" => {
            let json = trimmed["settings".len()..].trim();
            if json.is_empty() {
                return Err(ParseError::MissingArgument("a JSON document"));
            }
            Ok(Command::Settings { json: json.to_string() })
        }

        "new" => parse_new(&tokens),

        "card" => {
            let name = arg(&tokens, 1, "a building kind")?;
            let kind = BuildingKind::from_name(name)
                .ok_or_else(|| ParseError::UnknownBuildingKind(name.to_string()))?;
            Ok(Command::Card { kind })
        }

        "net" => Ok(Command::Net { player: number(&tokens, 1, "a player index")? }),
        "moves" => Ok(Command::Moves { player: number(&tokens, 1, "a player index")? }),
        "go" => Ok(Command::Go { player: number(&tokens, 1, "a player index")? }),
        "depth" => Ok(Command::Depth { plies: number(&tokens, 1, "a ply count")? }),
        "breadth" => Ok(Command::Breadth { cap: number(&tokens, 1, "a candidate cap")? }),
        "budget" => Ok(Command::Budget { nodes: number(&tokens, 1, "a node count")? }),

        "apply" => parse_apply(&tokens),

        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

/// Parses `new <players> [style] [seed]`.
fn parse_new(tokens: &[&str]) -> Result<Command, ParseError> {
    let players = number(tokens, 1, "a player count")?;
    let style = match tokens.get(2) {
        Some(name) => {
            BoardStyle::from_name(name).ok_or_else(|| ParseError::UnknownStyle((*name).to_string()))?
        }
        None => BoardStyle::Rectangle,
    };
    let seed = match tokens.get(3) {
        Some(_) => Some(number(tokens, 3, "a seed")?),
        None => None,
    };
    Ok(Command::New { players, style, seed })
}

/// Parses `apply <player> <action>` where the action is one of
/// `place <kind> <row> <col>`, `staff <row> <col> <delta>`,
/// `sell <delta>`, or `buy <delta>`.
fn parse_apply(tokens: &[&str]) -> Result<Command, ParseError> {
    let player: usize = number(tokens, 1, "a player index")?;
    let action = arg(tokens, 2, "a move action")?;
    let origin = Cell::new(0, 0);

    let mv = match action {
        "place" => {
            let name = arg(tokens, 3, "a building kind")?;
            let kind = BuildingKind::from_name(name)
                .ok_or_else(|| ParseError::UnknownBuildingKind(name.to_string()))?;
            let at = Cell::new(number(tokens, 4, "a row")?, number(tokens, 5, "a column")?);
            Move::new(player, kind, at, 0, origin, 0, 0)?
        }
        "staff" => {
            let at = Cell::new(number(tokens, 3, "a row")?, number(tokens, 4, "a column")?);
            let delta = number(tokens, 5, "a delta")?;
            Move::new(player, BuildingKind::None, origin, delta, at, 0, 0)?
        }
        "sell" => {
            let delta = number(tokens, 3, "a delta")?;
            Move::new(player, BuildingKind::None, origin, 0, origin, delta, 0)?
        }
        "buy" => {
            let delta = number(tokens, 3, "a delta")?;
            Move::new(player, BuildingKind::None, origin, 0, origin, 0, delta)?
        }
        other => return Err(ParseError::UnknownAction(other.to_string())),
    };
    Ok(Command::Apply { mv })
}

fn arg<'a>(tokens: &[&'a str], index: usize, what: &'static str) -> Result<&'a str, ParseError> {
    tokens.get(index).copied().ok_or(ParseError::MissingArgument(what))
}

fn number<T: std::str::FromStr>(
    tokens: &[&str],
    index: usize,
    what: &'static str,
) -> Result<T, ParseError> {
    let token = arg(tokens, index, what)?;
    token.parse().map_err(|_| ParseError::InvalidNumber(token.to_string()))
}

/// Formats a search outcome as a `bestmove` response line.
pub fn format_outcome(outcome: &SearchOutcome) -> String {
    match outcome.best {
        Some(mv) => format!("bestmove {} net {} nodes {}", mv, outcome.net, outcome.nodes),
        None => format!("bestmove pass net {} nodes {}", outcome.net, outcome.nodes),
    }
}

/// Formats a played turn as a single report line.
pub fn format_report(report: &TurnReport) -> String {
    let mv = match report.mv {
        Some(mv) => mv.to_string(),
        None => "pass".to_string(),
    };
    format!(
        "player {} move [{}] net {} capital {} round {}",
        report.player, mv, report.net, report.capital, report.round
    )
}

/// Renders a building kind's value table as text: y keys descending down
/// the left edge, x keys along the bottom.
pub fn format_table(kind: BuildingKind, settings: &Settings) -> String {
    let Some(((x_min, x_max), (y_min, y_max))) = kind.table_domain() else {
        return format!("{}: no value table", settings.card_name(kind));
    };

    let mut out = format!("{}, max players: {}\n", settings.card_name(kind), kind.max_players());
    for y in (y_min..=y_max).rev() {
        out.push_str(&format!("{y:>2}"));
        for x in x_min..=x_max {
            out.push_str(&format!(" |{:>2}", kind.value(x, y)));
        }
        out.push_str(" |\n");
    }
    out.push_str("  ");
    for x in x_min..=x_max {
        out.push_str(&format!("{x:>4}"));
    }
    out.push('\n');
    out
}
