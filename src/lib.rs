//! Cartel engine library.
//!
//! The economic core of a tile-based business-simulation board game:
//! players place buildings on a shared irregular grid, staff them, and set
//! buy/sell prices; a depth-bounded exhaustive search picks each player's
//! best move by terminal net income. Exposes the board representation, move
//! model, evaluator, move generation, and search modules for use by
//! integration tests and the binary entry point.

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod movegen;
pub mod protocol;
pub mod search;
