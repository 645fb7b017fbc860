//! Engine session state.
//!
//! Holds the authoritative board between protocol commands, runs the
//! lookahead search for the `go` and `turn` commands, applies chosen moves,
//! and keeps the per-player capital and round bookkeeping. The engine owns
//! the only RNG in the system, so a seeded session replays identically.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Board, BoardStyle, BuildingKind, Move, PLACEABLE_BUILDING_KINDS};
use crate::config::{ConfigError, Settings};
use crate::search::{find_best_move, SearchLimits, SearchOutcome};

/// Summary of one turn played by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub player: usize,
    /// The applied move, or `None` when the player passed.
    pub mv: Option<Move>,
    /// The player's realized net income after the move.
    pub net: i32,
    /// The player's capital after banking this turn's net.
    pub capital: i32,
    /// The round number after this turn.
    pub round: u32,
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    settings: Settings,
    limits: SearchLimits,
    board: Option<Board>,
    capitals: Vec<i32>,
    next_player: usize,
    round: u32,
    rng: SmallRng,
}

impl Engine {
    /// Creates an engine with default settings and an entropy-seeded RNG.
    pub fn new() -> Self {
        Engine::from_rng(SmallRng::from_entropy())
    }

    /// Creates an engine whose board generation replays under `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Engine::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Engine {
            settings: Settings::default(),
            limits: SearchLimits::default(),
            board: None,
            capitals: Vec::new(),
            next_player: 0,
            round: 0,
            rng,
        }
    }

    /// Replaces the settings from a JSON document. Takes effect at the next
    /// `new_game`.
    pub fn load_settings(&mut self, json: &str) -> Result<(), serde_json::Error> {
        self.settings = Settings::from_json(json)?;
        Ok(())
    }

    /// Reseeds the RNG so the next `new_game` generates a reproducible
    /// layout. Settings and search limits are untouched.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Returns the active settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the search limits for in-place adjustment.
    pub fn limits_mut(&mut self) -> &mut SearchLimits {
        &mut self.limits
    }

    /// Starts a fresh game, replacing any previous board.
    pub fn new_game(
        &mut self,
        players: usize,
        shuffle: bool,
        style: BoardStyle,
    ) -> Result<(), ConfigError> {
        let board = Board::new(&self.settings, players, shuffle, style, &mut self.rng)?;
        log::info!(
            "new game: {players} players, {} cells, style {}",
            board.layout().size(),
            style.name()
        );
        self.board = Some(board);
        self.capitals = vec![self.settings.starting_capital; players];
        self.next_player = 0;
        self.round = 0;
        Ok(())
    }

    /// Returns the current board, if a game is running.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Returns the player to act next.
    pub fn next_player(&self) -> usize {
        self.next_player
    }

    /// Returns the completed round count.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Returns `player`'s banked capital.
    pub fn capital(&self, player: usize) -> Option<i32> {
        self.capitals.get(player).copied()
    }

    /// Returns true once the configured number of rounds has been played.
    pub fn game_over(&self) -> bool {
        self.board.is_some() && self.round >= self.settings.turns_per_game
    }

    /// The building kinds on offer each turn. An external deck mechanism
    /// would narrow this; the engine itself offers the full set.
    pub fn hand(&self) -> &'static [BuildingKind] {
        &PLACEABLE_BUILDING_KINDS
    }

    /// Searches for `player`'s best move without touching the board.
    pub fn best_move(&self, player: usize) -> Option<SearchOutcome> {
        let board = self.board.as_ref()?;
        if player >= board.player_count() {
            return None;
        }
        Some(find_best_move(player, board, self.hand(), self.limits))
    }

    /// Validates and applies a caller-supplied move. Returns false if no
    /// game is running or the move does not validate.
    pub fn apply_move(&mut self, mv: Move) -> bool {
        let Some(board) = self.board.as_mut() else {
            return false;
        };
        if mv.player >= board.player_count() || !mv.validate(board) {
            return false;
        }
        mv.apply(board);
        true
    }

    /// Plays the next player's turn: searches, applies the best move (if
    /// any), banks the realized net income, and advances the rotation.
    /// Returns `None` when no game is running or the game is over.
    pub fn play_turn(&mut self) -> Option<TurnReport> {
        if self.board.is_none() || self.game_over() {
            return None;
        }
        let player = self.next_player;
        let outcome = {
            let board = self.board.as_ref()?;
            find_best_move(player, board, self.hand(), self.limits)
        };

        let board = self.board.as_mut()?;
        if let Some(mv) = outcome.best {
            mv.apply(board);
        }
        let net = board.player_net(player);
        self.capitals[player] += net;

        self.next_player = (player + 1) % board.player_count();
        if self.next_player == 0 {
            self.round += 1;
        }
        Some(TurnReport {
            player,
            mv: outcome.best,
            net,
            capital: self.capitals[player],
            round: self.round,
        })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
