//! Game settings and configuration errors.
//!
//! `Settings` bundles everything that varies per game setup: board size and
//! terrain card counts per player count, placement allowances per building
//! kind, economy costs, and display names for the card text renderers.
//! Settings deserialize from JSON with every field defaulting to the base
//! game, so a settings file only needs to name its overrides.

use serde::Deserialize;
use thiserror::Error;

use crate::board::card::{BuildingKind, CellKind};
use crate::board::mask::BoardStyle;

/// The maximum number of players the base game supports.
pub const MAX_PLAYERS: usize = 4;

/// Fatal game-setup errors. None of these are recoverable mid-game; a setup
/// front end should surface the message and abort.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported board: size {size} with style {}", .style.name())]
    UnsupportedBoard { size: usize, style: BoardStyle },

    #[error("unsupported player count {0}, expected 1-{MAX_PLAYERS}")]
    UnsupportedPlayerCount(usize),

    #[error("board size {size} does not match the generated card count {cards}")]
    CardCountMismatch { size: usize, cards: usize },
}

/// Game settings.
///
/// Per-player-count tables are indexed by `player_count - 1`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Active-cell board size per player count.
    pub board_sizes: [usize; MAX_PLAYERS],
    /// Industry card count per player count.
    pub industry_cards: [usize; MAX_PLAYERS],
    /// Farm card count per player count.
    pub farm_cards: [usize; MAX_PLAYERS],
    /// Residential card count per player count.
    pub residential_cards: [usize; MAX_PLAYERS],

    /// Terrain kinds a buy market may be placed on.
    pub buy_market_allowed_on: Vec<CellKind>,
    /// Terrain kinds a sell market may be placed on.
    pub sell_market_allowed_on: Vec<CellKind>,
    /// Terrain kinds a process building may be placed on.
    pub process_allowed_on: Vec<CellKind>,
    /// Terrain kinds a headquarters may be placed on.
    pub hq_allowed_on: Vec<CellKind>,

    /// Per-turn upkeep charged for each employee.
    pub employee_cost: i32,
    /// Per-turn upkeep charged for each placed building.
    pub building_cost: i32,
    /// Capital each player starts the game with.
    pub starting_capital: i32,
    /// Number of rounds in a full game.
    pub turns_per_game: u32,

    /// Display name for buy-market cards.
    pub buy_card_name: String,
    /// Display name for sell-market cards.
    pub sell_card_name: String,
    /// Display name for process cards.
    pub process_card_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            board_sizes: [12, 16, 20, 24],
            industry_cards: [4, 6, 8, 10],
            farm_cards: [4, 5, 6, 7],
            residential_cards: [4, 5, 6, 7],
            buy_market_allowed_on: vec![CellKind::Farm],
            sell_market_allowed_on: vec![CellKind::Residential],
            process_allowed_on: vec![CellKind::Industry],
            hq_allowed_on: vec![CellKind::Industry, CellKind::Residential, CellKind::Farm],
            employee_cost: 1,
            building_cost: 1,
            starting_capital: 10,
            turns_per_game: 12,
            buy_card_name: "Wheat Market".to_string(),
            sell_card_name: "Bread Market".to_string(),
            process_card_name: "Factory".to_string(),
        }
    }
}

impl Settings {
    /// Parses settings from a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Settings, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns the board size for a player count.
    pub fn board_size(&self, players: usize) -> Result<usize, ConfigError> {
        if players == 0 || players > MAX_PLAYERS {
            return Err(ConfigError::UnsupportedPlayerCount(players));
        }
        Ok(self.board_sizes[players - 1])
    }

    /// Returns the terrain card count of `kind` for a player count.
    pub fn card_count(&self, kind: CellKind, players: usize) -> Result<usize, ConfigError> {
        if players == 0 || players > MAX_PLAYERS {
            return Err(ConfigError::UnsupportedPlayerCount(players));
        }
        let table = match kind {
            CellKind::Industry => &self.industry_cards,
            CellKind::Farm => &self.farm_cards,
            CellKind::Residential => &self.residential_cards,
        };
        Ok(table[players - 1])
    }

    /// Returns the terrain kinds `kind` may be placed on under these settings.
    pub fn allowed_on(&self, kind: BuildingKind) -> &[CellKind] {
        match kind {
            BuildingKind::None => &[],
            BuildingKind::BuyMarket => &self.buy_market_allowed_on,
            BuildingKind::SellMarket => &self.sell_market_allowed_on,
            BuildingKind::Process => &self.process_allowed_on,
            BuildingKind::Hq => &self.hq_allowed_on,
        }
    }

    /// Returns the display name for a building kind.
    pub fn card_name(&self, kind: BuildingKind) -> &str {
        match kind {
            BuildingKind::None => "Empty",
            BuildingKind::BuyMarket => &self.buy_card_name,
            BuildingKind::SellMarket => &self.sell_card_name,
            BuildingKind::Process => &self.process_card_name,
            BuildingKind::Hq => "HQ",
        }
    }
}
