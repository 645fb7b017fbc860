//! Board state.
//!
//! `Board` wraps the immutable layout with the mutable per-player overlays:
//! one building slot and one employee count per active cell per player, plus
//! each player's buy and sell price. All mutation goes through validated
//! moves (`board::moves`); the accessors here are the read surface shared by
//! validation, evaluation, and rendering.

use std::fmt;

use rand::Rng;

use super::card::{BoardCard, BuildingKind, CellKind, BUILDING_KIND_COUNT};
use super::layout::Layout;
use super::mask::{BoardStyle, Cell};
use crate::config::{ConfigError, Settings};

/// Buy-price bounds, inclusive.
pub const BUY_PRICE_MIN: i32 = 1;
pub const BUY_PRICE_MAX: i32 = 4;

/// Sell-price bounds, inclusive.
pub const SELL_PRICE_MIN: i32 = 2;
pub const SELL_PRICE_MAX: i32 = 5;

/// Economy constants lifted out of settings at board construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EconomyRules {
    pub employee_cost: i32,
    pub building_cost: i32,
}

/// One player's overlay over the board.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PlayerOverlay {
    /// Building per active cell, indexed by active-cell index.
    buildings: Vec<BuildingKind>,
    /// Employee count per active cell.
    employees: Vec<u8>,
    buy_price: i32,
    sell_price: i32,
}

impl PlayerOverlay {
    fn empty(size: usize) -> Self {
        PlayerOverlay {
            buildings: vec![BuildingKind::None; size],
            employees: vec![0; size],
            buy_price: BUY_PRICE_MIN,
            sell_price: SELL_PRICE_MIN,
        }
    }
}

/// Complete game-board state: layout, placement rules, and player overlays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    layout: Layout,
    /// Allowed terrain kinds per building kind, from settings.
    allowed: [Vec<CellKind>; BUILDING_KIND_COUNT],
    economy: EconomyRules,
    players: Vec<PlayerOverlay>,
}

impl Board {
    /// Builds a fresh board for `players` under `settings`.
    ///
    /// Fails fatally on any configuration error (unsupported player count,
    /// size or style, or a card-count/size mismatch). `shuffle` controls the
    /// terrain card order; the caller's RNG makes layouts reproducible.
    pub fn new(
        settings: &Settings,
        players: usize,
        shuffle: bool,
        style: BoardStyle,
        rng: &mut impl Rng,
    ) -> Result<Board, ConfigError> {
        let layout = Layout::generate(settings, players, shuffle, style, rng)?;
        let size = layout.size();
        let allowed = [
            settings.allowed_on(BuildingKind::None).to_vec(),
            settings.allowed_on(BuildingKind::BuyMarket).to_vec(),
            settings.allowed_on(BuildingKind::SellMarket).to_vec(),
            settings.allowed_on(BuildingKind::Process).to_vec(),
            settings.allowed_on(BuildingKind::Hq).to_vec(),
        ];
        Ok(Board {
            layout,
            allowed,
            economy: EconomyRules {
                employee_cost: settings.employee_cost,
                building_cost: settings.building_cost,
            },
            players: vec![PlayerOverlay::empty(size); players],
        })
    }

    /// Returns the immutable layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Returns the number of players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Returns the economy constants.
    pub fn economy(&self) -> EconomyRules {
        self.economy
    }

    /// Returns true if `kind` may be placed on `terrain` under this board's
    /// settings.
    pub fn placement_allowed(&self, kind: BuildingKind, terrain: CellKind) -> bool {
        self.allowed[kind as usize].contains(&terrain)
    }

    /// Returns `player`'s building at an active-cell index.
    pub fn building(&self, player: usize, index: usize) -> BuildingKind {
        self.players[player].buildings[index]
    }

    /// Returns `player`'s building at a grid location, or `None` for
    /// inactive cells.
    pub fn building_at(&self, player: usize, cell: Cell) -> Option<BuildingKind> {
        self.layout.index_of(cell).map(|i| self.building(player, i))
    }

    /// Returns `player`'s employee count at an active-cell index.
    pub fn employees(&self, player: usize, index: usize) -> u8 {
        self.players[player].employees[index]
    }

    /// Returns the all-player employee total at an active-cell index.
    pub fn total_employees(&self, index: usize) -> u32 {
        self.players.iter().map(|p| u32::from(p.employees[index])).sum()
    }

    /// Returns `player`'s buy price.
    pub fn buy_price(&self, player: usize) -> i32 {
        self.players[player].buy_price
    }

    /// Returns `player`'s sell price.
    pub fn sell_price(&self, player: usize) -> i32 {
        self.players[player].sell_price
    }

    /// Returns the number of players with a building at an active-cell
    /// index, and the kind already present (if any). Co-occupants always
    /// share a kind, which move validation enforces.
    pub fn occupancy(&self, index: usize) -> (usize, Option<BuildingKind>) {
        let mut count = 0;
        let mut kind = None;
        for overlay in &self.players {
            let b = overlay.buildings[index];
            if b.is_building() {
                count += 1;
                kind = Some(b);
            }
        }
        (count, kind)
    }

    /// Returns the terrain card at an active-cell index.
    pub fn card(&self, index: usize) -> BoardCard {
        self.layout.card(index)
    }

    pub(crate) fn set_building(&mut self, player: usize, index: usize, kind: BuildingKind) {
        self.players[player].buildings[index] = kind;
    }

    pub(crate) fn add_employees(&mut self, player: usize, index: usize, delta: i8) {
        let current = i16::from(self.players[player].employees[index]);
        self.players[player].employees[index] = (current + i16::from(delta)) as u8;
    }

    pub(crate) fn add_buy_price(&mut self, player: usize, delta: i32) {
        self.players[player].buy_price += delta;
    }

    pub(crate) fn add_sell_price(&mut self, player: usize, delta: i32) {
        self.players[player].sell_price += delta;
    }
}

/// Renders the grid: every active cell shows its terrain letter and
/// capacity, then each player's building letter and employee count.
/// Inactive cells render blank, preserving column alignment.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.layout.rows() {
            for col in 0..self.layout.cols() {
                let cell = Cell::new(row, col);
                write!(f, "| ")?;
                match self.layout.index_of(cell) {
                    Some(index) => {
                        let card = self.layout.card(index);
                        write!(f, "{}{}", card.kind.letter(), card.max_employees)?;
                        for player in 0..self.player_count() {
                            write!(
                                f,
                                " {}{}",
                                self.building(player, index).letter(),
                                self.employees(player, index)
                            )?;
                        }
                    }
                    None => {
                        write!(f, "  ")?;
                        for _ in 0..self.player_count() {
                            write!(f, "   ")?;
                        }
                    }
                }
                write!(f, " ")?;
            }
            writeln!(f, "|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(players: usize) -> Board {
        Board::new(
            &Settings::default(),
            players,
            false,
            BoardStyle::Rectangle,
            &mut StdRng::seed_from_u64(7),
        )
        .unwrap()
    }

    #[test]
    fn fresh_board_is_empty_with_starting_prices() {
        let board = board(2);
        for player in 0..2 {
            for index in 0..board.layout().size() {
                assert_eq!(board.building(player, index), BuildingKind::None);
                assert_eq!(board.employees(player, index), 0);
            }
            assert_eq!(board.buy_price(player), BUY_PRICE_MIN);
            assert_eq!(board.sell_price(player), SELL_PRICE_MIN);
        }
    }

    #[test]
    fn occupancy_counts_players_with_buildings() {
        let mut board = board(3);
        assert_eq!(board.occupancy(0), (0, None));
        board.set_building(0, 0, BuildingKind::Process);
        board.set_building(2, 0, BuildingKind::Process);
        assert_eq!(board.occupancy(0), (2, Some(BuildingKind::Process)));
    }

    #[test]
    fn total_employees_sums_all_players() {
        let mut board = board(2);
        board.add_employees(0, 3, 2);
        board.add_employees(1, 3, 1);
        assert_eq!(board.total_employees(3), 3);
        assert_eq!(board.employees(0, 3), 2);
    }

    #[test]
    fn placement_allowance_follows_settings() {
        let board = board(1);
        assert!(board.placement_allowed(BuildingKind::BuyMarket, CellKind::Farm));
        assert!(!board.placement_allowed(BuildingKind::BuyMarket, CellKind::Industry));
        assert!(board.placement_allowed(BuildingKind::Hq, CellKind::Industry));
    }

    #[test]
    fn display_renders_one_line_per_row() {
        let board = board(1);
        let rendered = board.to_string();
        assert_eq!(rendered.lines().count(), board.layout().rows());
        // Unshuffled single-player board starts with an industry cell.
        assert!(rendered.starts_with("| I3 -0"));
    }

    #[test]
    fn clone_is_independent() {
        let mut board = board(1);
        let snapshot = board.clone();
        board.set_building(0, 0, BuildingKind::Hq);
        board.add_buy_price(0, 1);
        assert_eq!(snapshot.building(0, 0), BuildingKind::None);
        assert_eq!(snapshot.buy_price(0), BUY_PRICE_MIN);
        assert_ne!(board, snapshot);
    }
}
