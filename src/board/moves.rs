//! Moves: atomic, validated board-state transitions.
//!
//! A move is one player's turn action: place a building, change staffing on
//! a cell by one, or change a price by one. The struct carries every field
//! at once, but a valid move exercises one sub-effect in practice; a move
//! with no effect at all (the empty move) never validates. Validation is a
//! pure predicate over `(move, board)` and is how illegal candidates are
//! filtered -- rejection is not an error. Application mutates exactly the
//! implied fields and returns an `Undo` record that reverses them exactly,
//! which the search uses instead of copying the board per node.

use std::fmt;

use thiserror::Error;

use super::card::BuildingKind;
use super::mask::Cell;
use super::state::{
    Board, BUY_PRICE_MAX, BUY_PRICE_MIN, SELL_PRICE_MAX, SELL_PRICE_MIN,
};

/// Errors raised when constructing a malformed move from untrusted input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("employee delta {0} outside -1..=1")]
    EmployeeDelta(i8),

    #[error("sell price delta {0} outside -1..=1")]
    SellPriceDelta(i8),

    #[error("buy price delta {0} outside -1..=1")]
    BuyPriceDelta(i8),
}

/// An atomic single-player action against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub player: usize,
    /// Building to place; `None` places nothing.
    pub building: BuildingKind,
    pub building_at: Cell,
    pub employee_delta: i8,
    pub employee_at: Cell,
    pub sell_price_delta: i8,
    pub buy_price_delta: i8,
}

impl Move {
    /// Creates a move from untrusted components, checking the delta ranges.
    /// Players may change staffing and each price by at most one per turn.
    pub fn new(
        player: usize,
        building: BuildingKind,
        building_at: Cell,
        employee_delta: i8,
        employee_at: Cell,
        sell_price_delta: i8,
        buy_price_delta: i8,
    ) -> Result<Move, MoveError> {
        if !(-1..=1).contains(&employee_delta) {
            return Err(MoveError::EmployeeDelta(employee_delta));
        }
        if !(-1..=1).contains(&sell_price_delta) {
            return Err(MoveError::SellPriceDelta(sell_price_delta));
        }
        if !(-1..=1).contains(&buy_price_delta) {
            return Err(MoveError::BuyPriceDelta(buy_price_delta));
        }
        Ok(Move {
            player,
            building,
            building_at,
            employee_delta,
            employee_at,
            sell_price_delta,
            buy_price_delta,
        })
    }

    /// Creates a building-placement move.
    pub fn place(player: usize, building: BuildingKind, at: Cell) -> Move {
        Move { building, building_at: at, ..Move::pass(player) }
    }

    /// Creates a staffing move. `delta` must be -1 or +1; use [`Move::new`]
    /// for untrusted input.
    pub fn staff(player: usize, at: Cell, delta: i8) -> Move {
        debug_assert!(delta == -1 || delta == 1);
        Move { employee_delta: delta, employee_at: at, ..Move::pass(player) }
    }

    /// Creates a sell-price move. `delta` must be -1 or +1.
    pub fn adjust_sell_price(player: usize, delta: i8) -> Move {
        debug_assert!(delta == -1 || delta == 1);
        Move { sell_price_delta: delta, ..Move::pass(player) }
    }

    /// Creates a buy-price move. `delta` must be -1 or +1.
    pub fn adjust_buy_price(player: usize, delta: i8) -> Move {
        debug_assert!(delta == -1 || delta == 1);
        Move { buy_price_delta: delta, ..Move::pass(player) }
    }

    /// The do-nothing move. Never validates; used as the base for the
    /// single-effect constructors.
    fn pass(player: usize) -> Move {
        Move {
            player,
            building: BuildingKind::None,
            building_at: Cell::new(0, 0),
            employee_delta: 0,
            employee_at: Cell::new(0, 0),
            sell_price_delta: 0,
            buy_price_delta: 0,
        }
    }

    /// Returns true if the move has no effect at all.
    pub fn is_empty(&self) -> bool {
        !self.building.is_building()
            && self.employee_delta == 0
            && self.sell_price_delta == 0
            && self.buy_price_delta == 0
    }

    /// Validates the move against a board snapshot.
    ///
    /// Pure: no mutation, same answer for the same state. Every non-trivial
    /// component must pass its check; the empty move is always invalid.
    pub fn validate(&self, board: &Board) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.building.is_building() && !self.placement_ok(board) {
            return false;
        }
        if self.employee_delta != 0 && !self.staffing_ok(board) {
            return false;
        }
        let sell = board.sell_price(self.player) + i32::from(self.sell_price_delta);
        if !(SELL_PRICE_MIN..=SELL_PRICE_MAX).contains(&sell) {
            return false;
        }
        let buy = board.buy_price(self.player) + i32::from(self.buy_price_delta);
        (BUY_PRICE_MIN..=BUY_PRICE_MAX).contains(&buy)
    }

    fn placement_ok(&self, board: &Board) -> bool {
        let Some(index) = board.layout().index_of(self.building_at) else {
            return false;
        };
        if board.building(self.player, index).is_building() {
            return false;
        }
        if !board.placement_allowed(self.building, board.card(index).kind) {
            return false;
        }
        // Co-occupants must share the kind and leave a player slot free.
        let (count, existing) = board.occupancy(index);
        match existing {
            None => true,
            Some(kind) => kind == self.building && count < usize::from(kind.max_players()),
        }
    }

    fn staffing_ok(&self, board: &Board) -> bool {
        let Some(index) = board.layout().index_of(self.employee_at) else {
            return false;
        };
        if !board.building(self.player, index).is_building() {
            return false;
        }
        let own = i32::from(board.employees(self.player, index)) + i32::from(self.employee_delta);
        if own < 0 {
            return false;
        }
        let total = board.total_employees(index) as i32 + i32::from(self.employee_delta);
        let capacity = i32::from(board.card(index).max_employees);
        (0..=capacity).contains(&total)
    }

    /// Applies the move, returning the exact inverse record.
    ///
    /// Assumes the move validated against this exact state; applying an
    /// unvalidated move is a contract violation (asserted in debug builds,
    /// components with failed lookups are skipped in release builds).
    pub fn apply(&self, board: &mut Board) -> Undo {
        debug_assert!(self.validate(board), "applied an unvalidated move: {self}");
        let mut undo = Undo {
            player: self.player,
            placed: None,
            staffed: None,
            sell_price_delta: self.sell_price_delta,
            buy_price_delta: self.buy_price_delta,
        };
        if self.building.is_building() {
            if let Some(index) = board.layout().index_of(self.building_at) {
                board.set_building(self.player, index, self.building);
                undo.placed = Some(index);
            }
        }
        if self.employee_delta != 0 {
            if let Some(index) = board.layout().index_of(self.employee_at) {
                board.add_employees(self.player, index, self.employee_delta);
                undo.staffed = Some((index, self.employee_delta));
            }
        }
        board.add_sell_price(self.player, i32::from(self.sell_price_delta));
        board.add_buy_price(self.player, i32::from(self.buy_price_delta));
        undo
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "pass");
        }
        let mut sep = "";
        if self.building.is_building() {
            write!(f, "place {} at {}", self.building.name(), self.building_at)?;
            sep = " ";
        }
        if self.employee_delta != 0 {
            write!(f, "{sep}staff {:+} at {}", self.employee_delta, self.employee_at)?;
            sep = " ";
        }
        if self.sell_price_delta != 0 {
            write!(f, "{sep}sell {:+}", self.sell_price_delta)?;
            sep = " ";
        }
        if self.buy_price_delta != 0 {
            write!(f, "{sep}buy {:+}", self.buy_price_delta)?;
        }
        Ok(())
    }
}

/// The exact inverse of an applied move. Reverting on the same board
/// restores the pre-application state field for field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    player: usize,
    /// Index where a building was placed (the slot was empty before).
    placed: Option<usize>,
    /// Index and delta of a staffing change.
    staffed: Option<(usize, i8)>,
    sell_price_delta: i8,
    buy_price_delta: i8,
}

impl Undo {
    /// Reverts the recorded move on the board it was applied to.
    pub fn revert(&self, board: &mut Board) {
        if let Some(index) = self.placed {
            board.set_building(self.player, index, BuildingKind::None);
        }
        if let Some((index, delta)) = self.staffed {
            board.add_employees(self.player, index, -delta);
        }
        board.add_sell_price(self.player, -i32::from(self.sell_price_delta));
        board.add_buy_price(self.player, -i32::from(self.buy_price_delta));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::card::CellKind;
    use crate::board::mask::BoardStyle;
    use crate::config::Settings;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Unshuffled 2-player board: cells 0-5 industry, 6-10 farm,
    /// 11-15 residential.
    fn board() -> Board {
        Board::new(
            &Settings::default(),
            2,
            false,
            BoardStyle::Rectangle,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap()
    }

    #[test]
    fn delta_range_is_checked_at_construction() {
        let err = Move::new(0, BuildingKind::None, Cell::new(0, 0), 2, Cell::new(0, 0), 0, 0);
        assert_eq!(err, Err(MoveError::EmployeeDelta(2)));
        let err = Move::new(0, BuildingKind::None, Cell::new(0, 0), 0, Cell::new(0, 0), -2, 0);
        assert_eq!(err, Err(MoveError::SellPriceDelta(-2)));
    }

    #[test]
    fn empty_move_never_validates() {
        let board = board();
        let pass = Move::new(
            0,
            BuildingKind::None,
            Cell::new(0, 0),
            0,
            Cell::new(0, 0),
            0,
            0,
        )
        .unwrap();
        assert!(pass.is_empty());
        assert!(!pass.validate(&board));
    }

    #[test]
    fn placement_requires_matching_terrain() {
        let board = board();
        // Cell (0,0) is industry on the unshuffled board.
        assert!(!Move::place(0, BuildingKind::BuyMarket, Cell::new(0, 0)).validate(&board));
        assert!(Move::place(0, BuildingKind::Process, Cell::new(0, 0)).validate(&board));
        assert!(Move::place(0, BuildingKind::Hq, Cell::new(0, 0)).validate(&board));
    }

    #[test]
    fn placement_rejects_inactive_and_out_of_bounds_cells() {
        let board = board();
        assert!(!Move::place(0, BuildingKind::Process, Cell::new(40, 40)).validate(&board));
    }

    #[test]
    fn placement_rejects_own_occupied_cell() {
        let mut board = board();
        let at = Cell::new(0, 0);
        Move::place(0, BuildingKind::Process, at).apply(&mut board);
        assert!(!Move::place(0, BuildingKind::Hq, at).validate(&board));
    }

    #[test]
    fn co_occupancy_requires_same_kind_below_cap() {
        let mut board = board();
        // First farm cell is index 6, location (1,2) on the 4x4 board.
        let farm = board.layout().location(6);
        assert_eq!(board.card(6).kind, CellKind::Farm);
        Move::place(0, BuildingKind::BuyMarket, farm).apply(&mut board);

        // Same kind, second player, cap 2: allowed.
        assert!(Move::place(1, BuildingKind::BuyMarket, farm).validate(&board));
        // Different kind on an occupied cell: rejected.
        assert!(!Move::place(1, BuildingKind::Hq, farm).validate(&board));
    }

    #[test]
    fn co_occupancy_cap_is_enforced() {
        let mut board = board();
        // Process cap is 1 player.
        let at = Cell::new(0, 0);
        Move::place(0, BuildingKind::Process, at).apply(&mut board);
        assert!(!Move::place(1, BuildingKind::Process, at).validate(&board));
    }

    #[test]
    fn staffing_requires_own_building() {
        let mut board = board();
        let at = Cell::new(0, 0);
        assert!(!Move::staff(0, at, 1).validate(&board));
        Move::place(0, BuildingKind::Process, at).apply(&mut board);
        assert!(Move::staff(0, at, 1).validate(&board));
        // The other player has no building there.
        assert!(!Move::staff(1, at, 1).validate(&board));
    }

    #[test]
    fn staffing_respects_shared_capacity() {
        let mut board = board();
        let farm = board.layout().location(6);
        Move::place(0, BuildingKind::BuyMarket, farm).apply(&mut board);
        Move::place(1, BuildingKind::BuyMarket, farm).apply(&mut board);
        Move::staff(0, farm, 1).apply(&mut board);
        Move::staff(0, farm, 1).apply(&mut board);
        Move::staff(1, farm, 1).apply(&mut board);
        // Cell is at its capacity of 3 across both players.
        assert_eq!(board.total_employees(6), 3);
        assert!(!Move::staff(0, farm, 1).validate(&board));
        assert!(!Move::staff(1, farm, 1).validate(&board));
        // Removal is still legal.
        assert!(Move::staff(1, farm, -1).validate(&board));
    }

    #[test]
    fn staffing_cannot_take_own_count_negative() {
        let mut board = board();
        let farm = board.layout().location(6);
        Move::place(0, BuildingKind::BuyMarket, farm).apply(&mut board);
        Move::place(1, BuildingKind::BuyMarket, farm).apply(&mut board);
        Move::staff(0, farm, 1).apply(&mut board);
        // The cell total is 1, but none of those employees are player 1's.
        assert!(!Move::staff(1, farm, -1).validate(&board));
        // Player 0 can remove the employee it placed.
        assert!(Move::staff(0, farm, -1).validate(&board));
    }

    #[test]
    fn price_deltas_respect_bounds() {
        let mut board = board();
        // Starting prices: buy 1, sell 2.
        assert!(!Move::adjust_buy_price(0, -1).validate(&board));
        assert!(Move::adjust_buy_price(0, 1).validate(&board));
        assert!(!Move::adjust_sell_price(0, -1).validate(&board));
        assert!(Move::adjust_sell_price(0, 1).validate(&board));

        for _ in 0..3 {
            Move::adjust_buy_price(0, 1).apply(&mut board);
            Move::adjust_sell_price(0, 1).apply(&mut board);
        }
        assert_eq!(board.buy_price(0), BUY_PRICE_MAX);
        assert_eq!(board.sell_price(0), SELL_PRICE_MAX);
        assert!(!Move::adjust_buy_price(0, 1).validate(&board));
        assert!(!Move::adjust_sell_price(0, 1).validate(&board));
        assert!(Move::adjust_buy_price(0, -1).validate(&board));
        assert!(Move::adjust_sell_price(0, -1).validate(&board));
    }

    #[test]
    fn validate_is_idempotent() {
        let board = board();
        let mv = Move::place(0, BuildingKind::Process, Cell::new(0, 0));
        assert_eq!(mv.validate(&board), mv.validate(&board));
        let bad = Move::adjust_buy_price(0, -1);
        assert_eq!(bad.validate(&board), bad.validate(&board));
    }

    #[test]
    fn apply_then_revert_restores_the_board() {
        let mut board = board();
        let pristine = board.clone();

        let place = Move::place(0, BuildingKind::Process, Cell::new(0, 0));
        let undo = place.apply(&mut board);
        assert_ne!(board, pristine);
        undo.revert(&mut board);
        assert_eq!(board, pristine);

        Move::place(0, BuildingKind::Process, Cell::new(0, 0)).apply(&mut board);
        let staffed = board.clone();
        let undo = Move::staff(0, Cell::new(0, 0), 1).apply(&mut board);
        undo.revert(&mut board);
        assert_eq!(board, staffed);

        let undo = Move::adjust_sell_price(0, 1).apply(&mut board);
        undo.revert(&mut board);
        assert_eq!(board, staffed);
    }

    #[test]
    fn display_names_the_effect() {
        let mv = Move::place(0, BuildingKind::BuyMarket, Cell::new(2, 0));
        assert_eq!(mv.to_string(), "place buy_market at 2,0");
        assert_eq!(Move::staff(0, Cell::new(1, 1), -1).to_string(), "staff -1 at 1,1");
        assert_eq!(Move::adjust_sell_price(0, 1).to_string(), "sell +1");
    }
}
