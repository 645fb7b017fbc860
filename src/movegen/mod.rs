//! Candidate-move enumeration.
//!
//! Generates the set of valid moves for one player in the current state:
//! one placement per available building kind on every cell without that
//! player's building, a staffing change in each direction on every cell
//! with one, and both price adjustments. Candidates are filtered through
//! move validation, so the search only ever sees legal branches.

use crate::board::{Board, BuildingKind, Move};

/// Enumerates `player`'s valid moves given the building kinds available
/// this turn.
///
/// The order is deterministic: placements and staffing in active-cell
/// order, then sell-price and buy-price adjustments.
pub fn enumerate_moves(player: usize, board: &Board, available: &[BuildingKind]) -> Vec<Move> {
    let mut candidates = Vec::new();

    for index in 0..board.layout().size() {
        let cell = board.layout().location(index);
        if board.building(player, index).is_building() {
            candidates.push(Move::staff(player, cell, -1));
            candidates.push(Move::staff(player, cell, 1));
        } else {
            for &kind in available {
                if kind.is_building() {
                    candidates.push(Move::place(player, kind, cell));
                }
            }
        }
    }

    candidates.push(Move::adjust_sell_price(player, -1));
    candidates.push(Move::adjust_sell_price(player, 1));
    candidates.push(Move::adjust_buy_price(player, -1));
    candidates.push(Move::adjust_buy_price(player, 1));

    candidates.retain(|m| m.validate(board));
    candidates
}
