//! Lookahead search.
//!
//! Exhaustive depth-bounded search over one player's own move sequences.
//! Every other player's overlay is a frozen snapshot for the whole
//! lookahead: the search maximises this player's terminal net income
//! against a static rest-of-board, it does not model counter-moves. The
//! branching factor grows with board size and hand size, so the walk is
//! bounded three ways: by depth, by an optional per-ply candidate cap
//! (`moves_to_try`), and by an optional total node budget.
//!
//! The caller's board is never touched. Each root candidate is explored on
//! its own clone (in parallel via rayon -- branches share no mutable
//! state), and within a branch moves are applied and reverted through the
//! exact undo record instead of copying the board per node.

use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::board::{Board, BuildingKind, Move};
use crate::eval::net_income;
use crate::movegen::enumerate_moves;

/// Default lookahead depth in plies.
pub const DEFAULT_SEARCH_DEPTH: u32 = 4;

/// Bounds on the move-tree walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Plies to look ahead.
    pub max_depth: u32,
    /// Caps each ply's candidate list, trading breadth for depth.
    pub moves_to_try: Option<usize>,
    /// Caps the number of applied moves across the whole search. Once
    /// exhausted, open branches terminate at their current evaluation.
    pub node_budget: Option<u64>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits { max_depth: DEFAULT_SEARCH_DEPTH, moves_to_try: None, node_budget: None }
    }
}

impl SearchLimits {
    /// Limits with a given depth and no breadth or node bounds.
    pub fn depth(max_depth: u32) -> Self {
        SearchLimits { max_depth, ..SearchLimits::default() }
    }
}

/// Result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Best first move, or `None` when the player can only pass.
    pub best: Option<Move>,
    /// Terminal net income of the best sequence found.
    pub net: i32,
    /// Moves applied during the walk.
    pub nodes: u64,
}

/// Finds the best first move of a bounded-depth move sequence for `player`.
///
/// Enumerates the valid candidates, explores each to the horizon, and
/// returns the first move of the sequence with the maximum terminal net
/// income. Later plies of the winning sequence are planning artifacts and
/// are recomputed fresh next turn. With no candidates (or a zero depth) the
/// player passes: no move, and the net income of the state as it stands.
pub fn find_best_move(
    player: usize,
    board: &Board,
    available: &[BuildingKind],
    limits: SearchLimits,
) -> SearchOutcome {
    let mut candidates = enumerate_moves(player, board, available);
    truncate(&mut candidates, limits.moves_to_try);
    if candidates.is_empty() || limits.max_depth == 0 {
        return SearchOutcome { best: None, net: net_income(player, board), nodes: 0 };
    }

    let nodes = AtomicU64::new(0);
    let nets: Vec<i32> = candidates
        .par_iter()
        .map(|mv| {
            let mut scratch = board.clone();
            nodes.fetch_add(1, Ordering::Relaxed);
            mv.apply(&mut scratch);
            best_net(player, &mut scratch, available, limits.max_depth - 1, limits, &nodes)
        })
        .collect();

    // First maximum wins, keeping the choice deterministic for a given
    // candidate order.
    let mut best_index = 0;
    for (i, net) in nets.iter().enumerate() {
        if *net > nets[best_index] {
            best_index = i;
        }
    }

    let outcome = SearchOutcome {
        best: Some(candidates[best_index]),
        net: nets[best_index],
        nodes: nodes.into_inner(),
    };
    log::debug!(
        "search: player {player} depth {} candidates {} nodes {} net {}",
        limits.max_depth,
        candidates.len(),
        outcome.nodes,
        outcome.net
    );
    outcome
}

/// Depth-first walk below one applied move. Returns the best terminal net
/// income reachable within the remaining depth and budget.
fn best_net(
    player: usize,
    board: &mut Board,
    available: &[BuildingKind],
    depth: u32,
    limits: SearchLimits,
    nodes: &AtomicU64,
) -> i32 {
    if depth == 0 || budget_spent(limits, nodes) {
        return net_income(player, board);
    }

    let mut candidates = enumerate_moves(player, board, available);
    truncate(&mut candidates, limits.moves_to_try);
    if candidates.is_empty() {
        // A dead branch is a legitimate terminal: the player passes.
        return net_income(player, board);
    }

    let mut best = None;
    for mv in &candidates {
        if budget_spent(limits, nodes) {
            break;
        }
        nodes.fetch_add(1, Ordering::Relaxed);
        let undo = mv.apply(board);
        let net = best_net(player, board, available, depth - 1, limits, nodes);
        undo.revert(board);
        best = Some(best.map_or(net, |b: i32| b.max(net)));
    }
    // Budget exhaustion before the first branch also terminates here.
    best.unwrap_or_else(|| net_income(player, board))
}

fn truncate(candidates: &mut Vec<Move>, moves_to_try: Option<usize>) {
    if let Some(cap) = moves_to_try {
        candidates.truncate(cap);
    }
}

fn budget_spent(limits: SearchLimits, nodes: &AtomicU64) -> bool {
    limits
        .node_budget
        .is_some_and(|budget| nodes.load(Ordering::Relaxed) >= budget)
}
