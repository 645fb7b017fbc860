//! Board layout construction.
//!
//! A layout is the immutable geometry of one game: the shape mask, the
//! terrain card on every active cell, and the maps between grid locations
//! and dense active-cell indices. Terrain cards are generated from the
//! settings tables for the player count (industry, then farm, then
//! residential), optionally shuffled, and assigned to active cells in
//! row-major traversal order.

use rand::seq::SliceRandom;
use rand::Rng;

use super::card::{BoardCard, CellKind};
use super::mask::{generate_mask, BoardStyle, Cell, Mask};
use crate::config::{ConfigError, Settings};

/// The immutable board geometry for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    size: usize,
    style: BoardStyle,
    mask: Mask,
    /// Terrain card per active cell, indexed by active-cell index.
    cards: Vec<BoardCard>,
    /// Row-major grid location to active-cell index.
    cell_index: Vec<Option<usize>>,
    /// Active-cell index to grid location.
    locations: Vec<Cell>,
}

impl Layout {
    /// Generates a layout for `players` under `settings`.
    ///
    /// Fails with a configuration error if the player count, board size, or
    /// style is unsupported, or if the settings card counts do not add up to
    /// the board size. Card-count mismatches are a settings-authoring bug
    /// and abort setup.
    pub fn generate(
        settings: &Settings,
        players: usize,
        shuffle: bool,
        style: BoardStyle,
        rng: &mut impl Rng,
    ) -> Result<Layout, ConfigError> {
        let size = settings.board_size(players)?;

        let mut cards = Vec::with_capacity(size);
        for kind in [CellKind::Industry, CellKind::Farm, CellKind::Residential] {
            let count = settings.card_count(kind, players)?;
            cards.extend(std::iter::repeat(BoardCard::new(kind)).take(count));
        }
        if cards.len() != size {
            return Err(ConfigError::CardCountMismatch { size, cards: cards.len() });
        }
        if shuffle {
            cards.shuffle(rng);
        }

        let mask = generate_mask(size, style)?;

        let mut cell_index = vec![None; mask.rows() * mask.cols()];
        let mut locations = Vec::with_capacity(size);
        for cell in mask.active_cells() {
            cell_index[cell.row * mask.cols() + cell.col] = Some(locations.len());
            locations.push(cell);
        }

        Ok(Layout { size, style, mask, cards, cell_index, locations })
    }

    /// Returns the number of active cells.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the layout style.
    pub fn style(&self) -> BoardStyle {
        self.style
    }

    /// Returns the number of grid rows.
    pub fn rows(&self) -> usize {
        self.mask.rows()
    }

    /// Returns the number of grid columns.
    pub fn cols(&self) -> usize {
        self.mask.cols()
    }

    /// Returns true if the cell is part of the play area.
    pub fn is_active(&self, cell: Cell) -> bool {
        self.mask.is_active(cell)
    }

    /// Returns the dense active-cell index for a location, or `None` for
    /// inactive or out-of-bounds cells.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if cell.row >= self.mask.rows() || cell.col >= self.mask.cols() {
            return None;
        }
        self.cell_index[cell.row * self.mask.cols() + cell.col]
    }

    /// Returns the grid location of an active-cell index.
    pub fn location(&self, index: usize) -> Cell {
        self.locations[index]
    }

    /// Returns the terrain card at an active-cell index.
    pub fn card(&self, index: usize) -> BoardCard {
        self.cards[index]
    }

    /// Returns the terrain card at a grid location, if the cell is active.
    pub fn card_at(&self, cell: Cell) -> Option<BoardCard> {
        self.index_of(cell).map(|i| self.cards[i])
    }

    /// Iterates the active cells in row-major order.
    pub fn active_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.locations.iter().copied()
    }

    /// Returns the in-bounds 4-connected neighbours of a cell (up, right,
    /// down, left). Neighbours outside the grid are absent; no wraparound.
    pub fn neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let Cell { row, col } = cell;
        let up = row.checked_sub(1).map(|r| Cell::new(r, col));
        let right = (col + 1 < self.cols()).then(|| Cell::new(row, col + 1));
        let down = (row + 1 < self.rows()).then(|| Cell::new(row + 1, col));
        let left = col.checked_sub(1).map(|c| Cell::new(row, c));
        [up, right, down, left].into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn layout(players: usize, shuffle: bool) -> Layout {
        Layout::generate(
            &Settings::default(),
            players,
            shuffle,
            BoardStyle::Rectangle,
            &mut seeded_rng(),
        )
        .unwrap()
    }

    #[test]
    fn unshuffled_cards_follow_generation_order() {
        let layout = layout(1, false);
        let kinds: Vec<CellKind> = (0..layout.size()).map(|i| layout.card(i).kind).collect();
        // 4 industry, 4 farm, 4 residential for one player.
        assert!(kinds[..4].iter().all(|k| *k == CellKind::Industry));
        assert!(kinds[4..8].iter().all(|k| *k == CellKind::Farm));
        assert!(kinds[8..].iter().all(|k| *k == CellKind::Residential));
    }

    #[test]
    fn shuffle_permutes_but_preserves_counts() {
        let layout = layout(2, true);
        let count = |kind| (0..layout.size()).filter(|&i| layout.card(i).kind == kind).count();
        assert_eq!(count(CellKind::Industry), 6);
        assert_eq!(count(CellKind::Farm), 5);
        assert_eq!(count(CellKind::Residential), 5);
    }

    #[test]
    fn shuffle_is_reproducible_under_a_seed() {
        let settings = Settings::default();
        let a = Layout::generate(&settings, 3, true, BoardStyle::Diamond, &mut seeded_rng()).unwrap();
        let b = Layout::generate(&settings, 3, true, BoardStyle::Diamond, &mut seeded_rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn card_count_mismatch_is_fatal() {
        let mut settings = Settings::default();
        settings.industry_cards = [5, 6, 8, 10]; // one card too many for 1 player
        let err = Layout::generate(&settings, 1, false, BoardStyle::Rectangle, &mut seeded_rng())
            .unwrap_err();
        assert_eq!(err, ConfigError::CardCountMismatch { size: 12, cards: 13 });
    }

    #[test]
    fn index_maps_are_inverse() {
        let layout = Layout::generate(
            &Settings::default(),
            2,
            false,
            BoardStyle::Diamond,
            &mut seeded_rng(),
        )
        .unwrap();
        for i in 0..layout.size() {
            assert_eq!(layout.index_of(layout.location(i)), Some(i));
        }
        // Diamond corner is inactive and unindexed.
        assert_eq!(layout.index_of(Cell::new(0, 0)), None);
    }

    #[test]
    fn neighbours_respect_grid_bounds() {
        let layout = layout(1, false); // 4x3 rectangle
        let corner: Vec<Cell> = layout.neighbours(Cell::new(0, 0)).collect();
        assert_eq!(corner, vec![Cell::new(0, 1), Cell::new(1, 0)]);
        let middle: Vec<Cell> = layout.neighbours(Cell::new(1, 1)).collect();
        assert_eq!(middle.len(), 4);
    }

    #[test]
    fn unsupported_player_count_propagates() {
        let err = Layout::generate(
            &Settings::default(),
            9,
            false,
            BoardStyle::Rectangle,
            &mut seeded_rng(),
        )
        .unwrap_err();
        assert_eq!(err, ConfigError::UnsupportedPlayerCount(9));
    }
}
