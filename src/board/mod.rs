//! Board representation and move model.
//!
//! Contains the core data structures for terrain and building cards, shape
//! masks, the generated layout, the mutable per-player board state, and the
//! validated move transition.

pub mod card;
pub mod layout;
pub mod mask;
pub mod moves;
pub mod state;
pub mod values;

pub use card::{
    BoardCard, BuildingInfo, BuildingKind, CellKind, ALL_BUILDING_KINDS, ALL_CELL_KINDS,
    BUILDING_INFO, BUILDING_KIND_COUNT, CELL_KIND_COUNT, DEFAULT_CELL_CAPACITY,
    PLACEABLE_BUILDING_KINDS,
};
pub use layout::Layout;
pub use mask::{generate_mask, BoardStyle, Cell, Mask, ALL_STYLES, SUPPORTED_SIZES};
pub use moves::{Move, MoveError, Undo};
pub use state::{
    Board, EconomyRules, BUY_PRICE_MAX, BUY_PRICE_MIN, SELL_PRICE_MAX, SELL_PRICE_MIN,
};
pub use values::{InterpTable, Matrix, BUY_MARKET_VALUES, HQ_VALUES, PROCESS_VALUES, SELL_MARKET_VALUES};
