//! Terrain and building card kinds.
//!
//! Board cells carry a terrain kind that bounds employee capacity and legal
//! placements; players place building kinds that feed the buy/process/sell
//! production chains. Per-kind metadata is stored in a compile-time lookup
//! table indexed by the enum discriminant.

use serde::Deserialize;

/// The number of terrain kinds.
pub const CELL_KIND_COUNT: usize = 3;

/// The number of building kinds, including the empty placeholder.
pub const BUILDING_KIND_COUNT: usize = 5;

/// Employee capacity of a freshly generated board cell.
pub const DEFAULT_CELL_CAPACITY: u8 = 3;

/// Terrain kind of a board cell.
///
/// The `#[repr(u8)]` attribute enables use as an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum CellKind {
    Farm = 0,
    Residential = 1,
    Industry = 2,
}

/// All terrain kinds in index order.
pub const ALL_CELL_KINDS: [CellKind; CELL_KIND_COUNT] =
    [CellKind::Farm, CellKind::Residential, CellKind::Industry];

impl CellKind {
    /// Returns the lowercase name used in settings and the protocol.
    pub const fn name(self) -> &'static str {
        match self {
            CellKind::Farm => "farm",
            CellKind::Residential => "residential",
            CellKind::Industry => "industry",
        }
    }

    /// Returns the single-character board-rendering abbreviation.
    pub const fn letter(self) -> char {
        match self {
            CellKind::Farm => 'F',
            CellKind::Residential => 'R',
            CellKind::Industry => 'I',
        }
    }

    /// Parses a terrain kind from its lowercase name.
    pub fn from_name(name: &str) -> Option<CellKind> {
        match name {
            "farm" => Some(CellKind::Farm),
            "residential" => Some(CellKind::Residential),
            "industry" => Some(CellKind::Industry),
            _ => None,
        }
    }
}

/// A terrain card occupying one active cell.
///
/// `max_employees` is the staffing capacity shared across all players on the
/// cell: the per-cell sum of every player's employees may never exceed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardCard {
    pub kind: CellKind,
    pub max_employees: u8,
}

impl BoardCard {
    /// Creates a board card with the default staffing capacity.
    pub const fn new(kind: CellKind) -> Self {
        BoardCard { kind, max_employees: DEFAULT_CELL_CAPACITY }
    }
}

/// A building kind placeable by a player, or the empty placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BuildingKind {
    None = 0,
    BuyMarket = 1,
    SellMarket = 2,
    Process = 3,
    Hq = 4,
}

/// All building kinds in index order.
pub const ALL_BUILDING_KINDS: [BuildingKind; BUILDING_KIND_COUNT] = [
    BuildingKind::None,
    BuildingKind::BuyMarket,
    BuildingKind::SellMarket,
    BuildingKind::Process,
    BuildingKind::Hq,
];

/// The kinds a player can actually place (everything but `None`).
pub const PLACEABLE_BUILDING_KINDS: [BuildingKind; 4] = [
    BuildingKind::BuyMarket,
    BuildingKind::SellMarket,
    BuildingKind::Process,
    BuildingKind::Hq,
];

impl BuildingKind {
    /// Returns the lowercase name used in settings and the protocol.
    pub const fn name(self) -> &'static str {
        BUILDING_INFO[self as usize].name
    }

    /// Returns the single-character board-rendering abbreviation.
    pub const fn letter(self) -> char {
        BUILDING_INFO[self as usize].letter
    }

    /// Returns how many distinct players may co-occupy one cell with this kind.
    pub const fn max_players(self) -> u8 {
        BUILDING_INFO[self as usize].max_players
    }

    /// Returns the terrain kinds this building may be placed on by default.
    /// Settings may override the allowance per game.
    pub const fn default_allowed(self) -> &'static [CellKind] {
        BUILDING_INFO[self as usize].allowed
    }

    /// Returns true for any placed building, false for the empty placeholder.
    pub const fn is_building(self) -> bool {
        !matches!(self, BuildingKind::None)
    }

    /// Parses a building kind from its lowercase name.
    pub fn from_name(name: &str) -> Option<BuildingKind> {
        ALL_BUILDING_KINDS.iter().copied().find(|k| k.name() == name)
    }
}

/// Static metadata for a building kind.
pub struct BuildingInfo {
    pub name: &'static str,
    pub letter: char,
    pub max_players: u8,
    pub allowed: &'static [CellKind],
}

/// Compile-time lookup table: index by `BuildingKind as usize`.
///
/// `max_players` for `None` is the player-count ceiling so the placeholder
/// never constrains placement on an empty cell.
pub static BUILDING_INFO: [BuildingInfo; BUILDING_KIND_COUNT] = [
    // 0: None - empty overlay slot
    BuildingInfo { name: "none", letter: '-', max_players: 4, allowed: &[] },
    // 1: BuyMarket - input-side market, farms only
    BuildingInfo { name: "buy_market", letter: 'B', max_players: 2, allowed: &[CellKind::Farm] },
    // 2: SellMarket - output-side market, residential only
    BuildingInfo { name: "sell_market", letter: 'S', max_players: 2, allowed: &[CellKind::Residential] },
    // 3: Process - converts inputs to outputs, industry only
    BuildingInfo { name: "process", letter: 'P', max_players: 1, allowed: &[CellKind::Industry] },
    // 4: Hq - headquarters, any terrain
    BuildingInfo {
        name: "hq",
        letter: 'H',
        max_players: 1,
        allowed: &[CellKind::Farm, CellKind::Residential, CellKind::Industry],
    },
];
