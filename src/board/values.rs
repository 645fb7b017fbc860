//! Building value tables.
//!
//! Each building kind prices its per-turn contribution through a fixed
//! two-axis table: markets key on (own price, aggregate price on the cell),
//! process buildings on (connected buy markets, connected sell markets).
//! Tables are rectangular arrays addressed by offset-computed indices, so
//! every lookup lands on a value: out-of-range inputs clamp per axis to the
//! nearest in-range index. Generic cards without an authored matrix (hq)
//! fall back to a nested linear interpolation.

use super::card::BuildingKind;

/// A fixed rectangular value matrix.
///
/// `rows` is indexed by `x - x_min`, each row by `y - y_min`. All rows must
/// have equal length.
pub struct Matrix {
    pub x_min: i32,
    pub y_min: i32,
    pub rows: &'static [&'static [i32]],
}

impl Matrix {
    /// Looks up the value at `(x, y)`, clamping each axis independently
    /// into the declared range.
    pub fn get(&self, x: i32, y: i32) -> i32 {
        let xi = (x - self.x_min).clamp(0, self.rows.len() as i32 - 1) as usize;
        let row = self.rows[xi];
        let yi = (y - self.y_min).clamp(0, row.len() as i32 - 1) as usize;
        row[yi]
    }

    /// Returns the largest declared x key.
    pub fn x_max(&self) -> i32 {
        self.x_min + self.rows.len() as i32 - 1
    }

    /// Returns the largest declared y key.
    pub fn y_max(&self) -> i32 {
        self.y_min + self.rows[0].len() as i32 - 1
    }
}

/// Buy-market payoff: own buy price (1-4) against the aggregate buy price
/// of every co-located buy market (1-8). Paying over the going rate secures
/// more input.
pub static BUY_MARKET_VALUES: Matrix = Matrix {
    x_min: 1,
    y_min: 1,
    rows: &[
        &[5, 4, 3, 2, 1, 1, 1, 1], // own price 1
        &[6, 6, 5, 4, 3, 2, 2, 2], // own price 2
        &[7, 7, 7, 6, 5, 4, 3, 3], // own price 3
        &[8, 8, 8, 8, 7, 6, 5, 4], // own price 4
    ],
};

/// Sell-market payoff: own sell price (2-5) against the aggregate sell price
/// of every co-located sell market (2-10). Undercutting a crowded market
/// moves more product.
pub static SELL_MARKET_VALUES: Matrix = Matrix {
    x_min: 2,
    y_min: 2,
    rows: &[
        &[6, 5, 4, 5, 6, 7, 8, 9, 10], // own price 2
        &[4, 4, 2, 3, 4, 5, 6, 7, 8],  // own price 3
        &[2, 2, 2, 1, 2, 3, 4, 5, 6],  // own price 4
        &[1, 1, 1, 1, 1, 1, 2, 3, 4],  // own price 5
    ],
};

/// Process payoff: own buy markets (0-2) against own sell markets (0-2) in
/// the 4-connected neighbourhood.
pub static PROCESS_VALUES: Matrix = Matrix {
    x_min: 0,
    y_min: 0,
    rows: &[
        &[0, 2, 4], // 0 connected buy markets
        &[2, 4, 6], // 1 connected buy market
        &[4, 6, 8], // 2 connected buy markets
    ],
};

/// An interpolated value table for generic economic cards.
///
/// Row bounds are lerped along y between the x-domain minimum and `mid`
/// (and `mid` and the x-domain maximum), then the value is lerped along x
/// between those bounds and truncated to an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpTable {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
    pub mid: i32,
}

impl InterpTable {
    /// Looks up the interpolated value at `(x, y)`, clamping each axis into
    /// the declared domain first.
    pub fn get(&self, x: i32, y: i32) -> i32 {
        let x = x.clamp(self.x_min, self.x_max);
        let y = y.clamp(self.y_min, self.y_max);
        let x_ratio = f64::from(x - 1) / f64::from(self.x_max - 1);
        let y_ratio = f64::from(y - 1) / f64::from(self.y_max - 1);
        let row_min = lerp(f64::from(self.x_min), f64::from(self.mid), y_ratio);
        let row_max = lerp(f64::from(self.mid), f64::from(self.x_max), y_ratio);
        lerp(row_min, row_max, x_ratio) as i32
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a) * t + a
}

/// Headquarters table: no authored matrix, interpolated over a 1-5 domain
/// with a midpoint of 2.
pub static HQ_VALUES: InterpTable =
    InterpTable { x_min: 1, x_max: 5, y_min: 1, y_max: 5, mid: 2 };

impl BuildingKind {
    /// Returns this kind's table value at `(x, y)`.
    ///
    /// The axes depend on the kind (see the table docs above). `None` has no
    /// economic output and always yields 0.
    pub fn value(self, x: i32, y: i32) -> i32 {
        match self {
            BuildingKind::None => 0,
            BuildingKind::BuyMarket => BUY_MARKET_VALUES.get(x, y),
            BuildingKind::SellMarket => SELL_MARKET_VALUES.get(x, y),
            BuildingKind::Process => PROCESS_VALUES.get(x, y),
            BuildingKind::Hq => HQ_VALUES.get(x, y),
        }
    }

    /// Returns the declared `((x_min, x_max), (y_min, y_max))` domain of
    /// this kind's table, or `None` for the empty placeholder.
    pub fn table_domain(self) -> Option<((i32, i32), (i32, i32))> {
        match self {
            BuildingKind::None => None,
            BuildingKind::BuyMarket => Some((
                (BUY_MARKET_VALUES.x_min, BUY_MARKET_VALUES.x_max()),
                (BUY_MARKET_VALUES.y_min, BUY_MARKET_VALUES.y_max()),
            )),
            BuildingKind::SellMarket => Some((
                (SELL_MARKET_VALUES.x_min, SELL_MARKET_VALUES.x_max()),
                (SELL_MARKET_VALUES.y_min, SELL_MARKET_VALUES.y_max()),
            )),
            BuildingKind::Process => Some((
                (PROCESS_VALUES.x_min, PROCESS_VALUES.x_max()),
                (PROCESS_VALUES.y_min, PROCESS_VALUES.y_max()),
            )),
            BuildingKind::Hq => Some((
                (HQ_VALUES.x_min, HQ_VALUES.x_max),
                (HQ_VALUES.y_min, HQ_VALUES.y_max),
            )),
        }
    }
}
