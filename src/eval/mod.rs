//! Net-income evaluation.
//!
//! Scores one player's position. Buy markets, process buildings, and sell
//! markets feed three supply-chain sums; production is bottlenecked by the
//! weakest chain, and per-building/per-employee upkeep subtracts from the
//! spread earned on each unit. The function is pure and cheap: the search
//! calls it once per leaf node.

use std::fmt;

use crate::board::{Board, BuildingKind};

/// Itemized result of a net-income evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetBreakdown {
    pub sum_buy: i32,
    pub sum_process: i32,
    pub sum_sell: i32,
    pub total_buildings: i32,
    pub total_employees: i32,
    /// Units produced: the weakest of the three chains.
    pub units: i32,
    pub net: i32,
}

impl fmt::Display for NetBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "buy {} | process {} | sell {} | units {} | buildings {} | employees {} | net {}",
            self.sum_buy,
            self.sum_process,
            self.sum_sell,
            self.units,
            self.total_buildings,
            self.total_employees,
            self.net
        )
    }
}

/// Computes `player`'s net income with the full itemization.
pub fn net_breakdown(player: usize, board: &Board) -> NetBreakdown {
    let mut sum_buy = 0;
    let mut sum_process = 0;
    let mut sum_sell = 0;
    let mut total_buildings = 0;
    let mut total_employees = 0;

    let buy_price = board.buy_price(player);
    let sell_price = board.sell_price(player);

    for index in 0..board.layout().size() {
        let building = board.building(player, index);
        let own_employees = i32::from(board.employees(player, index));
        total_employees += own_employees;
        if building.is_building() {
            total_buildings += 1;
        }

        match building {
            BuildingKind::BuyMarket => {
                // Aggregate buy price over every co-located buy market,
                // this player's included.
                let mut aggregate = 0;
                for p in 0..board.player_count() {
                    if board.building(p, index) == BuildingKind::BuyMarket {
                        aggregate += board.buy_price(p);
                    }
                }
                sum_buy += building.value(buy_price, aggregate) + own_employees;
            }
            BuildingKind::SellMarket => {
                let mut aggregate = 0;
                for p in 0..board.player_count() {
                    if board.building(p, index) == BuildingKind::SellMarket {
                        aggregate += board.sell_price(p);
                    }
                }
                sum_sell += building.value(sell_price, aggregate) + own_employees;
            }
            BuildingKind::Process => {
                // Own markets in the 4-connected neighbourhood; cells off
                // the grid are simply absent.
                let cell = board.layout().location(index);
                let mut buys = 0;
                let mut sells = 0;
                for neighbour in board.layout().neighbours(cell) {
                    match board.building_at(player, neighbour) {
                        Some(BuildingKind::BuyMarket) => buys += 1,
                        Some(BuildingKind::SellMarket) => sells += 1,
                        _ => {}
                    }
                }
                sum_process += building.value(buys, sells) + own_employees;
            }
            BuildingKind::Hq | BuildingKind::None => {}
        }
    }

    let units = sum_buy.min(sum_process).min(sum_sell);
    let economy = board.economy();
    let net = units * (sell_price - buy_price)
        - economy.building_cost * total_buildings
        - economy.employee_cost * total_employees;

    let breakdown = NetBreakdown {
        sum_buy,
        sum_process,
        sum_sell,
        total_buildings,
        total_employees,
        units,
        net,
    };
    log::debug!("player {player} net: {breakdown}");
    breakdown
}

/// Computes `player`'s net income.
pub fn net_income(player: usize, board: &Board) -> i32 {
    net_breakdown(player, board).net
}

impl Board {
    /// Net income for `player`; see [`net_breakdown`] for the itemization.
    pub fn player_net(&self, player: usize) -> i32 {
        net_income(player, self)
    }
}
