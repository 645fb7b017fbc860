use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cartel::board::{Board, BoardStyle, BuildingKind, Cell, Move, PLACEABLE_BUILDING_KINDS};
use cartel::config::Settings;
use cartel::eval::net_income;
use cartel::movegen::enumerate_moves;
use cartel::search::{find_best_move, SearchLimits};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A mid-game single-player board with a working production chain.
fn midgame_board() -> Board {
    let mut settings = Settings::default();
    settings.buy_market_allowed_on =
        vec![cartel::board::CellKind::Farm, cartel::board::CellKind::Industry];
    settings.sell_market_allowed_on =
        vec![cartel::board::CellKind::Residential, cartel::board::CellKind::Industry];
    let mut board = Board::new(
        &settings,
        1,
        false,
        BoardStyle::Rectangle,
        &mut StdRng::seed_from_u64(17),
    )
    .unwrap();
    Move::place(0, BuildingKind::BuyMarket, Cell::new(0, 0)).apply(&mut board);
    Move::place(0, BuildingKind::Process, Cell::new(0, 1)).apply(&mut board);
    Move::place(0, BuildingKind::SellMarket, Cell::new(0, 2)).apply(&mut board);
    Move::staff(0, Cell::new(0, 1), 1).apply(&mut board);
    board
}

fn bench_net_income(c: &mut Criterion) {
    let board = midgame_board();
    c.bench_function("net_income_midgame", |b| {
        b.iter(|| net_income(black_box(0), black_box(&board)))
    });
}

fn bench_enumerate_moves(c: &mut Criterion) {
    let board = midgame_board();
    c.bench_function("enumerate_moves_midgame", |b| {
        b.iter(|| enumerate_moves(black_box(0), black_box(&board), &PLACEABLE_BUILDING_KINDS))
    });
}

fn bench_apply_undo(c: &mut Criterion) {
    let mut board = midgame_board();
    let mv = Move::adjust_sell_price(0, 1);
    c.bench_function("apply_undo_price_move", |b| {
        b.iter(|| {
            let undo = mv.apply(&mut board);
            undo.revert(&mut board);
        })
    });
}

fn bench_search_depth_2(c: &mut Criterion) {
    let board = midgame_board();
    let limits = SearchLimits { max_depth: 2, moves_to_try: Some(10), node_budget: None };
    c.bench_function("search_depth_2_breadth_10", |b| {
        b.iter(|| find_best_move(black_box(0), black_box(&board), &PLACEABLE_BUILDING_KINDS, limits))
    });
}

criterion_group!(
    benches,
    bench_net_income,
    bench_enumerate_moves,
    bench_apply_undo,
    bench_search_depth_2
);
criterion_main!(benches);
