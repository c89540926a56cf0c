use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rand::rngs::SmallRng;
use rand::SeedableRng;

use hegemon::board::{random_board, Area, Board, Player};
use hegemon::eval::{dice_advantage, territory_strength};
use hegemon::movegen::{favorable_attack, non_oscillating_transfer, MovePair};
use hegemon::search::MaxN;

type BenchEngine = MaxN<
    fn(&Board, Player) -> f32,
    fn(&Board, Player, &Area, &Area) -> bool,
    fn(&Board, MovePair, &[MovePair]) -> bool,
>;

fn bench_board() -> Board {
    let mut rng = SmallRng::seed_from_u64(1234);
    random_board(24, &[0, 1, 2, 3], &mut rng)
}

fn engine() -> BenchEngine {
    MaxN::new(
        0,
        vec![0, 1, 2, 3],
        1,
        territory_strength,
        favorable_attack,
        non_oscillating_transfer,
    )
}

fn bench_evaluate(c: &mut Criterion) {
    let board = bench_board();
    c.bench_function("territory_strength_single_player", |b| {
        b.iter(|| territory_strength(black_box(&board), black_box(0)))
    });
    c.bench_function("dice_advantage_single_player", |b| {
        b.iter(|| dice_advantage(black_box(&board), black_box(0)))
    });
}

fn bench_regions(c: &mut Criterion) {
    let board = bench_board();
    c.bench_function("player_regions", |b| {
        b.iter(|| black_box(&board).player_regions(black_box(0)))
    });
}

fn bench_simulate_depth_1(c: &mut Criterion) {
    let mut board = bench_board();
    let mut search = engine();
    c.bench_function("simulate_depth_1", |b| {
        b.iter(|| search.simulate(black_box(&mut board), 1))
    });
}

fn bench_simulate_depth_2(c: &mut Criterion) {
    let mut board = bench_board();
    let mut search = engine();
    c.bench_function("simulate_depth_2", |b| {
        b.iter(|| search.simulate(black_box(&mut board), 2))
    });
}

criterion_group!(
    benches,
    bench_evaluate,
    bench_regions,
    bench_simulate_depth_1,
    bench_simulate_depth_2
);
criterion_main!(benches);
