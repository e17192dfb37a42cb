use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sweeper_core::*;

const TIERS: [(&str, GameConfig); 3] = [
    ("beginner", GameConfig::beginner()),
    ("intermediate", GameConfig::intermediate()),
    ("expert", GameConfig::expert()),
];

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    for (name, config) in TIERS {
        group.bench_with_input(BenchmarkId::new("eager", name), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                Board::new(black_box(config), Placement::Eager, seed)
            })
        });
        group.bench_with_input(
            BenchmarkId::new("deferred_first_reveal", name),
            &config,
            |b, &config| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    let mut board = Board::new(config, Placement::Deferred, seed).ok()?;
                    board.reveal(black_box((config.rows / 2, config.cols / 2))).ok()
                })
            },
        );
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    // a single corner mine makes the whole board one zero region
    let layout = MineLayout::from_mine_coords((30, 30), &[(29, 29)]);
    let Ok(layout) = layout else {
        return;
    };

    c.bench_function("flood_fill_30x30", |b| {
        b.iter_batched(
            || Board::from_mine_layout(&layout),
            |board| board.map(|mut board| board.reveal(black_box((0, 0)))),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_placement, bench_flood_fill);
criterion_main!(benches);
