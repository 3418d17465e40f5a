use criterion::{criterion_group, criterion_main, Criterion};
use grid_astar::{find_path, reference_scenarios, search, Cell, Grid, VisitLog};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn random_grid(n: usize, density: f64, rng: &mut StdRng) -> Grid {
    let mut grid = Grid::new(n, n);
    for row in 0..n as i32 {
        for col in 0..n as i32 {
            grid.set_blocked(Cell::new(row, col), rng.gen_bool(density));
        }
    }
    grid.update();
    grid
}

fn random_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for (n, density) in [(64, 0.2), (256, 0.2), (256, 0.35)] {
        let grid = random_grid(n, density, &mut rng);
        let scenarios: Vec<(Cell, Cell)> = (0..32)
            .map(|_| {
                let mut cell = || {
                    Cell::new(
                        rng.gen_range(0..n) as i32,
                        rng.gen_range(0..n) as i32,
                    )
                };
                (cell(), cell())
            })
            .collect();
        c.bench_function(format!("random {n}x{n}, density {density}").as_str(), |b| {
            b.iter(|| {
                for (start, goal) in &scenarios {
                    black_box(find_path(&grid, *start, *goal));
                }
            })
        });
    }
}

fn reference_bench(c: &mut Criterion) {
    let scenarios = reference_scenarios();
    c.bench_function("reference scenarios, recorded", |b| {
        b.iter(|| {
            for scenario in &scenarios {
                let mut log = VisitLog::new();
                black_box(search(&scenario.grid, scenario.start, scenario.goal, &mut log));
                black_box(log);
            }
        })
    });
}

criterion_group!(benches, random_bench, reference_bench);
criterion_main!(benches);
