use std::time::Duration;

use covergrid::{
    FillPolicy, Grid, GridHeader, GridSize, NumThreads,
    algo::{self, FillOptions},
};
use criterion::{BatchSize, Criterion};

const GRID_SIZE: GridSize = GridSize::with_rows_cols(768, 1024);
const NODATA: i32 = covergrid::DEFAULT_NODATA;

/// Classified grid with a missing band along the edges and scattered small voids
fn create_grid_with_gaps() -> Grid {
    let cols = GRID_SIZE.cols;
    let data = (0..GRID_SIZE.cell_count())
        .map(|index| {
            let (row, col) = (index / cols, index % cols);
            if row < 16 || col < 16 || (row % 97 < 5 && col % 89 < 5) {
                NODATA
            } else {
                (index % 7) as i32 + 1
            }
        })
        .collect();

    Grid::new(GridHeader::with_size(GRID_SIZE, NODATA), data).expect("Invalid benchmark grid")
}

pub fn bench_fill(c: &mut Criterion) {
    let grid = create_grid_with_gaps();

    let mut group = c.benchmark_group("gap_fill");
    group.warm_up_time(Duration::from_secs(1));
    group.sample_size(10);

    for (name, policy) in [
        ("legacy", FillPolicy::LegacyRingOrder),
        ("euclidean", FillPolicy::NearestEuclidean),
        ("breadth_first", FillPolicy::BreadthFirst),
    ] {
        let opts = FillOptions::builder()
            .policy(policy)
            .num_threads(NumThreads::Count(1))
            .build();

        group.bench_function(format!("fill_{name}"), |b| {
            b.iter_batched_ref(|| grid.clone(), |g| algo::fill_with_options(g, &opts), BatchSize::LargeInput);
        });
    }

    group.bench_function("fill_legacy_threaded", |b| {
        let opts = FillOptions::builder().num_threads(NumThreads::AllCpus).build();
        b.iter_batched_ref(|| grid.clone(), |g| algo::fill_with_options(g, &opts), BatchSize::LargeInput);
    });

    group.finish();
}

criterion::criterion_group!(benches, bench_fill);
criterion::criterion_main!(benches);
