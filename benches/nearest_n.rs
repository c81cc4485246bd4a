use std::hint::black_box;

use criterion::{
    criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion, PlotConfiguration,
};

use kdtrees::test_utils::{rand_points, seeded_rng};
use kdtrees::KdTree;

const K: usize = 3;
const QUERY: usize = 1_000;

fn nearest_n(c: &mut Criterion) {
    let mut group = c.benchmark_group("Query Nearest n");

    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    group.plot_config(plot_config);

    let mut rng = seeded_rng(3);

    for &size in [100, 1_000, 10_000].iter() {
        let tree = KdTree::build(rand_points::<f64, K, _>(&mut rng, size)).unwrap();
        let queries: Vec<[f64; K]> = rand_points(&mut rng, QUERY);

        for qty in [1, 10] {
            group.bench_with_input(
                BenchmarkId::new(format!("3D f64, k = {qty}"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        for query in queries.iter() {
                            black_box(tree.k_nearest(query, qty).unwrap());
                        }
                    })
                },
            );
        }

        group.bench_with_input(BenchmarkId::new("3D f64, radius 0.1", size), &size, |b, _| {
            b.iter(|| {
                for query in queries.iter() {
                    black_box(tree.radius_search(query, 0.1).unwrap());
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, nearest_n);
criterion_main!(benches);
