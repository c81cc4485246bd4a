use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use kdtrees::test_utils::{rand_points, seeded_rng};
use kdtrees::KdTree;

const K: usize = 3;

fn build(c: &mut Criterion) {
    let mut group = c.benchmark_group("Build");
    let mut rng = seeded_rng(42);

    for ndata in [3, 4, 5].map(|p| 10_usize.pow(p)) {
        let data: Vec<[f64; K]> = rand_points(&mut rng, ndata);

        group.throughput(Throughput::Elements(ndata as u64));
        group.bench_with_input(BenchmarkId::new("3D f64", ndata), &data, |b, data| {
            b.iter(|| black_box(KdTree::build(data.clone())))
        });
    }

    group.finish();
}

criterion_group!(benches, build);
criterion_main!(benches);
