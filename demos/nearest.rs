/// kdtrees example: build, mutate and query a tree of random points
///
/// Run with `RUST_LOG`-style verbosity fixed at DEBUG so subtree rebuilds
/// triggered by inserts and deletes show up in the output.
use std::error::Error;
use std::time::Instant;

use kdtrees::test_utils::{rand_points, seeded_rng};
use kdtrees::KdTree;

use tracing::Level;
use tracing_subscriber::fmt;

const NUM_POINTS: usize = 10_000;

fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = fmt().with_max_level(Level::DEBUG).without_time().finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut rng = seeded_rng(1);
    let points: Vec<[f64; 3]> = rand_points(&mut rng, NUM_POINTS);

    let start = Instant::now();
    let mut tree = KdTree::build(points.clone())?;
    println!(
        "Built k-d tree with {} points, height {}. Took {:?}",
        tree.len(),
        tree.height(),
        start.elapsed()
    );

    for point in rand_points::<f64, 3, _>(&mut rng, 100) {
        tree.insert(point)?;
    }
    for point in points.iter().take(100) {
        tree.delete(point)?;
    }
    println!(
        "After 100 inserts and 100 deletes: {} points, height {}, consistent: {}",
        tree.len(),
        tree.height(),
        tree.is_consistent()
    );

    let query = [0.123f64, 0.456f64, 0.789f64];

    let nearest = tree.k_nearest(&query, 5)?;
    println!("Nearest 5 to {query:?}:");
    for neighbour in nearest.iter() {
        println!("  {:?} at {:.4}", neighbour.point, neighbour.distance);
    }

    let within = tree.radius_search(&query, 0.05)?;
    println!("{} points within 0.05 of {query:?}", within.len());

    Ok(())
}
