use rand::distr::{Distribution, StandardUniform};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG so failing cases can be replayed
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn rand_point<A, const K: usize, R: Rng>(rng: &mut R) -> [A; K]
where
    StandardUniform: Distribution<A>,
{
    std::array::from_fn(|_| rng.random())
}

pub fn rand_points<A, const K: usize, R: Rng>(rng: &mut R, qty: usize) -> Vec<[A; K]>
where
    StandardUniform: Distribution<A>,
{
    (0..qty).map(|_| rand_point(rng)).collect()
}

pub fn rand_vec_points<A, R: Rng>(rng: &mut R, dims: usize, qty: usize) -> Vec<Vec<A>>
where
    StandardUniform: Distribution<A>,
{
    (0..qty)
        .map(|_| (0..dims).map(|_| rng.random()).collect())
        .collect()
}
