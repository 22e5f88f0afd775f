//! Offset-vector individuals and population seeding.

use rand::Rng;

/// One candidate schedule: a day offset per block, each in
/// `[0, search_limit]`.
pub type OffsetVector = Vec<u32>;

/// Uniform-random individual bounded by `limit`.
pub fn random_vector<R: Rng>(len: usize, limit: u32, rng: &mut R) -> OffsetVector {
    (0..len).map(|_| rng.gen_range(0..=limit)).collect()
}

/// Individual whose offsets are spread evenly across `[0, limit]`.
///
/// Seeding one striped vector alongside the all-zero vector gives the first
/// generation a spread-out candidate without waiting for mutation to build
/// one.
pub fn striped_vector(len: usize, limit: u32) -> OffsetVector {
    if len <= 1 {
        return vec![0; len];
    }
    (0..len)
        .map(|k| ((k as u64 * limit as u64) / (len as u64 - 1)) as u32)
        .collect()
}

/// Seeds the initial population: the all-zero vector, one striped vector,
/// and uniform-random individuals for the remaining slots.
pub fn seed_population<R: Rng>(
    size: usize,
    len: usize,
    limit: u32,
    rng: &mut R,
) -> Vec<OffsetVector> {
    let mut population = Vec::with_capacity(size);
    population.push(vec![0; len]);
    if size > 1 {
        population.push(striped_vector(len, limit));
    }
    while population.len() < size {
        population.push(random_vector(len, limit, rng));
    }
    population.truncate(size);
    population
}

/// Independently replaces each gene with a fresh uniform-random offset in
/// `[0, limit]` with probability `p`.
pub fn mutate<R: Rng>(genes: &mut OffsetVector, p: f64, limit: u32, rng: &mut R) {
    for gene in genes.iter_mut() {
        if rng.gen_bool(p) {
            *gene = rng.gen_range(0..=limit);
        }
    }
}
