//! Genetic operators: three-way crossover over elite triples.

use rand::Rng;

use super::population::OffsetVector;

/// Per-gene mutation probability applied to crossover children.
pub const CHILD_MUTATION_RATE: f64 = 0.10;

/// Per-gene mutation probability for remainder-fill individuals. Higher than
/// the child rate to inject diversity outside the elite lineage.
pub const FILL_MUTATION_RATE: f64 = 0.20;

/// Two-point, three-way crossover.
///
/// One elite triple yields three children: `A = p1[..cp1] + p2[cp1..cp2] +
/// p1[cp2..]`, `B = p2[..cp1] + p3[cp1..cp2] + p2[cp2..]`, and `C` built like
/// `A` from the reversed parent order with fresh cut points. Cut points keep
/// the head and tail genes out of the swapped segment so every child mixes
/// material from both contributing parents.
///
/// Vectors too short to cut (< 4 genes) are returned as parent clones; the
/// caller's mutation pass still diversifies them.
pub fn three_way_crossover<R: Rng>(
    p1: &OffsetVector,
    p2: &OffsetVector,
    p3: &OffsetVector,
    rng: &mut R,
) -> [OffsetVector; 3] {
    let len = p1.len();
    if len < 4 {
        return [p1.clone(), p2.clone(), p3.clone()];
    }

    let (cp1, cp2) = cut_points(len, rng);
    let a = splice(p1, p2, cp1, cp2);
    let b = splice(p2, p3, cp1, cp2);

    let (cp1, cp2) = cut_points(len, rng);
    let c = splice(p3, p2, cp1, cp2);

    [a, b, c]
}

fn cut_points<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    let cp1 = rng.gen_range(1..len - 2);
    let cp2 = rng.gen_range(cp1 + 1..len - 1);
    (cp1, cp2)
}

fn splice(keep: &OffsetVector, insert: &OffsetVector, cp1: usize, cp2: usize) -> OffsetVector {
    let mut child = keep.clone();
    child[cp1..cp2].copy_from_slice(&insert[cp1..cp2]);
    child
}
