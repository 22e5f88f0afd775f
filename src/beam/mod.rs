//! Beam assignment: a deterministic sweep-line resolver mapping observations
//! onto a small fixed pool of shared beams.

mod resolver;

pub use resolver::{resolve_conflicts, BEAM_POOL_SIZE};
