//! Genetic-algorithm schedule optimizer.
//!
//! Searches over day-granularity offset vectors (one offset per schedule
//! block) for an arrangement that respects beam capacity, avoids maintenance
//! blackouts and minimizes total elapsed schedule span.
//!
//! # Pipeline
//!
//! Each generation: parallel fitness evaluation, percentile-threshold elite
//! selection, two-point three-way crossover over elite triples, mutation
//! fill of the remaining slots, and - every `extinction_interval`
//! generations - an extinction event that tightens the search limit and
//! replaces poorly-performing individuals with fresh randoms.
//!
//! # Submodules
//!
//! - [`fitness`]: the candidate scoring function (public so callers can
//!   hand-check a single candidate)
//! - [`GaEngine`]: the generation loop, for callers that need a cancellation
//!   flag; [`optimize_schedule`] is the plain entry point

mod config;
mod engine;
pub mod fitness;
mod operators;
mod population;
mod stats;

pub use config::GaConfig;
pub use engine::GaEngine;
pub use population::OffsetVector;
pub use stats::GenerationStats;

use crate::beam::BEAM_POOL_SIZE;
use crate::scheduling_block::{validate, MaintenanceWindow, ScheduleBlock, ValidationError};

/// Optimizes the block offsets and returns the fittest offset vector with
/// the per-generation statistics.
///
/// # Errors
///
/// Fails only on precondition violations (demand above the pool, immovable
/// blocks outside the search window or under maintenance) - these cannot be
/// recovered by search and must not silently degrade fitness. A run that
/// merely fails to converge is not an error: the returned best individual
/// carries a negative penalized fitness the caller can inspect and reject.
pub fn optimize_schedule(
    blocks: &[ScheduleBlock],
    maintenance: &[MaintenanceWindow],
    cfg: GaConfig,
) -> Result<(OffsetVector, Vec<GenerationStats>), ValidationError> {
    validate(blocks, maintenance, BEAM_POOL_SIZE, cfg.search_limit_days)?;
    Ok(GaEngine::new(blocks, maintenance, cfg).run())
}
