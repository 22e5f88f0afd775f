//! beamsched - Beam Assignment and Multi-day Schedule optimization
//!
//! A scheduling library for multi-beam observation campaigns: a deterministic
//! sweep-line resolver assigns observations to a small fixed pool of shared
//! beams, and a genetic-algorithm optimizer searches day-granularity offsets
//! for co-scheduled session blocks to minimize the total schedule span.

pub mod algorithms;
pub mod beam;
pub mod scheduling_block;
pub mod time_window;

pub use algorithms::ga::{optimize_schedule, GaConfig, GenerationStats, OffsetVector};
pub use beam::{resolve_conflicts, BEAM_POOL_SIZE};

/// Identifier type used for schedule blocks and scheduling artifacts.
pub type Id = String;

/// Generates a new unique identifier (UUID v4).
pub fn generate_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}
