use thiserror::Error;

use crate::Id;

/// Precondition violations surfaced before the optimizer loop starts.
///
/// These are not recoverable by search: a block that can never be placed must
/// be rejected at the call boundary instead of silently degrading fitness.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Schedule block must contain at least one observation")]
    EmptyBlock,

    #[error("No schedule blocks supplied")]
    NoBlocks,

    #[error("Block {id}: beam demand {demand} outside pool range 1..={pool}")]
    BeamDemandOutOfRange { id: Id, demand: usize, pool: usize },

    #[error("Block {id}: fixed-policy span falls outside the search window")]
    FixedBlockOutsideWindow { id: Id },

    #[error("Block {id}: fixed-policy span overlaps a maintenance window")]
    FixedBlockHitsMaintenance { id: Id },
}
