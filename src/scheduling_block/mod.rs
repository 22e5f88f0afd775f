//! Schedule blocks: one project's observation set as a single schedulable,
//! time-shiftable unit, plus maintenance windows and the precondition gate
//! run before optimization.

mod block;
mod error;
mod maintenance;
mod observation;

pub use block::{ScheduleBlock, ShiftPolicy, SPAN_LAG};
pub use error::ValidationError;
pub use maintenance::{MaintenanceWindow, MAINTENANCE_DURATION};
pub use observation::{ObsMode, Observation};

use crate::time_window::{Interval, SOLAR_DAY};
use qtty::{Quantity, Second};

/// Checks the preconditions that search cannot recover from.
///
/// - every block's beam demand must lie in `1..=pool_size`;
/// - a Fixed-policy block must start inside the search window (the earliest
///   base start across all blocks, plus `search_limit_days` days);
/// - a Fixed-policy block must not overlap any maintenance window, since no
///   offset can move it clear.
///
/// Shiftable blocks are left to the optimizer: their collisions are penalty
/// terms, not faults.
pub fn validate(
    blocks: &[ScheduleBlock],
    maintenance: &[MaintenanceWindow],
    pool_size: usize,
    search_limit_days: u32,
) -> Result<(), ValidationError> {
    if blocks.is_empty() {
        return Err(ValidationError::NoBlocks);
    }

    for block in blocks {
        let demand = block.beam_demand();
        if demand == 0 || demand > pool_size {
            return Err(ValidationError::BeamDemandOutOfRange {
                id: block.id().to_string(),
                demand,
                pool: pool_size,
            });
        }
    }

    let window_start = blocks
        .iter()
        .map(|b| b.base_span().start().value())
        .fold(f64::INFINITY, f64::min);
    let window = Interval::<Second>::new(
        Quantity::new(window_start),
        Quantity::new(window_start + search_limit_days as f64 * SOLAR_DAY.value()),
    );

    for block in blocks {
        if block.policy() != ShiftPolicy::Fixed {
            continue;
        }
        let span = block.base_span();
        if !window.contains(span.start()) {
            return Err(ValidationError::FixedBlockOutsideWindow {
                id: block.id().to_string(),
            });
        }
        for w in maintenance {
            if span.overlaps(&w.span()) {
                return Err(ValidationError::FixedBlockHitsMaintenance {
                    id: block.id().to_string(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(day: i64, policy: ShiftPolicy, demand: usize) -> ScheduleBlock {
        let obs = Observation::from_day_millis(day, 6 * 3_600_000, 3_600_000, ObsMode::Survey);
        ScheduleBlock::with_id(format!("b{}", day), vec![obs], policy, demand).unwrap()
    }

    #[test]
    fn accepts_well_formed_inputs() {
        let blocks = vec![block(0, ShiftPolicy::Solar, 1), block(1, ShiftPolicy::Fixed, 4)];
        assert!(validate(&blocks, &[], 4, 14).is_ok());
    }

    #[test]
    fn rejects_empty_block_list() {
        assert_eq!(validate(&[], &[], 4, 14), Err(ValidationError::NoBlocks));
    }

    #[test]
    fn rejects_demand_above_pool() {
        let blocks = vec![block(0, ShiftPolicy::Solar, 5)];
        assert!(matches!(
            validate(&blocks, &[], 4, 14),
            Err(ValidationError::BeamDemandOutOfRange { demand: 5, .. })
        ));
    }

    #[test]
    fn rejects_zero_demand() {
        let blocks = vec![block(0, ShiftPolicy::Solar, 0)];
        assert!(matches!(
            validate(&blocks, &[], 4, 14),
            Err(ValidationError::BeamDemandOutOfRange { demand: 0, .. })
        ));
    }

    #[test]
    fn rejects_fixed_block_past_search_window() {
        let blocks = vec![block(0, ShiftPolicy::Solar, 1), block(30, ShiftPolicy::Fixed, 1)];
        assert!(matches!(
            validate(&blocks, &[], 4, 14),
            Err(ValidationError::FixedBlockOutsideWindow { .. })
        ));
    }

    #[test]
    fn rejects_fixed_block_under_maintenance() {
        let blocks = vec![block(0, ShiftPolicy::Fixed, 1)];
        // Window covers the block's 06:00 observation on day 0.
        let maint = vec![MaintenanceWindow::new(Quantity::new(4.0 * 3_600.0))];
        assert!(matches!(
            validate(&blocks, &maint, 4, 14),
            Err(ValidationError::FixedBlockHitsMaintenance { .. })
        ));
    }

    #[test]
    fn shiftable_block_under_maintenance_is_allowed() {
        let blocks = vec![block(0, ShiftPolicy::Solar, 1)];
        let maint = vec![MaintenanceWindow::new(Quantity::new(4.0 * 3_600.0))];
        assert!(validate(&blocks, &maint, 4, 14).is_ok());
    }
}
