//! Candidate scoring.
//!
//! Fitness is a single scalar, zero or negative, where less negative is
//! better. Conflict-free candidates score the negated total schedule span in
//! days; any capacity or maintenance violation drops the candidate onto the
//! penalty branch, offset by the current search limit so penalized scores
//! always rank below every achievable duration while staying comparable to
//! each other.
//!
//! The pairwise capacity check is deliberately greedy and asymmetric: each
//! block spends its remaining free beams on later overlapping blocks in
//! declaration order, so which overlap draws the penalty depends on that
//! order. This is a heuristic approximation carried over intact for
//! output compatibility, not an exact concurrent-demand count.

use qtty::Day;

use crate::scheduling_block::{MaintenanceWindow, ScheduleBlock};
use crate::time_window::Interval;

/// Penalty and capacity cost of one maintenance collision: the whole pool.
const MAINTENANCE_COST: i64 = 4;

/// Scores one offset vector against the block set.
///
/// Pure and deterministic: identical inputs give bit-identical scores. The
/// caller guarantees `offsets.len() == blocks.len()` and a non-empty block
/// list (enforced by [`validate`](crate::scheduling_block::validate) at the
/// optimizer boundary).
pub fn evaluate(
    offsets: &[u32],
    blocks: &[ScheduleBlock],
    maintenance: &[MaintenanceWindow],
    pool_size: usize,
    search_limit: u32,
) -> f64 {
    debug_assert_eq!(offsets.len(), blocks.len());
    if blocks.is_empty() {
        return 0.0;
    }

    let spans: Vec<Interval<qtty::Second>> = blocks
        .iter()
        .zip(offsets)
        .map(|(block, &offset)| block.effective_span(offset))
        .collect();

    let mut global_start = spans[0].start();
    let mut global_stop = spans[0].end();
    let mut penalty: i64 = 0;

    for (i, span) in spans.iter().enumerate() {
        let mut beams_free = pool_size as i64 - blocks[i].beam_demand() as i64;

        // A colliding maintenance window blacks out the full pool for this
        // block's span.
        for window in maintenance {
            if span.overlaps(&window.span()) {
                penalty -= MAINTENANCE_COST;
                beams_free -= MAINTENANCE_COST;
            }
        }

        if span.start().value() < global_start.value() {
            global_start = span.start();
        }
        if span.end().value() > global_stop.value() {
            global_stop = span.end();
        }

        for j in (i + 1)..spans.len() {
            if span.overlaps(&spans[j]) {
                let overage = blocks[j].beam_demand() as i64 - beams_free;
                if overage > 0 {
                    penalty -= overage;
                } else {
                    // Overlap fits: it consumes remaining capacity instead.
                    beams_free -= blocks[j].beam_demand() as i64;
                }
            }
        }
    }

    if penalty < 0 {
        (penalty - search_limit as i64) as f64
    } else {
        let run_duration = Interval::new(global_start, global_stop).to::<Day>();
        -run_duration.duration().value()
    }
}
