//! Sweep-line beam assignment.
//!
//! Observations are flattened into start/stop events, swept in time order,
//! and each observation takes the lowest-indexed idle beam when it starts.
//! When every beam is busy the observation is forced onto beam 0 - the
//! designated conflict fallback - without occupying a slot, so later
//! observations are never blocked by it. Capacity overflow is a documented
//! policy outcome here, not a fault: there are no error paths.

use qtty::{Quantity, Second};

use crate::scheduling_block::Observation;

/// Number of shared beams in the default pool.
pub const BEAM_POOL_SIZE: usize = 4;

/// A total-order key for `f64` event times using IEEE-754 total order
/// (`total_cmp`). Event instants come from finite span arithmetic, so NaN
/// never arises, but the key keeps the sort well defined regardless.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TimeKey(f64);

impl Eq for TimeKey {}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Quantity<Second>> for TimeKey {
    fn from(q: Quantity<Second>) -> Self {
        TimeKey(q.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventKind {
    Start,
    Stop,
}

#[derive(Debug, Clone, Copy)]
struct Event {
    time: TimeKey,
    index: usize,
    kind: EventKind,
}

/// Assigns each observation a beam index in `[0, pool_size)`.
///
/// Deterministic for a fixed input list: events are ordered by
/// `(time, observation index)`, so simultaneous events resolve the same way
/// on every run. Every observation receives exactly one assignment; forced
/// conflicts reuse index 0 and their stop events are no-ops because they
/// never seated a slot.
pub fn resolve_conflicts(observations: &[Observation], pool_size: usize) -> Vec<usize> {
    assert!(pool_size > 0, "beam pool must hold at least one beam");

    let mut events = Vec::with_capacity(observations.len() * 2);
    for (index, obs) in observations.iter().enumerate() {
        let span = obs.span();
        events.push(Event {
            time: span.start().into(),
            index,
            kind: EventKind::Start,
        });
        events.push(Event {
            time: span.end().into(),
            index,
            kind: EventKind::Stop,
        });
    }
    events.sort_by(|a, b| a.time.cmp(&b.time).then(a.index.cmp(&b.index)));

    // slot -> index of the observation currently holding it
    let mut active: Vec<Option<usize>> = vec![None; pool_size];
    let mut assignment = vec![0usize; observations.len()];

    for event in events {
        match event.kind {
            EventKind::Start => match active.iter().position(Option::is_none) {
                Some(slot) => {
                    active[slot] = Some(event.index);
                    assignment[event.index] = slot;
                }
                // Pool exhausted: fall back to beam 0 without seating, so
                // this observation does not block later ones.
                None => assignment[event.index] = 0,
            },
            EventKind::Stop => {
                if let Some(slot) = active.iter().position(|s| *s == Some(event.index)) {
                    active[slot] = None;
                }
                // No slot found: the observation was a forced conflict and
                // never occupied one. Expected, not an error.
            }
        }
    }

    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling_block::ObsMode;
    use qtty::Quantity;

    fn obs(start_s: f64, duration_s: f64) -> Observation {
        Observation::new(
            Quantity::new(start_s),
            Quantity::new(duration_s),
            ObsMode::Survey,
        )
    }

    #[test]
    fn disjoint_observations_all_take_beam_zero() {
        let list = vec![obs(0.0, 100.0), obs(200.0, 100.0), obs(400.0, 100.0)];
        assert_eq!(resolve_conflicts(&list, 4), vec![0, 0, 0]);
    }

    #[test]
    fn concurrent_observations_take_ascending_beams() {
        let list = vec![
            obs(0.0, 1000.0),
            obs(10.0, 1000.0),
            obs(20.0, 1000.0),
            obs(30.0, 1000.0),
        ];
        assert_eq!(resolve_conflicts(&list, 4), vec![0, 1, 2, 3]);
    }

    #[test]
    fn freed_beam_is_reused_lowest_first() {
        // First observation ends before the third starts, freeing beam 0.
        let list = vec![obs(0.0, 50.0), obs(10.0, 1000.0), obs(100.0, 100.0)];
        assert_eq!(resolve_conflicts(&list, 4), vec![0, 1, 0]);
    }

    #[test]
    fn exhausted_pool_forces_fallback_to_beam_zero() {
        let list = vec![
            obs(0.0, 1000.0),
            obs(0.0, 1000.0),
            obs(0.0, 1000.0),
            obs(0.0, 1000.0),
            obs(0.0, 1000.0),
        ];
        assert_eq!(resolve_conflicts(&list, 4), vec![0, 1, 2, 3, 0]);
    }

    #[test]
    fn forced_conflict_does_not_block_later_observations() {
        // Fifth observation overflows; sixth starts after a beam frees and
        // must get a real slot.
        let list = vec![
            obs(0.0, 100.0),
            obs(0.0, 1000.0),
            obs(0.0, 1000.0),
            obs(0.0, 1000.0),
            obs(0.0, 1000.0),
            obs(500.0, 100.0),
        ];
        assert_eq!(resolve_conflicts(&list, 4), vec![0, 1, 2, 3, 0, 0]);
    }

    #[test]
    fn single_beam_pool_maps_every_overlap_to_zero() {
        // Pool of one, three fully-overlapping observations: the first takes
        // slot 0 normally, the other two are forced conflicts on beam 0.
        let list = vec![obs(0.0, 1000.0), obs(0.0, 1000.0), obs(0.0, 1000.0)];
        assert_eq!(resolve_conflicts(&list, 1), vec![0, 0, 0]);
    }

    #[test]
    fn assignments_are_deterministic_across_runs() {
        let list: Vec<Observation> = (0..40)
            .map(|i| obs((i * 37 % 11) as f64 * 100.0, 350.0))
            .collect();
        let first = resolve_conflicts(&list, 4);
        for _ in 0..5 {
            assert_eq!(resolve_conflicts(&list, 4), first);
        }
    }

    #[test]
    fn capacity_is_never_exceeded_by_seated_observations() {
        let list: Vec<Observation> = (0..60)
            .map(|i| obs((i % 13) as f64 * 80.0, 500.0))
            .collect();
        let pool = 4;
        let assignment = resolve_conflicts(&list, pool);
        assert_eq!(assignment.len(), list.len());

        // Replay the sweep and count genuinely seated observations at every
        // event instant: at most `pool` may hold slots simultaneously.
        let mut probes: Vec<f64> = list
            .iter()
            .map(|o| o.span().start().value() + 0.5)
            .collect();
        probes.sort_by(f64::total_cmp);
        for &t in &probes {
            let active = seated_at(&list, &assignment, pool, t);
            assert!(active <= pool, "{} seated at t={}", active, t);
        }
    }

    /// Counts observations active at `t` that genuinely hold distinct slots
    /// (forced fallbacks share beam 0 with its legitimate holder and are
    /// excluded by the distinct-slot count).
    fn seated_at(list: &[Observation], assignment: &[usize], pool: usize, t: f64) -> usize {
        let mut held = vec![false; pool];
        let mut count = 0;
        for (obs, &slot) in list.iter().zip(assignment) {
            let span = obs.span();
            if span.start().value() <= t && t < span.end().value() && !held[slot] {
                held[slot] = true;
                count += 1;
            }
        }
        count
    }
}
