use qtty::{Quantity, Second};

use super::error::ValidationError;
use super::observation::Observation;
use crate::time_window::{roll_to_day, utc_day, Interval, SIDEREAL_DAY, SOLAR_DAY};
use crate::Id;

/// Padding added on both sides of a block's observation span, covering setup
/// and teardown of the receiver chain.
pub const SPAN_LAG: Quantity<Second> = Quantity::new(60.0);

/// How a block may be moved by the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShiftPolicy {
    /// Immovable; day offsets are ignored.
    Fixed,
    /// Shiftable by whole 24h calendar days.
    Solar,
    /// Shiftable by whole days while preserving local sidereal time.
    Sidereal,
}

impl ShiftPolicy {
    /// The time delta this policy applies for a shift of `offset` days.
    pub fn day_shift(&self, offset: u32) -> Quantity<Second> {
        match self {
            ShiftPolicy::Fixed => Quantity::new(0.0),
            ShiftPolicy::Solar => Quantity::new(offset as f64 * SOLAR_DAY.value()),
            ShiftPolicy::Sidereal => Quantity::new(offset as f64 * SIDEREAL_DAY.value()),
        }
    }
}

/// One project's observation set treated as a single schedulable unit.
///
/// All observations of a block move together: the optimizer only ever shifts
/// the whole block by an integer number of days according to its policy. The
/// block span is the envelope of its observations padded by [`SPAN_LAG`] on
/// both sides, and `beam_demand` beams are held for that full span.
#[derive(Debug, Clone)]
pub struct ScheduleBlock {
    id: Id,
    observations: Vec<Observation>,
    policy: ShiftPolicy,
    beam_demand: usize,
    base_span: Interval<Second>,
}

impl ScheduleBlock {
    /// Builds a block from one session's observations.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyBlock`] if `observations` is empty.
    pub fn new(
        observations: Vec<Observation>,
        policy: ShiftPolicy,
        beam_demand: usize,
    ) -> Result<Self, ValidationError> {
        Self::with_id(crate::generate_id(), observations, policy, beam_demand)
    }

    /// Like [`new`](Self::new) but with a caller-supplied identifier
    /// (typically the project or session name).
    pub fn with_id(
        id: Id,
        observations: Vec<Observation>,
        policy: ShiftPolicy,
        beam_demand: usize,
    ) -> Result<Self, ValidationError> {
        if observations.is_empty() {
            return Err(ValidationError::EmptyBlock);
        }

        let mut earliest = observations[0].span().start();
        let mut latest = observations[0].span().end();
        for obs in &observations[1..] {
            let span = obs.span();
            if span.start().value() < earliest.value() {
                earliest = span.start();
            }
            if span.end().value() > latest.value() {
                latest = span.end();
            }
        }

        Ok(Self {
            id,
            observations,
            policy,
            beam_demand,
            base_span: Interval::new(earliest - SPAN_LAG, latest + SPAN_LAG),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn policy(&self) -> ShiftPolicy {
        self.policy
    }

    pub fn beam_demand(&self) -> usize {
        self.beam_demand
    }

    /// The block's unshifted `[start, stop]` envelope (lag included).
    pub fn base_span(&self) -> Interval<Second> {
        self.base_span
    }

    /// The block's envelope when shifted by `offset` days under its policy.
    pub fn effective_span(&self, offset: u32) -> Interval<Second> {
        self.base_span.shifted(self.policy.day_shift(offset))
    }

    /// Materializes a winning offset back into per-observation start times.
    ///
    /// Solar blocks move by a plain multiple of 24h. Sidereal blocks roll
    /// each observation onto the target calendar day at the same local
    /// sidereal time. Fixed blocks are returned unchanged.
    pub fn shifted_observations(&self, offset: u32) -> Vec<Observation> {
        if offset == 0 || self.policy == ShiftPolicy::Fixed {
            return self.observations.clone();
        }
        match self.policy {
            ShiftPolicy::Solar => {
                let delta = self.policy.day_shift(offset);
                self.observations
                    .iter()
                    .map(|obs| obs.with_start(obs.start() + delta))
                    .collect()
            }
            ShiftPolicy::Sidereal => self
                .observations
                .iter()
                .map(|obs| {
                    let target = utc_day(obs.start()) + offset as i64;
                    obs.with_start(roll_to_day(obs.start(), target))
                })
                .collect(),
            ShiftPolicy::Fixed => unreachable!(),
        }
    }
}
