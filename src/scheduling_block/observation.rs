use qtty::{Quantity, Second};

use crate::time_window::{instant_from_day_millis, Interval};

/// Recording mode tag carried through scheduling untouched.
///
/// The scheduler never interprets the mode; it exists so callers can round-trip
/// their session records through the core without a side table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObsMode {
    Survey,
    Followup,
    Calibration,
}

/// One observation: an absolute start instant, a duration and a mode tag.
///
/// Start is the only field the scheduler rewrites; duration and mode are fixed
/// at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    start: Quantity<Second>,
    duration: Quantity<Second>,
    mode: ObsMode,
}

impl Observation {
    pub fn new(start: Quantity<Second>, duration: Quantity<Second>, mode: ObsMode) -> Self {
        Self {
            start,
            duration,
            mode,
        }
    }

    /// Builds an observation from the session-record form: a day count, the
    /// milliseconds elapsed since that day's UTC midnight, and a duration in
    /// milliseconds.
    pub fn from_day_millis(
        day: i64,
        millis_of_day: i64,
        duration_ms: i64,
        mode: ObsMode,
    ) -> Self {
        Self {
            start: instant_from_day_millis(day, millis_of_day),
            duration: Quantity::new(duration_ms as f64 / 1000.0),
            mode,
        }
    }

    pub fn start(&self) -> Quantity<Second> {
        self.start
    }

    pub fn duration(&self) -> Quantity<Second> {
        self.duration
    }

    pub fn mode(&self) -> ObsMode {
        self.mode
    }

    /// The observation's `[start, stop]` span on the time axis.
    pub fn span(&self) -> Interval<Second> {
        Interval::new(self.start, self.start + self.duration)
    }

    /// Returns a copy with the start moved to `start`. Duration and mode are
    /// preserved.
    pub fn with_start(&self, start: Quantity<Second>) -> Self {
        Self { start, ..*self }
    }
}
