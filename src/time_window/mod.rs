//! Time-window arithmetic: day-length constants, observation instants and
//! the sidereal day-rolling shift.
//!
//! All scheduling math operates on a seconds axis (UTC seconds since the
//! Unix epoch, as `Quantity<Second>`). A UTC calendar day is the floor of
//! epoch-seconds over the solar day length; sidereal shifts preserve the
//! local sidereal phase of an instant while moving it to a different
//! calendar day.

mod interval;

pub use interval::Interval;

use qtty::{Quantity, Second};

/// Mean solar day: 24h.
pub const SOLAR_DAY: Quantity<Second> = Quantity::new(86_400.0);

/// Mean sidereal day: 23h 56m 4.091s.
pub const SIDEREAL_DAY: Quantity<Second> = Quantity::new(86_164.091);

/// Daily regression of sidereal time against solar time (~3m 56s).
pub const SIDEREAL_REGRESSION: Quantity<Second> =
    Quantity::new(SOLAR_DAY.value() - SIDEREAL_DAY.value());

/// Converts a (day-count, milliseconds-of-day) pair into an absolute instant.
pub fn instant_from_day_millis(day: i64, millis_of_day: i64) -> Quantity<Second> {
    Quantity::new(day as f64 * SOLAR_DAY.value() + millis_of_day as f64 / 1000.0)
}

/// UTC calendar day number of an instant.
pub fn utc_day(t: Quantity<Second>) -> i64 {
    (t.value() / SOLAR_DAY.value()).floor() as i64
}

/// Moves `start` to the UTC day `target_day` while preserving its local
/// sidereal time.
///
/// The instant is stepped by whole sidereal days; because a sidereal day is
/// ~4 minutes short of a solar day, the naive step count can land the result
/// on the day before or after the target. The landed date is therefore
/// re-checked and nudged by one more sidereal day when needed (bounded
/// iteration, a handful of steps at most).
pub fn roll_to_day(start: Quantity<Second>, target_day: i64) -> Quantity<Second> {
    let naive_steps = target_day - utc_day(start);
    let mut t = start + Quantity::new(naive_steps as f64 * SIDEREAL_DAY.value());

    let mut guard = 0;
    while utc_day(t) < target_day && guard < 8 {
        t = t + SIDEREAL_DAY;
        guard += 1;
    }
    while utc_day(t) > target_day && guard < 8 {
        t = t - SIDEREAL_DAY;
        guard += 1;
    }

    // Regression can push the adjusted instant exactly across a day
    // boundary; one final nudge settles it.
    if utc_day(t) != target_day {
        t = if utc_day(t) < target_day {
            t + SIDEREAL_DAY
        } else {
            t - SIDEREAL_DAY
        };
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn day_length_constants() {
        assert_eq!(SOLAR_DAY.value(), 86_400.0);
        assert!((SIDEREAL_DAY.value() - (23.0 * 3600.0 + 56.0 * 60.0 + 4.091)).abs() < EPS);
        assert!((SIDEREAL_REGRESSION.value() - 235.909).abs() < EPS);
    }

    #[test]
    fn instant_from_day_millis_combines_parts() {
        let t = instant_from_day_millis(3, 43_200_000); // day 3, noon
        assert!((t.value() - (3.0 * 86_400.0 + 43_200.0)).abs() < EPS);
        assert_eq!(utc_day(t), 3);
    }

    #[test]
    fn utc_day_floors_at_midnight() {
        assert_eq!(utc_day(Quantity::new(86_399.999)), 0);
        assert_eq!(utc_day(Quantity::new(86_400.0)), 1);
    }

    #[test]
    fn roll_to_same_day_is_identity() {
        let start = instant_from_day_millis(10, 3_600_000);
        let rolled = roll_to_day(start, 10);
        assert!((rolled.value() - start.value()).abs() < EPS);
    }

    #[test]
    fn roll_preserves_sidereal_phase() {
        let start = instant_from_day_millis(0, 43_200_000); // noon
        let rolled = roll_to_day(start, 7);
        let elapsed = rolled - start;
        let sidereal_days = elapsed.value() / SIDEREAL_DAY.value();
        assert!((sidereal_days - sidereal_days.round()).abs() < 1e-9);
        assert_eq!(utc_day(rolled), 7);
    }

    #[test]
    fn roll_lands_on_target_day_despite_regression() {
        // Start near midnight, where the ~4min/day regression drags the
        // naive result onto the previous calendar day.
        let start = instant_from_day_millis(0, 900_000); // 00:15
        for target in 1..30 {
            let rolled = roll_to_day(start, target);
            assert_eq!(utc_day(rolled), target, "target day {}", target);
            let sidereal_days = (rolled - start).value() / SIDEREAL_DAY.value();
            assert!((sidereal_days - sidereal_days.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn roll_backwards_in_time() {
        let start = instant_from_day_millis(20, 82_800_000); // 23:00
        for target in (5..20).rev() {
            let rolled = roll_to_day(start, target);
            assert_eq!(utc_day(rolled), target, "target day {}", target);
        }
    }
}
