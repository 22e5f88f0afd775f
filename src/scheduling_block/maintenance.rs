use qtty::{Quantity, Second};

use crate::time_window::Interval;

/// Fixed length of every maintenance blackout: 8 hours.
pub const MAINTENANCE_DURATION: Quantity<Second> = Quantity::new(8.0 * 3_600.0);

/// A recurring blackout period during which no beam capacity is available.
///
/// Windows are supplied externally and never move; only their start varies.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaintenanceWindow {
    start: Quantity<Second>,
}

impl MaintenanceWindow {
    pub fn new(start: Quantity<Second>) -> Self {
        Self { start }
    }

    pub fn start(&self) -> Quantity<Second> {
        self.start
    }

    pub fn span(&self) -> Interval<Second> {
        Interval::new(self.start, self.start + MAINTENANCE_DURATION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_is_eight_hours() {
        let w = MaintenanceWindow::new(Quantity::new(86_400.0));
        assert_eq!(w.span().duration().value(), 28_800.0);
        assert_eq!(w.span().start().value(), 86_400.0);
    }
}
