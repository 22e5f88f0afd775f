//! Closed time interval used for block spans and maintenance windows.

use std::fmt::Display;

use qtty::{Quantity, Unit};

/// Closed range `[start, end]` on the scheduling time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<U: Unit> {
    start: Quantity<U>,
    end: Quantity<U>,
}

impl<U: Unit> Interval<U> {
    /// Creates interval `[start, end]`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub const fn new(start: Quantity<U>, end: Quantity<U>) -> Self {
        assert!(
            start.value() <= end.value(),
            "Interval start must be <= end"
        );
        Self { start, end }
    }

    pub const fn from_f64(start: f64, end: f64) -> Self {
        Self::new(Quantity::<U>::new(start), Quantity::<U>::new(end))
    }

    pub const fn start(&self) -> Quantity<U> {
        self.start
    }

    pub const fn end(&self) -> Quantity<U> {
        self.end
    }

    pub fn duration(&self) -> Quantity<U> {
        self.end - self.start
    }

    /// Converts this interval to another unit of the same dimension.
    pub fn to<T: Unit<Dim = U::Dim>>(self) -> Interval<T> {
        Interval::new(self.start.to(), self.end.to())
    }

    /// Returns the interval translated by `delta` (negative deltas move it earlier).
    pub fn shifted(&self, delta: Quantity<U>) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    /// Returns true if `position` ∈ `[start, end]`.
    pub const fn contains(&self, position: Quantity<U>) -> bool {
        self.start.value() <= position.value() && position.value() <= self.end.value()
    }

    /// Checks if this interval overlaps with another interval.
    ///
    /// Endpoints are inclusive: back-to-back intervals sharing an instant
    /// count as overlapping.
    pub const fn overlaps(&self, other: &Interval<U>) -> bool {
        self.start.value() <= other.end.value() && other.start.value() <= self.end.value()
    }

    /// Returns the overlapping part of the two intervals, if any.
    pub fn intersection(&self, other: &Interval<U>) -> Option<Interval<U>> {
        if self.overlaps(other) {
            let start = if self.start.value() > other.start.value() {
                self.start
            } else {
                other.start
            };
            let end = if self.end.value() < other.end.value() {
                self.end
            } else {
                other.end
            };
            Some(Interval::new(start, end))
        } else {
            None
        }
    }
}

impl<U: Unit> Display for Interval<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.3}, {:.3}]", self.start.value(), self.end.value())
    }
}

#[cfg(feature = "serde")]
impl<U: Unit> serde::Serialize for Interval<U> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("Interval", 2)?;
        s.serialize_field("start", &self.start.value())?;
        s.serialize_field("end", &self.end.value())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, U: Unit> serde::Deserialize<'de> for Interval<U> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            start: f64,
            end: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        if raw.start > raw.end {
            return Err(serde::de::Error::custom(format!(
                "interval start {} must be <= end {}",
                raw.start, raw.end
            )));
        }
        Ok(Self::new(
            Quantity::<U>::new(raw.start),
            Quantity::<U>::new(raw.end),
        ))
    }
}
