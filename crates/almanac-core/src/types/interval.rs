//! Inclusive datetime ranges and fiscal quarters.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::datetime::days_in_month;
use super::Datetime;
use crate::error::CoreResult;

/// An inclusive range between two datetimes.
///
/// No ordering is enforced between `start` and `stop`; an inverted interval
/// contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// First instant in the range.
    pub start: Datetime,
    /// Last instant in the range.
    pub stop: Datetime,
}

impl Interval {
    /// Creates an interval.
    #[must_use]
    pub fn new(start: Datetime, stop: Datetime) -> Self {
        Self { start, stop }
    }

    /// Returns true if `dt` lies between `start` and `stop`, bounds included.
    ///
    /// Comparison is by absolute instant, so offsets do not matter.
    #[must_use]
    pub fn contains(&self, dt: &Datetime) -> bool {
        self.start <= *dt && *dt <= self.stop
    }

    /// Returns true if `start` is not after `stop`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.start <= self.stop
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.stop)
    }
}

/// Inclusive containment check, free-function form.
#[must_use]
pub fn within(dt: &Datetime, interval: &Interval) -> bool {
    interval.contains(dt)
}

/// A calendar-aligned fiscal quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    /// January through March.
    Q1,
    /// April through June.
    Q2,
    /// July through September.
    Q3,
    /// October through December.
    Q4,
}

impl Quarter {
    /// All quarters in calendar order.
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// First and last month of the quarter.
    #[must_use]
    pub fn months(self) -> (u32, u32) {
        match self {
            Quarter::Q1 => (1, 3),
            Quarter::Q2 => (4, 6),
            Quarter::Q3 => (7, 9),
            Quarter::Q4 => (10, 12),
        }
    }

    /// The quarter containing `month` (1-12).
    #[must_use]
    pub fn of_month(month: u32) -> Option<Self> {
        match month {
            1..=3 => Some(Quarter::Q1),
            4..=6 => Some(Quarter::Q2),
            7..=9 => Some(Quarter::Q3),
            10..=12 => Some(Quarter::Q4),
            _ => None,
        }
    }

    /// The quarter of `year` as an interval from the first second of its
    /// first month to the last second of its last month, at `offset_minutes`.
    ///
    /// # Errors
    ///
    /// Returns an error if `year` or the offset is out of range.
    pub fn interval(self, year: i32, offset_minutes: i32) -> CoreResult<Interval> {
        let (first, last) = self.months();
        let start = Datetime::new(year, first, 1, 0, 0, 0, offset_minutes)?;
        let stop = Datetime::new(
            year,
            last,
            days_in_month(year, last),
            23,
            59,
            59,
            offset_minutes,
        )?;
        Ok(Interval::new(start, stop))
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        };
        write!(f, "{name}")
    }
}
