//! Combined calendar and wall-clock offsets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use super::{Duration, Period};
use crate::error::{CoreError, CoreResult};

/// A calendar-relative amount plus a sub-day amount.
///
/// Every constructor and every combination canonicalizes: the duration is
/// reduced to below one day and the overflow is added to `period.days`.
/// Years and months are never touched by canonicalization.
///
/// The derived ordering is structural (period first, then duration). It is
/// meant for magnitude comparisons between deltas, not for comparing their
/// effect on a particular datetime.
///
/// # Example
///
/// ```rust
/// use almanac_core::types::Delta;
///
/// let d = Delta::years(1) + Delta::hours(30) + Delta::minutes(90);
/// assert_eq!(d, Delta::years(1) + Delta::days(1) + Delta::hours(7) + Delta::minutes(30));
/// assert_eq!(d.to_string(), "P1Y0M1DT7H30M0S");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Delta {
    /// The calendar part.
    pub period: Period,
    /// The wall-clock part.
    pub duration: Duration,
}

impl Delta {
    /// The empty delta.
    pub const ZERO: Delta = Delta {
        period: Period::ZERO,
        duration: Duration::ZERO,
    };

    /// Creates a canonical delta from its parts.
    #[must_use]
    pub fn new(period: Period, duration: Duration) -> Self {
        Self { period, duration }.canonicalize()
    }

    /// A delta of `n` years.
    #[must_use]
    pub fn years(n: i64) -> Self {
        Self::new(Period::years(n), Duration::ZERO)
    }

    /// A delta of `n` months.
    #[must_use]
    pub fn months(n: i64) -> Self {
        Self::new(Period::months(n), Duration::ZERO)
    }

    /// A delta of `n` days.
    #[must_use]
    pub fn days(n: i64) -> Self {
        Self::new(Period::days(n), Duration::ZERO)
    }

    /// A delta of `n` hours.
    #[must_use]
    pub fn hours(n: i64) -> Self {
        Self::new(Period::ZERO, Duration::new(n, 0, 0, 0))
    }

    /// A delta of `n` minutes.
    #[must_use]
    pub fn minutes(n: i64) -> Self {
        Self::new(Period::ZERO, Duration::new(0, n, 0, 0))
    }

    /// A delta of `n` seconds.
    #[must_use]
    pub fn seconds(n: i64) -> Self {
        Self::new(Period::ZERO, Duration::new(0, 0, n, 0))
    }

    /// A delta of `n` nanoseconds.
    #[must_use]
    pub fn nanoseconds(n: i64) -> Self {
        Self::new(Period::ZERO, Duration::new(0, 0, 0, n))
    }

    /// Returns true if every field is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.period.is_zero() && self.duration.is_zero()
    }

    /// Reduces the duration to below one day, carrying whole days into the
    /// period. Idempotent.
    #[must_use]
    pub fn canonicalize(self) -> Self {
        let (days, duration) = self.duration.canonicalize();
        Self {
            period: self.period + Period::days(days),
            duration,
        }
    }

    /// Component-wise sum followed by canonicalization.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self {
            period: self.period + other.period,
            duration: self.duration.component_add(other.duration),
        }
        .canonicalize()
    }

    /// Subtracts `other`, flooring every resulting field at zero.
    ///
    /// Deltas are non-negative by convention, so this is deliberately lossy:
    /// `days(1).saturating_sub(days(3))` is zero, not minus two days. Borrows
    /// between duration units happen before the floor is applied.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        let raw = Self {
            period: self.period + -other.period,
            duration: self.duration.component_sub(other.duration),
        }
        .canonicalize();
        Self {
            period: raw.period.clamp_non_negative(),
            duration: raw.duration.clamp_non_negative(),
        }
    }

    /// Multiplies every field by `n` and canonicalizes.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidScale` when `n < 1` and
    /// `CoreError::OutOfRange` if a field overflows.
    pub fn scale(&self, n: i64) -> CoreResult<Self> {
        if n < 1 {
            return Err(CoreError::InvalidScale { factor: n });
        }
        let overflow = || CoreError::out_of_range(format!("{self} scaled by {n}"));
        let period = self.period.checked_mul(n).ok_or_else(overflow)?;
        let duration = self.duration.checked_mul(n).ok_or_else(overflow)?;
        Ok(Self::new(period, duration))
    }
}

impl From<Period> for Delta {
    fn from(period: Period) -> Self {
        Self::new(period, Duration::ZERO)
    }
}

impl From<Duration> for Delta {
    fn from(duration: Duration) -> Self {
        Self::new(Period::ZERO, duration)
    }
}

impl Add for Delta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.combine(rhs)
    }
}

impl AddAssign for Delta {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.combine(rhs);
    }
}

impl Sum for Delta {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}T{}", self.period, self.duration)
    }
}
