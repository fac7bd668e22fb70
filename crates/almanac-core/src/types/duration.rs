//! Wall-clock offsets below one day.

use serde::{Deserialize, Serialize};
use std::fmt;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A wall-clock offset in hours, minutes, seconds and nanoseconds.
///
/// In canonical form minutes and seconds lie in 0..=59 and hours in 0..=23;
/// anything larger belongs in a day count, which a bare `Duration` cannot
/// hold. [`Duration::canonicalize`] hands the overflow back as days, and
/// [`Delta`](super::Delta) folds it into its period.
///
/// Component arithmetic saturates at the `i64` bounds. A saturated duration
/// is far outside any datetime's range, so applying it fails with
/// `CoreError::OutOfRange` instead of wrapping.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Duration {
    /// Hours.
    #[serde(rename = "durationHours")]
    pub hours: i64,
    /// Minutes.
    #[serde(rename = "durationMinutes")]
    pub minutes: i64,
    /// Seconds.
    #[serde(rename = "durationSeconds")]
    pub seconds: i64,
    /// Nanoseconds; carried through untouched by canonicalization.
    #[serde(rename = "durationNs")]
    pub nanoseconds: i64,
}

impl Duration {
    /// The empty duration.
    pub const ZERO: Duration = Duration {
        hours: 0,
        minutes: 0,
        seconds: 0,
        nanoseconds: 0,
    };

    /// Creates a duration as given, without canonicalizing.
    #[must_use]
    pub const fn new(hours: i64, minutes: i64, seconds: i64, nanoseconds: i64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            nanoseconds,
        }
    }

    /// Returns true if every field is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Hours, minutes and seconds expressed as seconds, or `None` on overflow.
    #[must_use]
    pub fn total_seconds(&self) -> Option<i64> {
        self.hours
            .checked_mul(3600)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)
    }

    /// Returns true if every field is within its natural bound.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        (0..24).contains(&self.hours)
            && (0..60).contains(&self.minutes)
            && (0..60).contains(&self.seconds)
            && (0..NANOS_PER_SECOND).contains(&self.nanoseconds)
    }

    /// Carries seconds into minutes, minutes into hours and hours into days.
    ///
    /// Returns the whole days carried out together with the reduced duration.
    /// Floor division is used throughout, so negative fields borrow from the
    /// next unit up and the returned day count can be negative.
    #[must_use]
    pub fn canonicalize(self) -> (i64, Self) {
        let minutes = self.minutes.saturating_add(self.seconds.div_euclid(60));
        let seconds = self.seconds.rem_euclid(60);
        let hours = self.hours.saturating_add(minutes.div_euclid(60));
        let minutes = minutes.rem_euclid(60);
        let days = hours.div_euclid(24);
        let hours = hours.rem_euclid(24);
        (
            days,
            Self {
                hours,
                minutes,
                seconds,
                nanoseconds: self.nanoseconds,
            },
        )
    }

    /// Adds two durations component-wise and canonicalizes the result.
    #[must_use]
    pub fn combine(self, other: Self) -> (i64, Self) {
        self.component_add(other).canonicalize()
    }

    pub(crate) fn component_add(self, other: Self) -> Self {
        Self {
            hours: self.hours.saturating_add(other.hours),
            minutes: self.minutes.saturating_add(other.minutes),
            seconds: self.seconds.saturating_add(other.seconds),
            nanoseconds: self.nanoseconds.saturating_add(other.nanoseconds),
        }
    }

    pub(crate) fn component_sub(self, other: Self) -> Self {
        Self {
            hours: self.hours.saturating_sub(other.hours),
            minutes: self.minutes.saturating_sub(other.minutes),
            seconds: self.seconds.saturating_sub(other.seconds),
            nanoseconds: self.nanoseconds.saturating_sub(other.nanoseconds),
        }
    }

    /// Multiplies each field by `n`, or `None` on overflow.
    #[must_use]
    pub fn checked_mul(&self, n: i64) -> Option<Self> {
        Some(Self {
            hours: self.hours.checked_mul(n)?,
            minutes: self.minutes.checked_mul(n)?,
            seconds: self.seconds.checked_mul(n)?,
            nanoseconds: self.nanoseconds.checked_mul(n)?,
        })
    }

    /// Replaces negative fields with zero.
    #[must_use]
    pub fn clamp_non_negative(self) -> Self {
        Self {
            hours: self.hours.max(0),
            minutes: self.minutes.max(0),
            seconds: self.seconds.max(0),
            nanoseconds: self.nanoseconds.max(0),
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}H{}M{}", self.hours, self.minutes, self.seconds)?;
        if self.nanoseconds != 0 {
            write!(f, ".{:09}", self.nanoseconds)?;
        }
        write!(f, "S")
    }
}
