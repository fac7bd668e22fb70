//! Calendar-relative offsets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg};

/// A signed calendar offset in years, months and days.
///
/// The fields are independent: 13 months is never folded into a year and a
/// month. Periods add component-wise with [`Period::ZERO`] as the identity;
/// addition and negation saturate at the `i64` bounds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Period {
    /// Whole years.
    #[serde(rename = "periodYears")]
    pub years: i64,
    /// Whole months.
    #[serde(rename = "periodMonths")]
    pub months: i64,
    /// Whole days.
    #[serde(rename = "periodDays")]
    pub days: i64,
}

impl Period {
    /// The empty period.
    pub const ZERO: Period = Period {
        years: 0,
        months: 0,
        days: 0,
    };

    /// Creates a period.
    #[must_use]
    pub const fn new(years: i64, months: i64, days: i64) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    /// A period of `n` years.
    #[must_use]
    pub const fn years(n: i64) -> Self {
        Self::new(n, 0, 0)
    }

    /// A period of `n` months.
    #[must_use]
    pub const fn months(n: i64) -> Self {
        Self::new(0, n, 0)
    }

    /// A period of `n` days.
    #[must_use]
    pub const fn days(n: i64) -> Self {
        Self::new(0, 0, n)
    }

    /// Returns true if every field is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Years and months expressed as months.
    #[must_use]
    pub fn total_months(&self) -> i64 {
        self.years.saturating_mul(12).saturating_add(self.months)
    }

    /// Multiplies each field by `n`, or `None` on overflow.
    #[must_use]
    pub fn checked_mul(&self, n: i64) -> Option<Self> {
        Some(Self {
            years: self.years.checked_mul(n)?,
            months: self.months.checked_mul(n)?,
            days: self.days.checked_mul(n)?,
        })
    }

    /// Replaces negative fields with zero.
    #[must_use]
    pub fn clamp_non_negative(self) -> Self {
        Self {
            years: self.years.max(0),
            months: self.months.max(0),
            days: self.days.max(0),
        }
    }
}

impl Add for Period {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            years: self.years.saturating_add(rhs.years),
            months: self.months.saturating_add(rhs.months),
            days: self.days.saturating_add(rhs.days),
        }
    }
}

impl AddAssign for Period {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Neg for Period {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            years: self.years.saturating_neg(),
            months: self.months.saturating_neg(),
            days: self.days.saturating_neg(),
        }
    }
}

impl Sum for Period {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Y{}M{}D", self.years, self.months, self.days)
    }
}
