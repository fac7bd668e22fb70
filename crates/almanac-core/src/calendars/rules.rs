//! Holiday rule variants and the matcher.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreResult;
use crate::types::{days_in_month, Datetime, Delta, Weekday};

/// How a fixed-date holiday that lands on a weekend is observed.
///
/// Each policy is a table from the weekday the holiday falls on to a day
/// shift; weekdays not listed stay where they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Observance {
    /// Never moved.
    #[default]
    Unadjusted,
    /// Saturday -> Friday, Sunday -> Monday.
    NearestWorkday,
    /// Sunday -> Monday; Saturday stays.
    SundayToMonday,
    /// Saturday -> Monday, Sunday -> Monday.
    NextMonday,
    /// Saturday -> Monday, Sunday -> Tuesday, Monday -> Tuesday.
    ///
    /// For the second of two adjacent holidays whose first one was moved to
    /// Monday.
    NextMondayOrTuesday,
    /// Saturday -> Friday, Sunday -> Friday.
    PreviousFriday,
}

impl Observance {
    /// Days to move a holiday falling on `weekday`.
    #[must_use]
    pub fn shift_days(self, weekday: Weekday) -> i64 {
        use Weekday::{Monday, Saturday, Sunday};
        match (self, weekday) {
            (Observance::NearestWorkday, Saturday) => -1,
            (Observance::NearestWorkday, Sunday) => 1,
            (Observance::SundayToMonday, Sunday) => 1,
            (Observance::NextMonday, Saturday) => 2,
            (Observance::NextMonday, Sunday) => 1,
            (Observance::NextMondayOrTuesday, Saturday | Sunday) => 2,
            (Observance::NextMondayOrTuesday, Monday) => 1,
            (Observance::PreviousFriday, Saturday) => -1,
            (Observance::PreviousFriday, Sunday) => -2,
            _ => 0,
        }
    }

    /// Moves `dt` to the day it is observed on.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::OutOfRange` if the shift leaves the year range.
    pub fn observed_shift(self, dt: &Datetime) -> CoreResult<Datetime> {
        match self.shift_days(dt.weekday()) {
            0 => Ok(*dt),
            n => dt.add_delta(&Delta::days(n)),
        }
    }
}

/// Position of a weekday within its month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Occurrence {
    /// Days 1-7.
    First,
    /// Days 8-14.
    Second,
    /// Days 15-21.
    Third,
    /// Days 22-28.
    Fourth,
    /// The final occurrence, whichever week it is in.
    Last,
}

impl Occurrence {
    /// Returns true if day `day` of a month with `month_length` days is at
    /// this position for its weekday.
    #[must_use]
    pub fn matches_day(self, day: u32, month_length: u32) -> bool {
        let index = (day.max(1) - 1) / 7;
        match self {
            Occurrence::First => index == 0,
            Occurrence::Second => index == 1,
            Occurrence::Third => index == 2,
            Occurrence::Fourth => index == 3,
            Occurrence::Last => day + 7 > month_length,
        }
    }

    fn ordinal(self) -> Option<u32> {
        match self {
            Occurrence::First => Some(1),
            Occurrence::Second => Some(2),
            Occurrence::Third => Some(3),
            Occurrence::Fourth => Some(4),
            Occurrence::Last => None,
        }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Occurrence::First => "first",
            Occurrence::Second => "second",
            Occurrence::Third => "third",
            Occurrence::Fourth => "fourth",
            Occurrence::Last => "last",
        };
        write!(f, "{name}")
    }
}

/// A holiday on the same calendar date every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedHoliday {
    /// Day of month.
    pub day: u32,
    /// Month (1-12).
    pub month: u32,
    /// Weekend observance policy.
    pub observance: Observance,
    /// UTC offset of the market the date belongs to.
    pub offset_minutes: i32,
}

impl FixedHoliday {
    /// Creates a fixed holiday.
    #[must_use]
    pub const fn new(day: u32, month: u32, observance: Observance, offset_minutes: i32) -> Self {
        Self {
            day,
            month,
            observance,
            offset_minutes,
        }
    }

    /// The observed date in `year`, at midnight in the reference offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the date does not exist in `year` (Feb 29) or the
    /// shift leaves the year range.
    pub fn observed(&self, year: i32) -> CoreResult<Datetime> {
        let actual = Datetime::from_ymd(year, self.month, self.day, self.offset_minutes)?;
        self.observance.observed_shift(&actual)
    }
}

/// A holiday on the nth (or last) given weekday of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolidayRule {
    /// Month (1-12).
    pub month: u32,
    /// Which occurrence of the weekday.
    pub occurrence: Occurrence,
    /// The weekday.
    pub weekday: Weekday,
}

impl HolidayRule {
    /// Creates a rule.
    #[must_use]
    pub const fn new(month: u32, occurrence: Occurrence, weekday: Weekday) -> Self {
        Self {
            month,
            occurrence,
            weekday,
        }
    }

    /// The date the rule lands on in `year`, at midnight in `offset_minutes`.
    #[must_use]
    pub fn date_in(&self, year: i32, offset_minutes: i32) -> Option<Datetime> {
        let weekday = chrono::Weekday::from(self.weekday);
        let date = match self.occurrence.ordinal() {
            Some(n) => nth_weekday_of_month(year, self.month, weekday, n),
            None => last_weekday_of_month(year, self.month, weekday),
        }?;
        Datetime::from_ymd(date.year(), date.month(), date.day(), offset_minutes).ok()
    }
}

/// A single holiday entry generated for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Holiday {
    /// Same calendar date every year, subject to weekend observance.
    Fixed(FixedHoliday),
    /// Nth weekday of a month.
    Rule(HolidayRule),
    /// A date already materialized for the year (Easter and its relatives).
    Easter(Datetime),
}

impl Holiday {
    /// Returns true if `dt` falls on this holiday in `dt`'s own year.
    #[must_use]
    pub fn matches(&self, dt: &Datetime) -> bool {
        match self {
            Holiday::Fixed(fixed) => match_fixed_holiday(dt, fixed),
            Holiday::Rule(rule) => match_holiday_rule(dt, rule),
            Holiday::Easter(easter) => match_easter_holiday(dt, easter),
        }
    }

    /// The observed date of this holiday in `year`.
    ///
    /// Rule dates are placed at `offset_minutes`; fixed holidays carry their
    /// own offset and Easter entries are returned as stored.
    #[must_use]
    pub fn observed_date(&self, year: i32, offset_minutes: i32) -> Option<Datetime> {
        match self {
            Holiday::Fixed(fixed) => fixed.observed(year).ok(),
            Holiday::Rule(rule) => rule.date_in(year, offset_minutes),
            Holiday::Easter(easter) => Some(*easter),
        }
    }
}

/// True iff `dt`'s local date is the observed date of `fixed` in `dt`'s year.
///
/// The observance shift is recomputed for that year, since the weekday of a
/// fixed date changes every year.
#[must_use]
pub fn match_fixed_holiday(dt: &Datetime, fixed: &FixedHoliday) -> bool {
    fixed
        .observed(dt.year())
        .is_ok_and(|observed| observed.date_key() == dt.date_key())
}

/// True iff `dt` is the rule's weekday, in the rule's month, at the rule's
/// position within that month.
#[must_use]
pub fn match_holiday_rule(dt: &Datetime, rule: &HolidayRule) -> bool {
    dt.weekday() == rule.weekday
        && dt.month() == rule.month
        && rule.occurrence.matches_day(dt.day(), dt.days_in_month())
}

/// True iff `dt` has the same local calendar date as `easter`.
#[must_use]
pub fn match_easter_holiday(dt: &Datetime, easter: &Datetime) -> bool {
    dt.date_key() == easter.date_key()
}

/// Calculate the nth occurrence of a weekday in a month.
pub fn nth_weekday_of_month(
    year: i32,
    month: u32,
    weekday: chrono::Weekday,
    n: u32,
) -> Option<NaiveDate> {
    let first_weekday = NaiveDate::from_ymd_opt(year, month, 1)?.weekday();
    let days_until = (weekday.num_days_from_monday() as i32
        - first_weekday.num_days_from_monday() as i32)
        .rem_euclid(7) as u32;
    let day = 1 + days_until + n.checked_sub(1)? * 7;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Calculate the last occurrence of a weekday in a month.
pub fn last_weekday_of_month(year: i32, month: u32, weekday: chrono::Weekday) -> Option<NaiveDate> {
    let last_day = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
    let days_back = (last_day.weekday().num_days_from_monday() as i32
        - weekday.num_days_from_monday() as i32)
        .rem_euclid(7);
    last_day.checked_sub_signed(chrono::Duration::days(days_back as i64))
}
