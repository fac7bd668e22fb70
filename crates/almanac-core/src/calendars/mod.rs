//! Holiday sets and business-day queries.
//!
//! This module provides:
//! - Holiday rule variants with weekend observance policies
//! - Easter-relative holiday generation
//! - Holiday sets for the US and UK exchanges
//! - Business day stepping and counting

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod easter;
mod rules;
mod uk;
mod us;

pub use easter::{easter_monday, easter_relative, easter_sunday, good_friday};
pub use rules::{
    last_weekday_of_month, match_easter_holiday, match_fixed_holiday, match_holiday_rule,
    nth_weekday_of_month, FixedHoliday, Holiday, HolidayRule, Observance, Occurrence,
};
pub use uk::UkExchange;
pub use us::UsExchange;

use crate::error::{CoreError, CoreResult};
use crate::types::{Datetime, Delta};

/// Returns true if any entry of `holidays` matches `dt`.
#[must_use]
pub fn is_holiday(holidays: &[Holiday], dt: &Datetime) -> bool {
    holidays.iter().any(|holiday| holiday.matches(dt))
}

/// A market's holidays, generated on demand per year.
///
/// Implementors only supply the yearly holiday list; every query regenerates
/// it for the year of the datetime being asked about. All comparisons use the
/// datetime's own local date, with no timezone conversion.
pub trait HolidaySet: Send + Sync {
    /// Returns the name of the holiday set.
    fn name(&self) -> &str;

    /// UTC offset, in minutes, that generated dates are placed at.
    fn zone_offset(&self) -> i32;

    /// The holiday entries in force for `year`.
    fn holidays(&self, year: i32) -> Vec<Holiday>;

    /// Returns true if `dt`'s local date is a holiday.
    fn is_holiday(&self, dt: &Datetime) -> bool {
        is_holiday(&self.holidays(dt.year()), dt)
    }

    /// Returns true if `dt` is neither a weekend nor a holiday.
    fn is_business(&self, dt: &Datetime) -> bool {
        dt.is_weekday() && !self.is_holiday(dt)
    }

    /// The first business day strictly after `dt`, keeping its time of day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::OutOfRange` if stepping leaves the year range.
    fn next_business_day(&self, dt: &Datetime) -> CoreResult<Datetime> {
        step_to_business(self, dt, 1)
    }

    /// The last business day strictly before `dt`, keeping its time of day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::OutOfRange` if stepping leaves the year range.
    fn previous_business_day(&self, dt: &Datetime) -> CoreResult<Datetime> {
        step_to_business(self, dt, -1)
    }

    /// Advances `dt` by `days` business days; negative counts move backwards.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::OutOfRange` if stepping leaves the year range.
    fn add_business_days(&self, dt: &Datetime, days: i64) -> CoreResult<Datetime> {
        let direction = if days >= 0 { 1 } else { -1 };
        let mut result = *dt;
        for _ in 0..days.unsigned_abs() {
            result = step_to_business(self, &result, direction)?;
        }
        Ok(result)
    }

    /// Counts business days between two datetimes (exclusive of start,
    /// inclusive of end), compared by local date in `start`'s offset.
    ///
    /// The count is negative when `end` is before `start`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::OutOfRange` if stepping leaves the year range.
    fn business_days_between(&self, start: &Datetime, end: &Datetime) -> CoreResult<i64> {
        if end < start {
            return self.business_days_between(end, start).map(|n| -n);
        }
        let last = end.alter_timezone(start.offset_minutes())?.date_key();
        let one_day = Delta::days(1);
        let mut count = 0;
        let mut current = start.add_delta(&one_day)?;
        while current.date_key() <= last {
            if self.is_business(&current) {
                count += 1;
            }
            current = current.add_delta(&one_day)?;
        }
        Ok(count)
    }

    /// The observed holiday dates falling in `year`, sorted and deduplicated.
    fn holiday_dates(&self, year: i32) -> Vec<Datetime> {
        let offset = self.zone_offset();
        let mut dates: Vec<Datetime> = self
            .holidays(year)
            .iter()
            .filter_map(|holiday| holiday.observed_date(year, offset))
            .filter(|dt| dt.year() == year)
            .collect();
        dates.sort_by_key(Datetime::date_key);
        dates.dedup_by_key(|dt| dt.date_key());
        debug!("{}: {} holidays in {}", self.name(), dates.len(), year);
        dates
    }
}

fn step_to_business<S>(set: &S, dt: &Datetime, direction: i64) -> CoreResult<Datetime>
where
    S: HolidaySet + ?Sized,
{
    let step = Delta::days(direction);
    let mut result = dt.add_delta(&step)?;
    while !set.is_business(&result) {
        result = result.add_delta(&step)?;
    }
    Ok(result)
}

/// Holiday set that combines several markets.
///
/// A day is a holiday if any member treats it as one.
pub struct JointHolidaySet {
    sets: Vec<Box<dyn HolidaySet>>,
    name: String,
}

impl JointHolidaySet {
    /// Creates a joint set from its members.
    pub fn new(sets: Vec<Box<dyn HolidaySet>>) -> Self {
        let name = sets
            .iter()
            .map(|set| set.name())
            .collect::<Vec<_>>()
            .join(" + ");

        Self { sets, name }
    }

    /// Creates a joint set from market identifiers.
    pub fn from_markets(markets: &[Market]) -> Self {
        Self::new(markets.iter().map(|m| m.boxed_holiday_set()).collect())
    }
}

impl fmt::Debug for JointHolidaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JointHolidaySet")
            .field("name", &self.name)
            .finish()
    }
}

impl HolidaySet for JointHolidaySet {
    fn name(&self) -> &str {
        &self.name
    }

    fn zone_offset(&self) -> i32 {
        self.sets.first().map_or(0, |set| set.zone_offset())
    }

    fn holidays(&self, year: i32) -> Vec<Holiday> {
        self.sets.iter().flat_map(|set| set.holidays(year)).collect()
    }

    fn holiday_dates(&self, year: i32) -> Vec<Datetime> {
        let mut dates: Vec<Datetime> = self
            .sets
            .iter()
            .flat_map(|set| set.holiday_dates(year))
            .collect();
        dates.sort_by_key(Datetime::date_key);
        dates.dedup_by_key(|dt| dt.date_key());
        dates
    }
}

/// Supported markets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// US exchanges (NYSE holiday schedule).
    #[default]
    Us,
    /// UK exchanges (England and Wales bank holidays).
    Uk,
}

impl Market {
    /// All supported markets.
    pub const ALL: [Market; 2] = [Market::Us, Market::Uk];

    /// The holiday set for this market.
    #[must_use]
    pub fn holiday_set(self) -> &'static dyn HolidaySet {
        match self {
            Market::Us => &UsExchange,
            Market::Uk => &UkExchange,
        }
    }

    fn boxed_holiday_set(self) -> Box<dyn HolidaySet> {
        match self {
            Market::Us => Box::new(UsExchange),
            Market::Uk => Box::new(UkExchange),
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Market::Us => write!(f, "us"),
            Market::Uk => write!(f, "uk"),
        }
    }
}

impl FromStr for Market {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" | "usa" | "nyse" => Ok(Market::Us),
            "uk" | "gb" | "lse" => Ok(Market::Uk),
            _ => Err(CoreError::parse(s, "unknown market (expected us or uk)")),
        }
    }
}
