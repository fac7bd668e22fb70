//! Civil datetime with an explicit UTC offset.
//!
//! A [`Datetime`] is the flat record (year, month, day, hour, minute, second,
//! offset, weekday). The only way to obtain one is through the conversion
//! layer ([`Datetime::from_absolute`] and the constructors built on it), so
//! the weekday is always derived from the calendar date and the fields
//! always validate.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use super::Weekday;
use crate::clock::Clock;
use crate::error::{CoreError, CoreResult};

/// Smallest representable year.
pub const MIN_YEAR: i32 = 1;
/// Largest representable year.
pub const MAX_YEAR: i32 = 2999;
/// Largest UTC offset magnitude in minutes; a full day is rejected.
pub const MAX_OFFSET_MINUTES: i32 = 1439;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_DAY: i64 = 86_400;

/// The raw, unvalidated field record of a datetime.
///
/// This is the shape that crosses external boundaries (binary layout,
/// decoders). Converting it into a [`Datetime`] re-runs validation and
/// recomputes the weekday; the stored weekday is only range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatetimeFields {
    /// Year, 1..=2999.
    pub year: i64,
    /// Month, 1..=12.
    pub month: i64,
    /// Day of month, 1..=31.
    pub day: i64,
    /// Hour, 0..=23.
    pub hour: i64,
    /// Minute, 0..=59.
    pub minute: i64,
    /// Second, 0..=59.
    pub second: i64,
    /// UTC offset in minutes.
    pub offset_minutes: i64,
    /// Weekday, 0 = Sunday.
    pub weekday: i64,
}

impl DatetimeFields {
    /// Checks every field against its range.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDatetime` naming the first bad field.
    pub fn validate(&self) -> CoreResult<()> {
        check_range("year", self.year, MIN_YEAR as i64, MAX_YEAR as i64)?;
        check_range("month", self.month, 1, 12)?;
        check_range("day", self.day, 1, 31)?;
        check_range("hour", self.hour, 0, 23)?;
        check_range("minute", self.minute, 0, 59)?;
        check_range("second", self.second, 0, 59)?;
        check_range("weekday", self.weekday, 0, 6)?;
        if self.offset_minutes.abs() > MAX_OFFSET_MINUTES as i64 {
            return Err(CoreError::InvalidOffset {
                minutes: self.offset_minutes,
            });
        }
        Ok(())
    }

    /// Returns true if [`validate`](Self::validate) succeeds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validates the record and builds a [`Datetime`] from it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDatetime` if a field is out of range or the
    /// day does not exist in the month.
    pub fn into_datetime(self) -> CoreResult<Datetime> {
        self.validate()?;
        Datetime::new(
            self.year as i32,
            self.month as u32,
            self.day as u32,
            self.hour as u32,
            self.minute as u32,
            self.second as u32,
            self.offset_minutes as i32,
        )
    }
}

fn check_range(name: &str, value: i64, low: i64, high: i64) -> CoreResult<()> {
    if value < low || value > high {
        return Err(CoreError::invalid_datetime(format!(
            "{name} {value} outside {low}..={high}"
        )));
    }
    Ok(())
}

fn fixed_offset(minutes: i32) -> CoreResult<FixedOffset> {
    if minutes.abs() > MAX_OFFSET_MINUTES {
        return Err(CoreError::InvalidOffset {
            minutes: minutes as i64,
        });
    }
    FixedOffset::east_opt(minutes * 60).ok_or(CoreError::InvalidOffset {
        minutes: minutes as i64,
    })
}

/// A civil datetime in the proleptic Gregorian calendar with a fixed UTC offset.
///
/// Equality, ordering and hashing compare the absolute instant, so two values
/// with different offsets can be equal.
///
/// # Example
///
/// ```rust
/// use almanac_core::types::{Datetime, Weekday};
///
/// let dt: Datetime = "2014-04-05T17:25:04+05:00".parse().unwrap();
/// assert_eq!(dt.weekday(), Weekday::Saturday);
/// assert_eq!(dt.to_string(), "2014-04-05T17:25:04+05:00");
///
/// let utc = dt.alter_timezone(0).unwrap();
/// assert_eq!(utc.hour(), 12);
/// assert_eq!(utc, dt);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Datetime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    offset_minutes: i32,
    weekday: Weekday,
}

impl Datetime {
    /// Creates a datetime from its local wall-clock fields and UTC offset.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDatetime` if any field is out of range or
    /// the day does not exist in that month, and `CoreError::InvalidOffset`
    /// for offsets of a day or more.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        offset_minutes: i32,
    ) -> CoreResult<Self> {
        check_range("year", year as i64, MIN_YEAR as i64, MAX_YEAR as i64)?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            CoreError::invalid_datetime(format!("{year:04}-{month:02}-{day:02} is not a date"))
        })?;
        let local = date.and_hms_opt(hour, minute, second).ok_or_else(|| {
            CoreError::invalid_datetime(format!("{hour:02}:{minute:02}:{second:02} is not a time"))
        })?;
        Self::from_offset_and_local(offset_minutes, local)
    }

    /// Creates a UTC datetime.
    ///
    /// # Errors
    ///
    /// Same as [`Datetime::new`].
    pub fn utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> CoreResult<Self> {
        Self::new(year, month, day, hour, minute, second, 0)
    }

    /// Creates a datetime at midnight of the given date.
    ///
    /// # Errors
    ///
    /// Same as [`Datetime::new`].
    pub fn from_ymd(year: i32, month: u32, day: u32, offset_minutes: i32) -> CoreResult<Self> {
        Self::new(year, month, day, 0, 0, 0, offset_minutes)
    }

    /// Builds a datetime from an absolute instant (seconds since the Unix
    /// epoch) viewed at the given offset.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidOffset` for offsets of a day or more and
    /// `CoreError::OutOfRange` when the local year leaves 1..=2999.
    pub fn from_absolute(offset_minutes: i32, instant: i64) -> CoreResult<Self> {
        let offset = fixed_offset(offset_minutes)?;
        let utc = DateTime::from_timestamp(instant, 0)
            .ok_or_else(|| CoreError::out_of_range(format!("instant {instant}")))?;
        let local = utc.with_timezone(&offset).naive_local();
        if local.year() < MIN_YEAR || local.year() > MAX_YEAR {
            return Err(CoreError::out_of_range(format!(
                "year {} outside {MIN_YEAR}..={MAX_YEAR}",
                local.year()
            )));
        }
        Ok(Self::from_local_unchecked(local, offset_minutes))
    }

    /// Interprets a naive wall-clock reading as local time at `offset_minutes`.
    ///
    /// # Errors
    ///
    /// Same as [`Datetime::from_absolute`].
    pub fn from_offset_and_local(offset_minutes: i32, local: NaiveDateTime) -> CoreResult<Self> {
        fixed_offset(offset_minutes)?;
        let instant =
            local.and_utc().timestamp() - offset_minutes as i64 * SECONDS_PER_MINUTE;
        Self::from_absolute(offset_minutes, instant)
    }

    /// Reads the current instant from `clock` and views it at `offset_minutes`.
    ///
    /// # Errors
    ///
    /// Same as [`Datetime::from_absolute`].
    pub fn now(clock: &dyn Clock, offset_minutes: i32) -> CoreResult<Self> {
        Self::from_absolute(offset_minutes, clock.now())
    }

    /// Returns the absolute instant (seconds since the Unix epoch) and the offset.
    #[must_use]
    pub fn to_absolute(&self) -> (i64, i32) {
        (self.instant(), self.offset_minutes)
    }

    /// Seconds since the Unix epoch.
    #[must_use]
    pub fn instant(&self) -> i64 {
        self.to_naive_local().and_utc().timestamp()
            - self.offset_minutes as i64 * SECONDS_PER_MINUTE
    }

    /// Returns the same instant viewed at another UTC offset.
    ///
    /// # Errors
    ///
    /// Same as [`Datetime::from_absolute`].
    pub fn alter_timezone(&self, offset_minutes: i32) -> CoreResult<Self> {
        Self::from_absolute(offset_minutes, self.instant())
    }

    /// Keeps the wall-clock reading and replaces the offset, which moves the
    /// instant.
    ///
    /// # Errors
    ///
    /// Same as [`Datetime::from_absolute`].
    pub fn with_offset(&self, offset_minutes: i32) -> CoreResult<Self> {
        Self::from_offset_and_local(offset_minutes, self.to_naive_local())
    }

    /// Returns the same instant viewed at UTC.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::OutOfRange` when the UTC year leaves the valid range.
    pub fn to_utc(&self) -> CoreResult<Self> {
        self.alter_timezone(0)
    }

    /// The local wall-clock reading.
    #[must_use]
    pub fn to_naive_local(&self) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .and_then(|date| date.and_hms_opt(self.hour, self.minute, self.second))
            .expect("datetime fields are validated on construction")
    }

    /// The UTC wall-clock reading.
    #[must_use]
    pub fn to_naive_utc(&self) -> NaiveDateTime {
        self.to_naive_local() - chrono::Duration::minutes(self.offset_minutes as i64)
    }

    /// Converts to a chrono `DateTime<FixedOffset>`.
    #[must_use]
    pub fn to_chrono(&self) -> DateTime<FixedOffset> {
        let offset = FixedOffset::east_opt(self.offset_minutes * 60)
            .expect("offset is validated on construction");
        self.to_naive_utc().and_utc().with_timezone(&offset)
    }

    /// Returns the raw field record.
    #[must_use]
    pub fn fields(&self) -> DatetimeFields {
        DatetimeFields {
            year: self.year as i64,
            month: self.month as i64,
            day: self.day as i64,
            hour: self.hour as i64,
            minute: self.minute as i64,
            second: self.second as i64,
            offset_minutes: self.offset_minutes as i64,
            weekday: self.weekday.index() as i64,
        }
    }

    /// Returns true if the stored fields validate and the weekday matches the date.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields().is_valid()
            && NaiveDate::from_ymd_opt(self.year, self.month, self.day)
                .is_some_and(|d| Weekday::from(d.weekday()) == self.weekday)
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Returns the hour component (0-23).
    #[must_use]
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Returns the minute component (0-59).
    #[must_use]
    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Returns the second component (0-59).
    #[must_use]
    pub fn second(&self) -> u32 {
        self.second
    }

    /// Returns the UTC offset in minutes.
    #[must_use]
    pub fn offset_minutes(&self) -> i32 {
        self.offset_minutes
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// The local calendar date as `(year, month, day)`.
    #[must_use]
    pub fn date_key(&self) -> (i32, u32, u32) {
        (self.year, self.month, self.day)
    }

    /// Checks if the date is a weekday (Monday through Friday).
    #[must_use]
    pub fn is_weekday(&self) -> bool {
        self.weekday.is_weekday()
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        self.weekday.is_weekend()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    /// Returns the number of days in the datetime's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Midnight of the same local date, same offset.
    #[must_use]
    pub fn start_of_day(&self) -> Self {
        let local = self.to_naive_local().date().and_time(chrono::NaiveTime::MIN);
        Self::from_local_unchecked(local, self.offset_minutes)
    }

    /// Rebuilds a datetime from a wall-clock reading known to be in range.
    ///
    /// Callers guarantee the year stays within 1..=2999 and the offset is valid.
    pub(crate) fn from_local_unchecked(local: NaiveDateTime, offset_minutes: i32) -> Self {
        Self {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second(),
            offset_minutes,
            weekday: local.weekday().into(),
        }
    }

    /// Seconds from `self` to `other` (positive when `other` is later).
    #[must_use]
    pub fn seconds_until(&self, other: &Datetime) -> i64 {
        other.instant() - self.instant()
    }

    /// Whole days between two datetimes, ignoring direction.
    #[must_use]
    pub fn days_between(&self, other: &Datetime) -> i64 {
        self.seconds_until(other).abs() / SECONDS_PER_DAY
    }

    /// Returns the earlier of two datetimes.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        if self <= other {
            self
        } else {
            other
        }
    }

    /// Returns the later of two datetimes.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if self >= other {
            self
        } else {
            other
        }
    }
}

impl PartialEq for Datetime {
    fn eq(&self, other: &Self) -> bool {
        self.instant() == other.instant()
    }
}

impl Eq for Datetime {}

impl PartialOrd for Datetime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Datetime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant().cmp(&other.instant())
    }
}

impl Hash for Datetime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instant().hash(state);
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.offset_minutes < 0 { '-' } else { '+' };
        let offset = self.offset_minutes.abs();
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}{:02}:{:02}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            sign,
            offset / 60,
            offset % 60
        )
    }
}

impl FromStr for Datetime {
    type Err = CoreError;

    /// Parses ISO-8601 date-and-time with an explicit offset
    /// (`2014-04-05T17:25:04+05:00`). `Z` is accepted for UTC and fractional
    /// seconds are truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = DateTime::parse_from_rfc3339(s)
            .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%z"))
            .map_err(|e| CoreError::parse(s, e.to_string()))?;
        let offset_seconds = parsed.offset().local_minus_utc();
        if offset_seconds % 60 != 0 {
            return Err(CoreError::parse(s, "offset has a seconds component"));
        }
        Self::from_offset_and_local(offset_seconds / 60, parsed.naive_local())
            .map_err(|e| CoreError::parse(s, e.to_string()))
    }
}

impl Datetime {
    /// Parses the ISO-8601 text form.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Parse` if the text does not match the grammar or
    /// describes an out-of-range datetime.
    pub fn parse(s: &str) -> CoreResult<Self> {
        s.parse()
    }
}

impl Serialize for Datetime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Datetime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl From<Datetime> for DateTime<FixedOffset> {
    fn from(dt: Datetime) -> Self {
        dt.to_chrono()
    }
}

impl TryFrom<DateTime<FixedOffset>> for Datetime {
    type Error = CoreError;

    fn try_from(value: DateTime<FixedOffset>) -> Result<Self, Self::Error> {
        Self::from_absolute(value.offset().local_minus_utc() / 60, value.timestamp())
    }
}

/// Number of days in a month for a given year.
///
/// Months outside 1..=12 have zero days.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Gregorian leap year test.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
