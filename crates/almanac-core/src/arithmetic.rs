//! Calendar-correct datetime arithmetic.
//!
//! Adding a [`Delta`] applies the wall-clock part first (which may roll the
//! date), then the calendar part to the resulting date, then reattaches the
//! original UTC offset. Month arithmetic clamps to the last day of the target
//! month: Jan 31 + 1 month is Feb 28 (or 29).
//!
//! [`diff`] is only an approximate inverse of [`add_delta`]. Because month
//! addition clamps, there are pairs for which
//! `add_delta(min, diff(a, b)) != max`.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use log::trace;

use crate::error::{CoreError, CoreResult};
use crate::types::{days_in_month, Datetime, Delta, Duration, Period, MAX_YEAR, MIN_YEAR};

impl Datetime {
    /// Returns `self + delta`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::OutOfRange` if the result leaves the year range.
    pub fn add_delta(&self, delta: &Delta) -> CoreResult<Datetime> {
        add_delta(self, delta)
    }

    /// Returns `self - delta`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::OutOfRange` if the result leaves the year range.
    pub fn sub_delta(&self, delta: &Delta) -> CoreResult<Datetime> {
        sub_delta(self, delta)
    }

    /// Returns the greedy calendar difference between `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::OutOfRange` if the two sides cannot share an offset.
    pub fn diff(&self, other: &Datetime) -> CoreResult<Delta> {
        diff(self, other)
    }
}

/// Adds `delta` to `dt`.
///
/// Nanoseconds are below the datetime's resolution and are ignored.
///
/// # Errors
///
/// Returns `CoreError::OutOfRange` if the result leaves the year range.
pub fn add_delta(dt: &Datetime, delta: &Delta) -> CoreResult<Datetime> {
    let local = shift_wall_clock(dt.to_naive_local(), &delta.duration, 1)?;
    let date = local.date();
    let date = shift_months(date, date.day(), delta.period.total_months())?;
    let date = if delta.period.days >= 0 {
        advance_days(date, delta.period.days.unsigned_abs())?
    } else {
        retreat_days(date, delta.period.days.unsigned_abs())?
    };
    Datetime::from_offset_and_local(dt.offset_minutes(), date.and_time(local.time()))
}

/// Subtracts `delta` from `dt`.
///
/// The wall-clock part is taken off first, then whole years, then the
/// remaining months one at a time and finally the days. Each month step
/// clamps against the starting day of month, so Mar 31 - 1 month is Feb 28
/// and Feb 29 - 1 year is Feb 28.
///
/// # Errors
///
/// Returns `CoreError::OutOfRange` if the result leaves the year range.
pub fn sub_delta(dt: &Datetime, delta: &Delta) -> CoreResult<Datetime> {
    let local = shift_wall_clock(dt.to_naive_local(), &delta.duration, -1)?;
    let date = local.date();
    let anchor = date.day();
    let date = shift_months(date, anchor, delta.period.years.saturating_mul(-12))?;
    let date = walk_months_back(date, anchor, delta.period.months)?;
    let date = if delta.period.days >= 0 {
        retreat_days(date, delta.period.days.unsigned_abs())?
    } else {
        advance_days(date, delta.period.days.unsigned_abs())?
    };
    Datetime::from_offset_and_local(dt.offset_minutes(), date.and_time(local.time()))
}

/// Greedy calendar difference between two datetimes.
///
/// Both sides are viewed at UTC. Starting from the earlier one, whole years
/// are added one at a time while the result does not pass the later one,
/// then whole months, days, hours, minutes and seconds in turn. The returned
/// delta is canonical and never negative.
///
/// When the UTC view would leave the year range (year 1 with a positive
/// offset, year 2999 with a negative one) both sides are viewed at the
/// earlier one's offset instead.
///
/// # Errors
///
/// Returns `CoreError::OutOfRange` if the later side cannot be viewed at the
/// earlier side's offset either.
pub fn diff(a: &Datetime, b: &Datetime) -> CoreResult<Delta> {
    let (lo, hi) = ((*a).min(*b), (*a).max(*b));
    let (lo, hi) = match (lo.to_utc(), hi.to_utc()) {
        (Ok(lo), Ok(hi)) => (lo, hi),
        _ => (lo, hi.alter_timezone(lo.offset_minutes())?),
    };

    let units = [
        Delta::years(1),
        Delta::months(1),
        Delta::days(1),
        Delta::hours(1),
        Delta::minutes(1),
        Delta::seconds(1),
    ];
    let result = units
        .iter()
        .fold(Delta::ZERO, |acc, unit| extend_while_within(&lo, &hi, acc, unit));
    trace!("diff {lo} .. {hi} = {result}");
    Ok(result)
}

/// Whole days between two datetimes regardless of order, from the absolute
/// instants and truncated.
#[must_use]
pub fn days_between(a: &Datetime, b: &Datetime) -> i64 {
    a.days_between(b)
}

fn extend_while_within(lo: &Datetime, hi: &Datetime, base: Delta, unit: &Delta) -> Delta {
    let mut acc = base;
    loop {
        let candidate = acc + *unit;
        match add_delta(lo, &candidate) {
            Ok(reached) if reached <= *hi => acc = candidate,
            _ => return acc,
        }
    }
}

fn shift_wall_clock(
    local: NaiveDateTime,
    duration: &Duration,
    sign: i64,
) -> CoreResult<NaiveDateTime> {
    let seconds = duration
        .total_seconds()
        .and_then(|s| s.checked_mul(sign))
        .ok_or_else(|| CoreError::out_of_range(format!("duration {duration}")))?;
    chrono::Duration::try_seconds(seconds)
        .and_then(|d| local.checked_add_signed(d))
        .ok_or_else(|| CoreError::out_of_range(format!("{local} shifted by {seconds}s")))
}

/// Moves `date` by `months`, pinning the day of month to `anchor_day`
/// clamped to the length of the target month.
fn shift_months(date: NaiveDate, anchor_day: u32, months: i64) -> CoreResult<NaiveDate> {
    if months == 0 {
        return Ok(date);
    }
    let overflow = || CoreError::out_of_range(format!("{date} shifted by {months} months"));
    let total = (date.year() as i64 * 12 + date.month0() as i64)
        .checked_add(months)
        .ok_or_else(overflow)?;
    let year = i32::try_from(total.div_euclid(12)).map_err(|_| overflow())?;
    let month = total.rem_euclid(12) as u32 + 1;
    let day = anchor_day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(overflow)
}

/// Steps back one month at a time; a negative count steps forward.
fn walk_months_back(date: NaiveDate, anchor_day: u32, months: i64) -> CoreResult<NaiveDate> {
    let span = u64::from((MAX_YEAR - MIN_YEAR + 1).unsigned_abs()) * 12;
    if months.unsigned_abs() > span {
        return Err(CoreError::out_of_range(format!("{date} walked back {months} months")));
    }
    let step = if months >= 0 { -1 } else { 1 };
    let mut current = date;
    for _ in 0..months.unsigned_abs() {
        current = shift_months(current, anchor_day, step)?;
    }
    Ok(current)
}

fn advance_days(date: NaiveDate, days: u64) -> CoreResult<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| CoreError::out_of_range(format!("{date} + {days} days")))
}

/// Unsigned by construction: there is no negative-day path into subtraction.
fn retreat_days(date: NaiveDate, days: u64) -> CoreResult<NaiveDate> {
    date.checked_sub_days(Days::new(days))
        .ok_or_else(|| CoreError::out_of_range(format!("{date} - {days} days")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> Datetime {
        s.parse().unwrap()
    }

    fn assert_same_fields(a: Datetime, b: Datetime) {
        assert_eq!(a.fields(), b.fields(), "{a} vs {b}");
    }

    #[test]
    fn test_add_month_clamps() {
        let jan31 = dt("2017-01-31T10:00:00+00:00");
        assert_same_fields(
            jan31.add_delta(&Delta::months(1)).unwrap(),
            dt("2017-02-28T10:00:00+00:00"),
        );
        assert_same_fields(
            dt("2016-01-31T10:00:00+00:00")
                .add_delta(&Delta::months(1))
                .unwrap(),
            dt("2016-02-29T10:00:00+00:00"),
        );
    }

    #[test]
    fn test_add_year_and_month_into_leap_february() {
        let d = dt("2015-01-31T00:00:00+00:00");
        let r = d.add_delta(&(Delta::years(1) + Delta::months(1))).unwrap();
        assert_same_fields(r, dt("2016-02-29T00:00:00+00:00"));
    }

    #[test]
    fn test_sub_month_clamps() {
        let d = dt("2017-03-31T08:30:00+00:00");
        assert_same_fields(
            d.sub_delta(&Delta::months(1)).unwrap(),
            dt("2017-02-28T08:30:00+00:00"),
        );
    }

    #[test]
    fn test_sub_walks_months_against_anchor() {
        let d = dt("2017-03-31T00:00:00+00:00");
        assert_same_fields(
            d.sub_delta(&Delta::months(2)).unwrap(),
            dt("2017-01-31T00:00:00+00:00"),
        );
        assert_same_fields(
            d.sub_delta(&Delta::months(13)).unwrap(),
            dt("2016-02-29T00:00:00+00:00"),
        );
    }

    #[test]
    fn test_sub_leap_day_year() {
        let d = dt("2016-02-29T00:00:00+00:00");
        assert_same_fields(
            d.sub_delta(&Delta::years(1)).unwrap(),
            dt("2015-02-28T00:00:00+00:00"),
        );
    }

    #[test]
    fn test_duration_applied_before_period() {
        // 23:13:40 + 4:04:04 rolls into the next day before the period applies.
        let d = dt("1999-02-23T23:13:40+00:00");
        let delta = (Delta::years(1)
            + Delta::months(1)
            + Delta::days(1)
            + Delta::hours(1)
            + Delta::minutes(1)
            + Delta::seconds(1))
        .scale(4)
        .unwrap();
        assert_same_fields(
            d.add_delta(&delta).unwrap(),
            dt("2003-06-28T03:17:44+00:00"),
        );
    }

    #[test]
    fn test_offset_is_reattached() {
        let d = dt("2017-01-31T22:00:00-05:00");
        let r = d.add_delta(&(Delta::hours(3) + Delta::months(1))).unwrap();
        assert_same_fields(r, dt("2017-03-01T01:00:00-05:00"));
        assert_eq!(r.offset_minutes(), -300);
    }

    #[test]
    fn test_sub_duration_rolls_back_a_day() {
        let d = dt("2017-03-01T01:00:00+00:00");
        let r = d.sub_delta(&Delta::hours(2)).unwrap();
        assert_same_fields(r, dt("2017-02-28T23:00:00+00:00"));
    }

    #[test]
    fn test_negative_period_days() {
        let d = dt("2017-03-01T00:00:00+00:00");
        let back = Delta {
            period: Period::days(-1),
            duration: Duration::ZERO,
        };
        assert_same_fields(d.add_delta(&back).unwrap(), dt("2017-02-28T00:00:00+00:00"));
        assert_same_fields(d.sub_delta(&back).unwrap(), dt("2017-03-02T00:00:00+00:00"));
    }

    #[test]
    fn test_out_of_range() {
        let d = dt("2999-12-31T00:00:00+00:00");
        assert!(matches!(
            d.add_delta(&Delta::days(1)),
            Err(CoreError::OutOfRange { .. })
        ));
        let d = dt("0001-01-01T00:00:00+00:00");
        assert!(d.sub_delta(&Delta::seconds(1)).is_err());
    }

    #[test]
    fn test_diff_simple() {
        let a = dt("2015-03-10T04:05:06+00:00");
        let b = dt("2017-05-13T08:10:12+00:00");
        let expected = Delta::years(2)
            + Delta::months(2)
            + Delta::days(3)
            + Delta::hours(4)
            + Delta::minutes(5)
            + Delta::seconds(6);
        assert_eq!(diff(&a, &b).unwrap(), expected);
        assert_eq!(diff(&b, &a).unwrap(), expected);
        assert_eq!(a.add_delta(&expected).unwrap(), b);
    }

    #[test]
    fn test_diff_normalizes_offsets() {
        let a = dt("2017-01-01T00:00:00+00:00");
        let b = dt("2017-01-01T05:00:00+05:00");
        assert_eq!(diff(&a, &b).unwrap(), Delta::ZERO);
    }

    #[test]
    fn test_diff_across_month_end() {
        let a = dt("2017-01-31T00:00:00+00:00");
        let b = dt("2017-03-01T00:00:00+00:00");
        let d = diff(&a, &b).unwrap();
        assert_eq!(d, Delta::months(1) + Delta::days(1));
        assert_eq!(a.add_delta(&d).unwrap(), b);
    }

    #[test]
    fn test_diff_is_not_exact_inverse_at_clamp() {
        // Jan 30 + 1 month clamps to Feb 28, but Feb 28 - 1 month is Jan 28.
        let a = dt("2017-01-30T00:00:00+00:00");
        let b = dt("2017-02-28T00:00:00+00:00");
        let d = diff(&a, &b).unwrap();
        assert_eq!(d, Delta::months(1));
        assert_eq!(a.add_delta(&d).unwrap(), b);
        assert_ne!(b.sub_delta(&d).unwrap(), a);
    }

    #[test]
    fn test_diff_at_the_edge_of_the_year_range() {
        let a = dt("0001-01-01T00:00:00+05:00");
        let b = dt("0001-01-02T00:00:00+05:00");
        assert_eq!(diff(&a, &b).unwrap(), Delta::days(1));

        let a = dt("2999-12-30T22:00:00-05:00");
        let b = dt("2999-12-31T23:30:00-05:00");
        assert_eq!(diff(&a, &b).unwrap(), Delta::days(1) + Delta::hours(1) + Delta::minutes(30));
    }

    #[test]
    fn test_decoded_overflowing_delta_is_out_of_range() {
        use crate::codec::BinaryLayout;

        let d = dt("2017-01-01T00:00:00+00:00");
        let raw = Delta {
            period: Period::ZERO,
            duration: Duration::new(i64::MAX / 1000, 0, 0, 0),
        };
        let decoded = Delta::from_bytes(&raw.to_bytes()).unwrap();
        assert!(matches!(d.add_delta(&decoded), Err(CoreError::OutOfRange { .. })));
        assert!(matches!(d.sub_delta(&decoded), Err(CoreError::OutOfRange { .. })));

        let huge = Delta {
            period: Period::new(i64::MAX, i64::MAX, i64::MAX),
            duration: Duration::ZERO,
        };
        assert!(matches!(d.add_delta(&huge), Err(CoreError::OutOfRange { .. })));
        assert!(matches!(d.sub_delta(&huge), Err(CoreError::OutOfRange { .. })));

        let summed = Delta::days(i64::MAX) + Delta::hours(24);
        assert!(matches!(d.add_delta(&summed), Err(CoreError::OutOfRange { .. })));
    }

    #[test]
    fn test_days_between() {
        let a = dt("2017-01-01T12:00:00+00:00");
        let b = dt("2017-01-03T11:59:59+00:00");
        assert_eq!(days_between(&a, &b), 1);
        assert_eq!(days_between(&b, &a), 1);
    }
}
