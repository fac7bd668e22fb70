//! Easter and the movable feasts anchored on it.

use chrono::{Datelike, Days, NaiveDate};

use super::rules::Holiday;
use crate::types::Datetime;

/// Calculate Easter Sunday using the Anonymous Gregorian algorithm.
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let (d, e) = (b / 4, b % 4);
    let g = (b - (b + 8) / 25 + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let (i, k) = (c / 4, c % 4);
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let n = h + l - 7 * m + 114;

    NaiveDate::from_ymd_opt(year, (n / 31) as u32, (n % 31 + 1) as u32)
}

/// Easter Sunday shifted by `days`, at midnight in `offset_minutes`.
pub fn easter_relative(year: i32, days: i64, offset_minutes: i32) -> Option<Datetime> {
    let easter = easter_sunday(year)?;
    let date = if days >= 0 {
        easter.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        easter.checked_sub_days(Days::new(days.unsigned_abs()))
    }?;
    Datetime::from_ymd(date.year(), date.month(), date.day(), offset_minutes).ok()
}

/// Good Friday of `year` as a materialized holiday entry.
pub fn good_friday(year: i32, offset_minutes: i32) -> Option<Holiday> {
    easter_relative(year, -2, offset_minutes).map(Holiday::Easter)
}

/// Easter Monday of `year` as a materialized holiday entry.
pub fn easter_monday(year: i32, offset_minutes: i32) -> Option<Holiday> {
    easter_relative(year, 1, offset_minutes).map(Holiday::Easter)
}
