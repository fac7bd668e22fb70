//! US exchange holidays (NYSE schedule).

use super::easter::good_friday;
use super::rules::{FixedHoliday, Holiday, HolidayRule, Observance, Occurrence};
use super::HolidaySet;
use crate::types::Weekday;

/// Eastern Standard Time; the set has no daylight saving.
const EASTERN_OFFSET: i32 = -300;

/// US exchange holiday set.
///
/// Covers the NYSE full-day closures: New Year's Day, Martin Luther King Jr.
/// Day, Washington's Birthday, Good Friday, Memorial Day, Juneteenth (from
/// 2022), Independence Day, Labor Day, Thanksgiving and Christmas.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsExchange;

impl HolidaySet for UsExchange {
    fn name(&self) -> &str {
        "US Exchange"
    }

    fn zone_offset(&self) -> i32 {
        EASTERN_OFFSET
    }

    fn holidays(&self, year: i32) -> Vec<Holiday> {
        let fixed = |day, month, observance| {
            Holiday::Fixed(FixedHoliday::new(day, month, observance, EASTERN_OFFSET))
        };
        let rule = |month, occurrence, weekday| {
            Holiday::Rule(HolidayRule::new(month, occurrence, weekday))
        };

        let mut holidays = vec![
            fixed(1, 1, Observance::SundayToMonday),
            rule(1, Occurrence::Third, Weekday::Monday),
            rule(2, Occurrence::Third, Weekday::Monday),
            rule(5, Occurrence::Last, Weekday::Monday),
            fixed(4, 7, Observance::NearestWorkday),
            rule(9, Occurrence::First, Weekday::Monday),
            rule(11, Occurrence::Fourth, Weekday::Thursday),
            fixed(25, 12, Observance::NearestWorkday),
        ];
        if year >= 2022 {
            holidays.push(fixed(19, 6, Observance::NearestWorkday));
        }
        holidays.extend(good_friday(year, EASTERN_OFFSET));
        holidays
    }
}
