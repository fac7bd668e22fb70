//! UK bank holidays (England and Wales).

use super::easter::{easter_monday, good_friday};
use super::rules::{FixedHoliday, Holiday, HolidayRule, Observance, Occurrence};
use super::HolidaySet;
use crate::types::Weekday;

/// UK exchange holiday set.
///
/// Includes:
/// - New Year's Day (substitute Monday)
/// - Good Friday and Easter Monday
/// - Early May, Spring and Summer bank holidays
/// - Christmas Day and Boxing Day (substitute Monday/Tuesday)
///
/// One-off proclamations (jubilees, state funerals, moved bank holidays) are
/// not part of the recurring schedule.
#[derive(Debug, Clone, Copy, Default)]
pub struct UkExchange;

impl HolidaySet for UkExchange {
    fn name(&self) -> &str {
        "UK Exchange"
    }

    fn zone_offset(&self) -> i32 {
        0
    }

    fn holidays(&self, year: i32) -> Vec<Holiday> {
        let fixed =
            |day, month, observance| Holiday::Fixed(FixedHoliday::new(day, month, observance, 0));
        let last_monday = |month| {
            Holiday::Rule(HolidayRule::new(month, Occurrence::Last, Weekday::Monday))
        };

        let mut holidays = vec![
            fixed(1, 1, Observance::NextMonday),
            Holiday::Rule(HolidayRule::new(5, Occurrence::First, Weekday::Monday)),
            last_monday(5),
            last_monday(8),
            fixed(25, 12, Observance::NextMonday),
            fixed(26, 12, Observance::NextMondayOrTuesday),
        ];
        holidays.extend(good_friday(year, 0));
        holidays.extend(easter_monday(year, 0));
        holidays
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Datetime;

    fn dt(s: &str) -> Datetime {
        s.parse().unwrap()
    }

    #[test]
    fn test_uk_2017_holidays() {
        let dates: Vec<_> = UkExchange
            .holiday_dates(2017)
            .iter()
            .map(Datetime::date_key)
            .collect();
        assert_eq!(
            dates,
            vec![
                (2017, 1, 2),
                (2017, 4, 14),
                (2017, 4, 17),
                (2017, 5, 1),
                (2017, 5, 29),
                (2017, 8, 28),
                (2017, 12, 25),
                (2017, 12, 26),
            ]
        );
    }

    #[test]
    fn test_uk_new_years_substitute() {
        // 2028: Jan 1 is Saturday, substitute is Monday Jan 3
        assert!(UkExchange.is_holiday(&dt("2028-01-03T09:00:00+00:00")));
        assert!(!UkExchange.is_business(&dt("2028-01-01T09:00:00+00:00")));
        assert!(!UkExchange.is_holiday(&dt("2028-01-01T09:00:00+00:00")));
    }

    #[test]
    fn test_uk_christmas_substitute() {
        // 2027: Christmas on Saturday, Boxing Day on Sunday
        // Substitutes are Dec 27 (Mon) and Dec 28 (Tue)
        assert!(UkExchange.is_holiday(&dt("2027-12-27T09:00:00+00:00")));
        assert!(UkExchange.is_holiday(&dt("2027-12-28T09:00:00+00:00")));
        assert!(UkExchange.is_business(&dt("2027-12-29T09:00:00+00:00")));
    }

    #[test]
    fn test_uk_boxing_day_on_monday() {
        // 2022: Christmas on Sunday moves to Monday 26, Boxing Day to Tuesday 27.
        let dates: Vec<_> = UkExchange
            .holiday_dates(2022)
            .iter()
            .map(Datetime::date_key)
            .filter(|(_, month, _)| *month == 12)
            .collect();
        assert_eq!(dates, vec![(2022, 12, 26), (2022, 12, 27)]);
    }

    #[test]
    fn test_uk_easter() {
        // 2025: Good Friday is April 18, Easter Monday April 21
        assert!(UkExchange.is_holiday(&dt("2025-04-18T09:00:00+00:00")));
        assert!(UkExchange.is_holiday(&dt("2025-04-21T09:00:00+00:00")));
        assert!(UkExchange.is_business(&dt("2025-04-22T09:00:00+00:00")));
    }

    #[test]
    fn test_uk_bank_holidays_2025() {
        // Early May: May 5, Spring: May 26, Summer: Aug 25
        for day in ["2025-05-05", "2025-05-26", "2025-08-25"] {
            let d = dt(&format!("{day}T09:00:00+00:00"));
            assert!(UkExchange.is_holiday(&d), "{day}");
        }
    }
}
