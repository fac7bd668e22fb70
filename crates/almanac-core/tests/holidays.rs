//! Holiday set behaviour through the public API.

use almanac_core::calendars::{
    easter_sunday, is_holiday, FixedHoliday, Holiday, HolidayRule, Observance, Occurrence,
};
use almanac_core::prelude::*;

fn dt(s: &str) -> Datetime {
    s.parse().unwrap()
}

fn keys(dates: &[Datetime]) -> Vec<(i32, u32, u32)> {
    dates.iter().map(Datetime::date_key).collect()
}

#[test]
fn us_2017_calendar() {
    let dates = Market::Us.holiday_set().holiday_dates(2017);
    assert_eq!(dates.len(), 9);
    assert_eq!(
        keys(&dates),
        vec![
            (2017, 1, 2),
            (2017, 1, 16),
            (2017, 2, 20),
            (2017, 4, 14),
            (2017, 5, 29),
            (2017, 7, 4),
            (2017, 9, 4),
            (2017, 11, 23),
            (2017, 12, 25),
        ]
    );
    assert!(dates.iter().all(|d| d.offset_minutes() == -300));
}

#[test]
fn uk_2017_calendar() {
    let dates = Market::Uk.holiday_set().holiday_dates(2017);
    assert_eq!(
        keys(&dates),
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
fn generated_dates_are_holidays() {
    for market in Market::ALL {
        let set = market.holiday_set();
        for year in 2000..=2040 {
            for date in set.holiday_dates(year) {
                assert!(set.is_holiday(&date), "{market} {date}");
                assert!(!set.is_business(&date));
            }
        }
    }
}

#[test]
fn saturday_new_year_is_not_moved_in_us() {
    // Jan 1, 2022 is a Saturday; the US set only moves a Sunday New Year.
    let us = Market::Us.holiday_set();
    let dates = us.holiday_dates(2022);
    assert_eq!(dates[0].date_key(), (2022, 1, 1));
    assert!(dates[0].is_weekend());
    assert!(dates[1..].iter().all(Datetime::is_weekday));
}

#[test]
fn business_day_walk_over_year_end() {
    let us = Market::Us.holiday_set();
    // Friday Dec 29, 2017 -> Tuesday Jan 2, 2018 (Jan 1 is a Monday holiday).
    let next = us.next_business_day(&dt("2017-12-29T16:00:00-05:00")).unwrap();
    assert_eq!(next.to_string(), "2018-01-02T16:00:00-05:00");
    let back = us.previous_business_day(&next).unwrap();
    assert_eq!(back.date_key(), (2017, 12, 29));
}

#[test]
fn business_days_in_a_year() {
    let us = Market::Us.holiday_set();
    let start = dt("2016-12-31T00:00:00-05:00");
    let end = dt("2017-12-31T00:00:00-05:00");
    // 260 weekdays in 2017, less 9 weekday holidays.
    assert_eq!(us.business_days_between(&start, &end).unwrap(), 251);
}

#[test]
fn add_business_days_matches_count() {
    let uk = Market::Uk.holiday_set();
    let start = dt("2017-04-12T09:00:00+00:00");
    let later = uk.add_business_days(&start, 3).unwrap();
    // Thu 13, then Tue 18 and Wed 19 after the Easter weekend.
    assert_eq!(later.date_key(), (2017, 4, 19));
    assert_eq!(uk.business_days_between(&start, &later).unwrap(), 3);
    assert_eq!(uk.add_business_days(&later, -3).unwrap(), start);
}

#[test]
fn custom_rule_list() {
    let easter = easter_sunday(2019).unwrap();
    assert_eq!(easter.to_string(), "2019-04-21");

    let holidays = vec![
        Holiday::Fixed(FixedHoliday::new(11, 11, Observance::PreviousFriday, 0)),
        Holiday::Rule(HolidayRule::new(10, Occurrence::Second, Weekday::Monday)),
    ];
    // Nov 11, 2018 is a Sunday, observed Friday Nov 9.
    assert!(is_holiday(&holidays, &dt("2018-11-09T12:00:00+00:00")));
    assert!(!is_holiday(&holidays, &dt("2018-11-12T12:00:00+00:00")));
    // Second Monday of October 2018 is Oct 8.
    assert!(is_holiday(&holidays, &dt("2018-10-08T12:00:00+00:00")));
}

#[test]
fn joint_calendar_from_config() {
    let config = AlmanacConfig::from_toml("market = \"uk\"").unwrap();
    let joint = JointHolidaySet::from_markets(&[config.market, Market::Us]);
    // Thanksgiving and the August bank holiday are both closed.
    assert!(joint.is_holiday(&dt("2017-11-23T12:00:00+00:00")));
    assert!(joint.is_holiday(&dt("2017-08-28T12:00:00+00:00")));
    assert!(joint.is_business(&dt("2017-11-24T12:00:00+00:00")));
}
