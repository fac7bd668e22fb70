//! CLI command implementations.

pub mod business;
pub mod holidays;
pub mod now;
pub mod quarter;
pub mod shift;

pub use business::{IsBusinessArgs, NextBusinessArgs};
pub use holidays::HolidaysArgs;
pub use now::NowArgs;
pub use quarter::QuarterArgs;
pub use shift::{DiffArgs, ShiftArgs};

use almanac_core::calendars::{HolidaySet, Market};
use almanac_core::config::AlmanacConfig;
use almanac_core::types::Datetime;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Settings resolved from the configuration file and global flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration.
    pub config: AlmanacConfig,
    /// Output format.
    pub format: OutputFormat,
}

impl Context {
    /// The holiday set of the configured market.
    pub fn holiday_set(&self) -> &'static dyn HolidaySet {
        self.market().holiday_set()
    }

    /// The configured market.
    pub fn market(&self) -> Market {
        self.config.market
    }

    /// Rejects years outside the configured window.
    pub fn check_year(&self, year: i32) -> CliResult<()> {
        self.config
            .check_year(year)
            .map_err(|_| CliError::YearOutOfWindow {
                year,
                first: self.config.first_year,
                last: self.config.last_year,
            })
    }
}

/// Parses an ISO-8601 datetime, or a bare `YYYY-MM-DD` taken as midnight at
/// `offset_minutes`.
pub fn parse_datetime(s: &str, offset_minutes: i32) -> CliResult<Datetime> {
    if let Ok(dt) = s.parse::<Datetime>() {
        return Ok(dt);
    }
    let invalid = || CliError::InvalidDatetime(s.to_string());
    let mut parts = s.splitn(3, '-');
    let (Some(y), Some(m), Some(d)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    let year = y.parse().map_err(|_| invalid())?;
    let month = m.parse().map_err(|_| invalid())?;
    let day = d.parse().map_err(|_| invalid())?;
    Datetime::from_ymd(year, month, day, offset_minutes).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_datetime() {
        let dt = parse_datetime("2014-04-05T17:25:04+05:00", 0).unwrap();
        assert_eq!(dt.offset_minutes(), 300);
    }

    #[test]
    fn test_parse_bare_date() {
        let dt = parse_datetime("2017-07-04", -300).unwrap();
        assert_eq!(dt.to_string(), "2017-07-04T00:00:00-05:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_datetime("2017-02-30", 0).is_err());
        assert!(parse_datetime("yesterday", 0).is_err());
        assert!(parse_datetime("2017-07", 0).is_err());
    }
}
