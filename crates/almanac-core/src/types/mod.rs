//! Value types for calendar arithmetic.
//!
//! - [`Datetime`]: civil datetime with a fixed UTC offset
//! - [`Weekday`]: day of week, 0 = Sunday
//! - [`Period`]: years, months and days, never cross-normalized
//! - [`Duration`]: hours, minutes, seconds and nanoseconds below one day
//! - [`Delta`]: a period plus a duration
//! - [`Interval`]: inclusive datetime range
//! - [`Quarter`]: fiscal quarter

pub(crate) mod datetime;
mod delta;
mod duration;
mod interval;
mod period;
mod weekday;

pub use datetime::{
    days_in_month, is_leap_year, Datetime, DatetimeFields, MAX_OFFSET_MINUTES, MAX_YEAR, MIN_YEAR,
};
pub use delta::Delta;
pub use duration::Duration;
pub use interval::{within, Interval, Quarter};
pub use period::Period;
pub use weekday::Weekday;
