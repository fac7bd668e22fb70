//! # Almanac Core
//!
//! Calendar arithmetic and holiday recurrence for financial date/time work.
//!
//! This crate provides:
//!
//! - **Types**: `Datetime` with a fixed UTC offset, `Period`, `Duration`, `Delta`,
//!   `Interval`, `Quarter`
//! - **Arithmetic**: calendar-correct add, subtract and difference with
//!   end-of-month clamping
//! - **Calendars**: declarative holiday rules, weekend observance and market
//!   holiday sets for business-day queries
//! - **Codec**: the fixed big-endian binary layout and JSON form
//!
//! ## Example
//!
//! ```rust
//! use almanac_core::prelude::*;
//!
//! let dt: Datetime = "2017-01-31T10:00:00+00:00".parse().unwrap();
//! let next = dt.add_delta(&Delta::months(1)).unwrap();
//! assert_eq!(next.to_string(), "2017-02-28T10:00:00+00:00");
//!
//! let us = Market::Us.holiday_set();
//! let memorial_day: Datetime = "2017-05-29T09:30:00-05:00".parse().unwrap();
//! assert!(us.is_holiday(&memorial_day));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]

pub mod arithmetic;
pub mod calendars;
pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{HolidaySet, JointHolidaySet, Market};
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::codec::BinaryLayout;
    pub use crate::config::AlmanacConfig;
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Datetime, Delta, Duration, Interval, Period, Quarter, Weekday};
}

pub use error::{CoreError, CoreResult};
