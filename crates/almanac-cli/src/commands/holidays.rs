//! Holidays command implementation.
//!
//! Lists a market's observed holidays for one year.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use almanac_core::types::Datetime;

use super::Context;
use crate::cli::OutputFormat;
use crate::output::print_output;

/// Arguments for the holidays command.
#[derive(Args, Debug)]
pub struct HolidaysArgs {
    /// Calendar year
    pub year: i32,
}

/// One observed holiday.
#[derive(Debug, Serialize, Tabled)]
pub struct HolidayRow {
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Weekday")]
    pub weekday: String,
    #[tabled(rename = "Datetime")]
    pub datetime: Datetime,
}

impl From<Datetime> for HolidayRow {
    fn from(dt: Datetime) -> Self {
        let (year, month, day) = dt.date_key();
        Self {
            date: format!("{year:04}-{month:02}-{day:02}"),
            weekday: dt.weekday().to_string(),
            datetime: dt,
        }
    }
}

/// Execute the holidays command.
pub fn execute(args: HolidaysArgs, ctx: &Context) -> Result<()> {
    ctx.check_year(args.year)?;
    let set = ctx.holiday_set();
    let rows: Vec<HolidayRow> = set
        .holiday_dates(args.year)
        .into_iter()
        .map(HolidayRow::from)
        .collect();
    debug!(market = %ctx.market(), year = args.year, count = rows.len(), "listed holidays");

    if ctx.format == OutputFormat::Table {
        println!("{} holidays in {}", set.name(), args.year);
    }
    print_output(&rows, ctx.format)
}
