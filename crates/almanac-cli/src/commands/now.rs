//! Now command implementation.

use anyhow::Result;
use clap::Args;

use almanac_core::clock::{Clock, FixedClock, SystemClock};
use almanac_core::types::Datetime;

use super::Context;
use crate::output::{print_pairs, KeyValue};

/// Arguments for the now command.
#[derive(Args, Debug)]
pub struct NowArgs {
    /// UTC offset in minutes; defaults to the configured display offset
    #[arg(long, allow_negative_numbers = true)]
    pub offset: Option<i32>,

    /// Use this Unix timestamp instead of the system clock
    #[arg(long, env = "ALMANAC_NOW", allow_negative_numbers = true)]
    pub at: Option<i64>,
}

/// Execute the now command.
pub fn execute(args: NowArgs, ctx: &Context) -> Result<()> {
    let offset = args.offset.unwrap_or(ctx.config.display_offset_minutes);
    let clock: Box<dyn Clock> = match args.at {
        Some(instant) => Box::new(FixedClock::new(instant)),
        None => Box::new(SystemClock),
    };
    let now = Datetime::now(clock.as_ref(), offset)?;
    let set = ctx.holiday_set();

    let pairs = [
        KeyValue::new("Now", now),
        KeyValue::new("Unix", now.instant()),
        KeyValue::new("Weekday", now.weekday()),
        KeyValue::new("Market", ctx.market()),
        KeyValue::new("Business Day", set.is_business(&now)),
    ];
    print_pairs("Current Time", &pairs, "Now", ctx.format)
}
