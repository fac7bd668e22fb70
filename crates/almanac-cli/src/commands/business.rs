//! Business day commands.

use anyhow::Result;
use clap::Args;

use super::{parse_datetime, Context};
use crate::output::{print_pairs, KeyValue};

/// Arguments for the is-business command.
#[derive(Args, Debug)]
pub struct IsBusinessArgs {
    /// Datetime (ISO-8601) or date (YYYY-MM-DD, taken in the market's offset)
    pub datetime: String,
}

/// Arguments for the next-business command.
#[derive(Args, Debug)]
pub struct NextBusinessArgs {
    /// Datetime (ISO-8601) or date (YYYY-MM-DD, taken in the market's offset)
    pub datetime: String,

    /// Number of business days to step
    #[arg(short = 'n', long, default_value = "1")]
    pub count: u32,

    /// Step backwards instead
    #[arg(short, long)]
    pub previous: bool,
}

/// Execute the is-business command.
pub fn execute_is_business(args: IsBusinessArgs, ctx: &Context) -> Result<()> {
    let set = ctx.holiday_set();
    let dt = parse_datetime(&args.datetime, set.zone_offset())?;

    let pairs = [
        KeyValue::new("Datetime", dt),
        KeyValue::new("Weekday", dt.weekday()),
        KeyValue::new("Market", ctx.market()),
        KeyValue::new("Holiday", set.is_holiday(&dt)),
        KeyValue::new("Business Day", set.is_business(&dt)),
    ];
    print_pairs("Business Day Check", &pairs, "Business Day", ctx.format)
}

/// Execute the next-business command.
pub fn execute_next_business(args: NextBusinessArgs, ctx: &Context) -> Result<()> {
    let set = ctx.holiday_set();
    let dt = parse_datetime(&args.datetime, set.zone_offset())?;

    let steps = i64::from(args.count);
    let result = match (args.previous, args.count) {
        (false, 1) => set.next_business_day(&dt)?,
        (true, 1) => set.previous_business_day(&dt)?,
        (false, _) => set.add_business_days(&dt, steps)?,
        (true, _) => set.add_business_days(&dt, -steps)?,
    };

    let pairs = [
        KeyValue::new("From", dt),
        KeyValue::new("Market", ctx.market()),
        KeyValue::new("Steps", if args.previous { -steps } else { steps }),
        KeyValue::new("Result", result),
        KeyValue::new("Weekday", result.weekday()),
    ];
    print_pairs("Business Day Step", &pairs, "Result", ctx.format)
}
