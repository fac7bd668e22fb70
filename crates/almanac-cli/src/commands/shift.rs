//! Datetime arithmetic commands: add, sub and diff.

use anyhow::Result;
use clap::Args;

use almanac_core::arithmetic::days_between;
use almanac_core::types::{Delta, Duration, Period};

use super::{parse_datetime, Context};
use crate::error::{CliError, CliResult};
use crate::output::{print_pairs, KeyValue};

/// Delta components given as flags.
#[derive(Args, Debug, Default)]
pub struct DeltaArgs {
    /// Years
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub years: i64,

    /// Months
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub months: i64,

    /// Days
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub days: i64,

    /// Hours
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub hours: i64,

    /// Minutes
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub minutes: i64,

    /// Seconds
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub seconds: i64,
}

impl DeltaArgs {
    /// Builds the canonical delta, rejecting an all-zero one.
    pub fn to_delta(&self) -> CliResult<Delta> {
        let delta = Delta::new(
            Period::new(self.years, self.months, self.days),
            Duration::new(self.hours, self.minutes, self.seconds, 0),
        );
        if delta.is_zero() {
            return Err(CliError::EmptyDelta);
        }
        Ok(delta)
    }
}

/// Arguments for the add and sub commands.
#[derive(Args, Debug)]
pub struct ShiftArgs {
    /// Datetime (ISO-8601) or date (YYYY-MM-DD, taken in the display offset)
    pub datetime: String,

    #[command(flatten)]
    pub delta: DeltaArgs,
}

/// Arguments for the diff command.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// First datetime
    pub from: String,

    /// Second datetime
    pub to: String,
}

/// Execute the add command.
pub fn execute_add(args: ShiftArgs, ctx: &Context) -> Result<()> {
    shift(args, ctx, false)
}

/// Execute the sub command.
pub fn execute_sub(args: ShiftArgs, ctx: &Context) -> Result<()> {
    shift(args, ctx, true)
}

fn shift(args: ShiftArgs, ctx: &Context, subtract: bool) -> Result<()> {
    let dt = parse_datetime(&args.datetime, ctx.config.display_offset_minutes)?;
    let delta = args.delta.to_delta()?;
    let result = if subtract {
        dt.sub_delta(&delta)?
    } else {
        dt.add_delta(&delta)?
    };

    let pairs = [
        KeyValue::new("From", dt),
        KeyValue::new(if subtract { "Minus" } else { "Plus" }, delta),
        KeyValue::new("Result", result),
        KeyValue::new("Weekday", result.weekday()),
    ];
    print_pairs("Datetime Arithmetic", &pairs, "Result", ctx.format)
}

/// Execute the diff command.
pub fn execute_diff(args: DiffArgs, ctx: &Context) -> Result<()> {
    let offset = ctx.config.display_offset_minutes;
    let from = parse_datetime(&args.from, offset)?;
    let to = parse_datetime(&args.to, offset)?;
    let delta = from.diff(&to)?;

    let pairs = [
        KeyValue::new("From", from),
        KeyValue::new("To", to),
        KeyValue::new("Delta", delta),
        KeyValue::new("Whole Days", days_between(&from, &to)),
        KeyValue::new("Seconds", from.seconds_until(&to)),
    ];
    print_pairs("Datetime Difference", &pairs, "Delta", ctx.format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_args() {
        let args = DeltaArgs {
            months: 1,
            hours: 30,
            ..DeltaArgs::default()
        };
        let delta = args.to_delta().unwrap();
        assert_eq!(delta, Delta::months(1) + Delta::days(1) + Delta::hours(6));
    }

    #[test]
    fn test_empty_delta_rejected() {
        assert!(matches!(
            DeltaArgs::default().to_delta(),
            Err(CliError::EmptyDelta)
        ));
    }
}
