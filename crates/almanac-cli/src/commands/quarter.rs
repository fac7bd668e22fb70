//! Quarter command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use almanac_core::types::{within, Datetime, Quarter};

use super::{parse_datetime, Context};
use crate::cli::OutputFormat;
use crate::output::{print_output, print_pairs, KeyValue};

/// Arguments for the quarter command.
#[derive(Args, Debug)]
pub struct QuarterArgs {
    /// Calendar year
    pub year: i32,

    /// Quarter number (1-4); all four when omitted
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub quarter: Option<u8>,

    /// Report whether this datetime falls inside the quarter
    #[arg(long, requires = "quarter")]
    pub contains: Option<String>,
}

/// Bounds of one quarter.
#[derive(Debug, Serialize, Tabled)]
pub struct QuarterRow {
    #[tabled(rename = "Quarter")]
    pub quarter: Quarter,
    #[tabled(rename = "Start")]
    pub start: Datetime,
    #[tabled(rename = "Stop")]
    pub stop: Datetime,
}

/// Execute the quarter command.
pub fn execute(args: QuarterArgs, ctx: &Context) -> Result<()> {
    ctx.check_year(args.year)?;
    let offset = ctx.config.display_offset_minutes;

    let quarters: Vec<Quarter> = match args.quarter {
        Some(n) => vec![Quarter::ALL[usize::from(n) - 1]],
        None => Quarter::ALL.to_vec(),
    };

    if let (Some(text), [quarter]) = (&args.contains, quarters.as_slice()) {
        let dt = parse_datetime(text, offset)?;
        let interval = quarter.interval(args.year, offset)?;
        let pairs = [
            KeyValue::new("Quarter", format!("{} {}", quarter, args.year)),
            KeyValue::new("Start", interval.start),
            KeyValue::new("Stop", interval.stop),
            KeyValue::new("Datetime", dt),
            KeyValue::new("Within", within(&dt, &interval)),
        ];
        return print_pairs("Quarter Check", &pairs, "Within", ctx.format);
    }

    let rows = quarters
        .into_iter()
        .map(|quarter| {
            let interval = quarter.interval(args.year, offset)?;
            Ok(QuarterRow {
                quarter,
                start: interval.start,
                stop: interval.stop,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if ctx.format == OutputFormat::Table {
        println!("Quarters of {}", args.year);
    }
    print_output(&rows, ctx.format)
}
