//! CLI argument definitions.

use std::path::PathBuf;

use almanac_core::calendars::Market;
use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    DiffArgs, HolidaysArgs, IsBusinessArgs, NextBusinessArgs, NowArgs, QuarterArgs, ShiftArgs,
};

/// Almanac - calendar arithmetic and market holidays
#[derive(Parser)]
#[command(name = "almanac")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (TOML, or JSON by extension)
    #[arg(short, long, env = "ALMANAC_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Market holiday set (us, uk); overrides the configuration file
    #[arg(short, long, global = true)]
    pub market: Option<Market>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the observed holidays of a year
    Holidays(HolidaysArgs),

    /// Check whether a datetime is a business day
    IsBusiness(IsBusinessArgs),

    /// Step to the next (or previous) business day
    NextBusiness(NextBusinessArgs),

    /// Add a delta to a datetime
    Add(ShiftArgs),

    /// Subtract a delta from a datetime
    Sub(ShiftArgs),

    /// Calendar difference between two datetimes
    Diff(DiffArgs),

    /// Show the bounds of a fiscal quarter
    Quarter(QuarterArgs),

    /// Show the current datetime
    Now(NowArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
