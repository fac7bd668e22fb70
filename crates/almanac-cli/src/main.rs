//! Almanac CLI - calendar arithmetic and market holidays.
//!
//! # Usage
//!
//! ```bash
//! # Observed US exchange holidays
//! almanac holidays 2017
//!
//! # Is a date a London business day?
//! almanac --market uk is-business 2017-08-28
//!
//! # Month-end aware arithmetic
//! almanac add 2017-01-31T10:00:00+00:00 --months 1
//!
//! # Calendar difference
//! almanac diff 2017-01-30 2017-02-28 --format json
//! ```

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use almanac_core::config::AlmanacConfig;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;
use error::CliError;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so piped output stays clean
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            AlmanacConfig::from_file(path)
                .map_err(|e| CliError::Config(e.to_string()))
                .with_context(|| format!("while loading {}", path.display()))?
        }
        None => AlmanacConfig::default(),
    };
    if let Some(market) = cli.market {
        config.market = market;
    }
    config.validate().map_err(CliError::from)?;

    let ctx = Context {
        config,
        format: cli.format,
    };

    match cli.command {
        Commands::Holidays(args) => commands::holidays::execute(args, &ctx)?,
        Commands::IsBusiness(args) => commands::business::execute_is_business(args, &ctx)?,
        Commands::NextBusiness(args) => commands::business::execute_next_business(args, &ctx)?,
        Commands::Add(args) => commands::shift::execute_add(args, &ctx)?,
        Commands::Sub(args) => commands::shift::execute_sub(args, &ctx)?,
        Commands::Diff(args) => commands::shift::execute_diff(args, &ctx)?,
        Commands::Quarter(args) => commands::quarter::execute(args, &ctx)?,
        Commands::Now(args) => commands::now::execute(args, &ctx)?,
    }

    Ok(())
}
