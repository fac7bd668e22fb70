//! Output formatting utilities.

use std::collections::BTreeMap;

use colored::Colorize;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints rows based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints key-value results.
///
/// JSON output is a single object; minimal output is the value of `primary`.
pub fn print_pairs(
    title: &str,
    pairs: &[KeyValue],
    primary: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            print_header(title);
            print_table(pairs)
        }
        OutputFormat::Json => {
            let object: BTreeMap<&str, &str> = pairs
                .iter()
                .map(|kv| (kv.key.as_str(), kv.value.as_str()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&object)?);
            Ok(())
        }
        OutputFormat::Csv => print_csv(pairs),
        OutputFormat::Minimal => {
            if let Some(kv) = pairs.iter().find(|kv| kv.key == primary) {
                println!("{}", kv.value);
            }
            Ok(())
        }
    }
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints minimal output, one line per row with the first column only.
fn print_minimal<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    for item in data {
        if let Some(first) = item.fields().first() {
            println!("{first}");
        }
    }
    Ok(())
}

/// Prints a header for a section.
fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Field")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl ToString) -> Self {
        Self {
            key: key.into(),
            value: value.to_string(),
        }
    }
}
