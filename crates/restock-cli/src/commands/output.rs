//! Table output shared by the commands.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use colored::Colorize;
use restock::Sku;
use restock::calculation::write_delimited;
use serde::Serialize;

use crate::cli::OutputFormat;

/// Unmatched SKUs listed before the rest is summarized.
const MAX_LISTED_SKUS: usize = 10;

/// Write `rows` to `output`, or to stdout when no path is given.
pub fn write_table<T: Serialize>(
    rows: &[T],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
            write_rows(rows, format, BufWriter::new(file))?;
            eprintln!(
                "{} {} rows to {}",
                "Wrote".green().bold(),
                rows.len(),
                path.display().to_string().cyan()
            );
        }
        None => write_rows(rows, format, io::stdout().lock())?,
    }
    Ok(())
}

pub fn write_rows<T: Serialize, W: Write>(
    rows: &[T],
    format: OutputFormat,
    mut writer: W,
) -> Result<(), Box<dyn std::error::Error>> {
    match format.delimiter() {
        Some(delimiter) => write_delimited(rows, &mut writer, delimiter)?,
        None => {
            serde_json::to_writer_pretty(&mut writer, rows)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Warn on stderr about report SKUs missing from the catalog.
pub fn warn_unmatched(label: &str, skus: &[Sku], verbose: bool) {
    if skus.is_empty() {
        return;
    }
    eprintln!(
        "{} {} SKU(s) in {} are not in the catalog and were ignored",
        "Warning:".yellow().bold(),
        skus.len(),
        label
    );
    let listed = if verbose { skus.len() } else { MAX_LISTED_SKUS };
    for sku in skus.iter().take(listed) {
        eprintln!("  {}", sku.as_str().dimmed());
    }
    if skus.len() > listed {
        eprintln!("  ... and {} more (use --verbose to list all)", skus.len() - listed);
    }
}

/// Format a money value with two decimals.
pub fn money(value: f64) -> String {
    format!("{:.2}", value)
}
