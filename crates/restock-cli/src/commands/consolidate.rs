//! Consolidate command - one table for every company of a manifest.

use std::path::{Path, PathBuf};

use colored::Colorize;
use restock::planning::{ConsolidatedReport, ReportFilter};
use restock::{Restock, RestockConfig};

use super::output::{money, warn_unmatched, write_table};
use crate::cli::OutputArgs;
use crate::manifest::{Manifest, describe_params};

pub fn run(
    manifest: PathBuf,
    supplier: Option<String>,
    company: Option<String>,
    sku: Option<String>,
    config: RestockConfig,
    output: OutputArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = load_report(&manifest, config, verbose)?;

    let filter = ReportFilter {
        supplier,
        company,
        sku_query: sku,
    };
    let rows = report.filter(&filter);
    write_table(&rows, output.format, output.output.as_deref())?;

    let units: i64 = rows.iter().map(|r| r.suggested_purchase).sum();
    let value: f64 = rows.iter().map(|r| r.purchase_value).sum();
    eprintln!(
        "{} {} rows, {} units, {}",
        "Total:".green().bold(),
        rows.len().to_string().white().bold(),
        units,
        money(value)
    );
    if verbose {
        eprintln!("{} {}", "Suppliers:".yellow().bold(), report.suppliers().join(", "));
    }

    Ok(())
}

/// Load a manifest and run the calculation for each company.
pub fn load_report(
    manifest: &Path,
    config: RestockConfig,
    verbose: bool,
) -> Result<ConsolidatedReport, Box<dyn std::error::Error>> {
    if !manifest.exists() {
        return Err(format!("Manifest not found: {}", manifest.display()).into());
    }
    config.validate()?;

    let manifest = Manifest::load(manifest)?;
    eprintln!(
        "{} {} companies ({})",
        "Consolidating".cyan().bold(),
        manifest.companies.len().to_string().white().bold(),
        describe_params(&config.params)
    );

    let restock = Restock::with_config(config);
    let (catalog, companies) = manifest.load_inputs(&restock)?;
    let report = restock.consolidate(&companies, &catalog)?;

    for (company, diagnostics) in &report.diagnostics {
        warn_unmatched(company, &diagnostics.unmatched_skus(), verbose);
    }
    Ok(report)
}
