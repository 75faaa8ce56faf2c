//! Calculate command - purchase suggestions for one company.

use std::path::PathBuf;

use colored::Colorize;
use restock::{Restock, RestockConfig};

use super::output::{money, warn_unmatched, write_table};
use crate::cli::OutputArgs;
use crate::manifest::describe_params;

/// Files for a single-company calculation.
pub struct Inputs {
    pub fulfillment: PathBuf,
    pub physical: PathBuf,
    pub sales: PathBuf,
    pub workbook: PathBuf,
    pub company: Option<String>,
}

pub fn run(
    inputs: Inputs,
    config: RestockConfig,
    output: OutputArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for path in [&inputs.fulfillment, &inputs.physical, &inputs.sales] {
        if !path.exists() {
            return Err(format!("File not found: {}", path.display()).into());
        }
    }
    if !inputs.workbook.is_dir() {
        return Err(format!("Workbook directory not found: {}", inputs.workbook.display()).into());
    }

    config.validate()?;
    eprintln!(
        "{} {}",
        "Calculating".cyan().bold(),
        describe_params(&config.params).white()
    );

    let restock = Restock::with_config(config);
    let catalog = restock.build_catalog(&restock.load_workbook(&inputs.workbook)?)?;
    let company = restock.load_company(
        inputs.company.unwrap_or_default(),
        &inputs.fulfillment,
        &inputs.physical,
        &inputs.sales,
    )?;

    let report = restock.calculate(&company, &catalog)?;
    warn_unmatched("the reports", &report.diagnostics.unmatched_skus(), verbose);

    write_table(&report.rows, output.format, output.output.as_deref())?;

    let to_buy = report.to_buy().count();
    eprintln!(
        "{} {} of {} SKUs, {} units, {}",
        "To buy:".green().bold(),
        to_buy.to_string().white().bold(),
        report.len(),
        report.total_units(),
        money(report.total_value())
    );

    Ok(())
}
