//! Allocate command - split received stock between companies.

use std::path::PathBuf;

use colored::Colorize;
use restock::RestockConfig;
use restock::planning::{AllocationShare, allocate};

use super::consolidate::load_report;

pub fn run(
    manifest: PathBuf,
    sku: String,
    quantity: i64,
    json: bool,
    config: RestockConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = load_report(&manifest, config, false)?;
    let shares = allocate(&report, &sku, quantity)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&shares)?);
        return Ok(());
    }

    println!(
        "{} {} units of {}",
        "Allocating".cyan().bold(),
        quantity.to_string().white().bold(),
        sku.trim().to_uppercase().white()
    );
    println!();
    print!("{}", render_shares(&shares));

    Ok(())
}

fn render_shares(shares: &[AllocationShare]) -> String {
    let mut out = format!(
        "  {:20} {:>10} {:>8} {:>10}\n",
        "Company", "Sales 60d", "Share", "Quantity"
    );
    for share in shares {
        out.push_str(&format!(
            "  {:20} {:>10} {:>7.1}% {:>10}\n",
            share.company,
            share.sales_60d,
            share.share * 100.0,
            share.quantity
        ));
    }
    out
}
