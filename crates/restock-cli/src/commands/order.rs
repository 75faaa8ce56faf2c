//! Order command - draft a numbered purchase order for one supplier.

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use colored::Colorize;
use restock::RestockConfig;
use restock::planning::{PurchaseDraft, PurchaseOrder};

use super::consolidate::load_report;
use super::output::money;

/// Hand edits applied to the draft before it is numbered.
#[derive(Debug, Clone, Default)]
pub struct Edits {
    /// `SKU@COMPANY=QTY`
    pub set: Vec<String>,
    /// `SKU=QTY`
    pub add: Vec<String>,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    manifest: PathBuf,
    supplier: String,
    company: Option<String>,
    date: Option<NaiveDate>,
    sequence: u32,
    edits: Edits,
    output: Option<PathBuf>,
    config: RestockConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = load_report(&manifest, config, false)?;

    let mut draft = PurchaseDraft::from_report(&report, &supplier, company.as_deref());
    if draft.is_empty() && edits.add.is_empty() {
        eprintln!(
            "{} Nothing to buy from {}.",
            "Warning:".yellow().bold(),
            supplier
        );
        let known = report.suppliers();
        if !known.contains(&supplier.as_str()) {
            eprintln!("Known suppliers: {}", known.join(", ").cyan());
        }
    }

    apply_edits(&mut draft, &edits)?;

    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let order = draft.finalize(date, sequence);
    let json = serde_json::to_string_pretty(&order)?;

    match output {
        Some(path) => {
            fs::write(&path, format!("{json}\n"))
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
            print_summary(&order);
            eprintln!("Saved to: {}", path.display().to_string().cyan());
        }
        None => {
            println!("{json}");
            print_summary(&order);
        }
    }

    Ok(())
}

fn apply_edits(draft: &mut PurchaseDraft, edits: &Edits) -> Result<(), Box<dyn std::error::Error>> {
    for edit in &edits.set {
        let (target, quantity) = split_quantity(edit)?;
        let (sku, company) = target
            .split_once('@')
            .ok_or_else(|| format!("Expected SKU@COMPANY=QTY, got '{}'", edit))?;
        draft.adjust(sku, company.trim(), quantity)?;
    }
    for edit in &edits.add {
        let (sku, quantity) = split_quantity(edit)?;
        draft.add_manual(sku, quantity)?;
    }
    Ok(())
}

fn split_quantity(edit: &str) -> Result<(&str, i64), String> {
    let (target, quantity) = edit
        .rsplit_once('=')
        .ok_or_else(|| format!("Expected <item>=QTY, got '{}'", edit))?;
    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("Invalid quantity in '{}'", edit))?;
    Ok((target, quantity))
}

fn print_summary(order: &PurchaseOrder) {
    eprintln!(
        "{} {}: {} items, {} units, {}",
        "Order".green().bold(),
        order.number.white().bold(),
        order.items.len(),
        order.total_units,
        money(order.total_value)
    );
}
