//! The purchase-recommendation table and its writers.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::kits::ExpansionDiagnostics;
use crate::normalize::Sku;

/// One purchase recommendation, per component SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositionRow {
    pub sku: Sku,
    pub supplier: String,
    pub total_sales_60d: i64,
    pub fulfillment_sales_60d: i64,
    pub direct_sales_60d: i64,
    pub fulfillment_stock: i64,
    pub in_transit: i64,
    pub physical_stock: i64,
    pub unit_cost: f64,
    pub fulfillment_need: i64,
    pub physical_slack: i64,
    pub suggested_purchase: i64,
    pub purchase_value: f64,
}

/// Diagnostics of the three expansions run by a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDiagnostics {
    pub fulfillment_sales: ExpansionDiagnostics,
    pub direct_sales: ExpansionDiagnostics,
    pub fulfillment_need: ExpansionDiagnostics,
}

impl ReportDiagnostics {
    /// Distinct outer SKUs that matched nothing, across all expansions.
    pub fn unmatched_skus(&self) -> Vec<Sku> {
        let mut skus: Vec<Sku> = [
            &self.fulfillment_sales,
            &self.direct_sales,
            &self.fulfillment_need,
        ]
        .iter()
        .flat_map(|d| d.unmatched_skus.iter().cloned())
        .collect();
        skus.sort();
        skus.dedup();
        skus
    }
}

/// Rows in catalog order plus the expansion diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositionReport {
    pub rows: Vec<RepositionRow>,
    pub diagnostics: ReportDiagnostics,
}

impl RepositionReport {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, sku: &Sku) -> Option<&RepositionRow> {
        self.rows.iter().find(|r| &r.sku == sku)
    }

    /// Rows with something to buy.
    pub fn to_buy(&self) -> impl Iterator<Item = &RepositionRow> {
        self.rows.iter().filter(|r| r.suggested_purchase > 0)
    }

    pub fn total_units(&self) -> i64 {
        self.rows.iter().map(|r| r.suggested_purchase).sum()
    }

    pub fn total_value(&self) -> f64 {
        round_cents(self.rows.iter().map(|r| r.purchase_value).sum())
    }

    /// Write the rows as delimited text with a header line.
    pub fn write_csv<W: Write>(&self, writer: W, delimiter: u8) -> Result<()> {
        write_delimited(&self.rows, writer, delimiter)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Serialize records as delimited text, one header line from the field names.
pub fn write_delimited<T: Serialize, W: Write>(
    records: &[T],
    writer: W,
    delimiter: u8,
) -> Result<()> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);
    for record in records {
        out.serialize(record)?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Round to cents, halves to even.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
