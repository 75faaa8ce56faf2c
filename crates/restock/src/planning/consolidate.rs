//! Multi-company consolidation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::info;

use crate::calculation::{
    ReplenishmentParams, ReportDiagnostics, RepositionCalculator, RepositionRow, write_delimited,
};
use crate::catalog::Catalog;
use crate::error::{RestockError, Result};
use crate::input::DataTable;
use crate::normalize::Sku;

use super::filter::ReportFilter;

/// The three raw reports of one company.
#[derive(Debug, Clone, Default)]
pub struct CompanyInputs {
    pub name: String,
    pub fulfillment: DataTable,
    pub physical: DataTable,
    pub direct_sales: DataTable,
}

impl CompanyInputs {
    pub fn new(
        name: impl Into<String>,
        fulfillment: DataTable,
        physical: DataTable,
        direct_sales: DataTable,
    ) -> Self {
        Self {
            name: name.into(),
            fulfillment,
            physical,
            direct_sales,
        }
    }
}

/// A reposition row tagged with its company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRow {
    pub company: String,
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

impl CompanyRow {
    pub fn new(company: impl Into<String>, row: RepositionRow) -> Self {
        Self {
            company: company.into(),
            sku: row.sku,
            supplier: row.supplier,
            total_sales_60d: row.total_sales_60d,
            fulfillment_sales_60d: row.fulfillment_sales_60d,
            direct_sales_60d: row.direct_sales_60d,
            fulfillment_stock: row.fulfillment_stock,
            in_transit: row.in_transit,
            physical_stock: row.physical_stock,
            unit_cost: row.unit_cost,
            fulfillment_need: row.fulfillment_need,
            physical_slack: row.physical_slack,
            suggested_purchase: row.suggested_purchase,
            purchase_value: row.purchase_value,
        }
    }
}

/// Rows of every company, in input order, plus per-company diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedReport {
    pub rows: Vec<CompanyRow>,
    pub diagnostics: IndexMap<String, ReportDiagnostics>,
}

impl ConsolidatedReport {
    /// Company names in input order, including companies with no rows.
    pub fn companies(&self) -> impl Iterator<Item = &str> {
        self.diagnostics.keys().map(|k| k.as_str())
    }

    /// Distinct non-empty suppliers, sorted.
    pub fn suppliers(&self) -> Vec<&str> {
        let mut suppliers: Vec<&str> = self
            .rows
            .iter()
            .map(|r| r.supplier.as_str())
            .filter(|s| !s.is_empty())
            .collect();
        suppliers.sort_unstable();
        suppliers.dedup();
        suppliers
    }

    pub fn filter(&self, filter: &ReportFilter) -> Vec<&CompanyRow> {
        filter.apply(&self.rows)
    }

    pub fn write_csv<W: Write>(&self, writer: W, delimiter: u8) -> Result<()> {
        write_delimited(&self.rows, writer, delimiter)
    }
}

/// Run the calculation for every company against one catalog.
pub fn consolidate(
    companies: &[CompanyInputs],
    catalog: &Catalog,
    params: &ReplenishmentParams,
) -> Result<ConsolidatedReport> {
    consolidate_with(companies, catalog, &RepositionCalculator::new(*params))
}

/// Like [`consolidate`], with a configured calculator.
pub fn consolidate_with(
    companies: &[CompanyInputs],
    catalog: &Catalog,
    calculator: &RepositionCalculator,
) -> Result<ConsolidatedReport> {
    let mut consolidated = ConsolidatedReport::default();

    for company in companies {
        if consolidated.diagnostics.contains_key(&company.name) {
            return Err(RestockError::Config(format!(
                "company '{}' appears more than once",
                company.name
            )));
        }

        let report = calculator
            .clone()
            .with_company(company.name.as_str())
            .calculate(
                &company.fulfillment,
                &company.physical,
                &company.direct_sales,
                catalog,
            )?;

        consolidated.rows.extend(
            report
                .rows
                .into_iter()
                .map(|row| CompanyRow::new(company.name.as_str(), row)),
        );
        consolidated
            .diagnostics
            .insert(company.name.clone(), report.diagnostics);
    }

    info!(
        companies = companies.len(),
        rows = consolidated.rows.len(),
        "consolidated companies"
    );
    Ok(consolidated)
}
