//! The reposition calculator.

use std::collections::HashMap;

use tracing::{debug, info, info_span};

use super::params::{RESERVE_DAYS, ReplenishmentParams, SALES_WINDOW_DAYS};
use super::report::{ReportDiagnostics, RepositionReport, RepositionRow, round_cents};
use crate::catalog::Catalog;
use crate::error::Result;
use crate::input::DataTable;
use crate::kits::expand;
use crate::normalize::{NumberFormat, Sku};
use crate::prepare::{
    DirectSaleRecord, FulfillmentRecord, PhysicalRecord, prepare_direct_sales,
    prepare_fulfillment, prepare_physical,
};

/// Fulfillment stock an outer SKU should hold to cover horizon plus lead time.
///
/// `round(sales_60d / 60 × (horizon + lead_time) × growth_factor)`, halves to even.
pub fn target_stock(sales_60d: i64, params: &ReplenishmentParams) -> i64 {
    let velocity = sales_60d as f64 / SALES_WINDOW_DAYS;
    (velocity * f64::from(params.coverage_days()) * params.growth_factor()).round_ties_even()
        as i64
}

/// Units held back in the physical warehouse: 30 days of total demand.
pub fn reserve_30d(total_sales_60d: i64) -> i64 {
    (total_sales_60d as f64 / SALES_WINDOW_DAYS * RESERVE_DAYS).round_ties_even() as i64
}

/// Computes purchase recommendations for one company.
#[derive(Debug, Clone)]
pub struct RepositionCalculator {
    params: ReplenishmentParams,
    table_format: NumberFormat,
    company: Option<String>,
}

impl Default for RepositionCalculator {
    fn default() -> Self {
        Self::new(ReplenishmentParams::default())
    }
}

impl RepositionCalculator {
    /// Calculator reading table numbers in the plain `1,234.56` format.
    pub fn new(params: ReplenishmentParams) -> Self {
        Self {
            params,
            table_format: NumberFormat::Plain,
            company: None,
        }
    }

    pub fn with_table_format(mut self, format: NumberFormat) -> Self {
        self.table_format = format;
        self
    }

    /// Company name attached to the calculation's log span.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn params(&self) -> &ReplenishmentParams {
        &self.params
    }

    /// Prepare the three raw tables and compute the report.
    pub fn calculate(
        &self,
        fulfillment: &DataTable,
        physical: &DataTable,
        direct_sales: &DataTable,
        catalog: &Catalog,
    ) -> Result<RepositionReport> {
        self.params.validate()?;

        let fulfillment = prepare_fulfillment(fulfillment, &self.table_format)?;
        let physical = prepare_physical(physical, &self.table_format)?;
        let direct_sales = prepare_direct_sales(direct_sales, &self.table_format)?;

        self.calculate_records(&fulfillment, &physical, &direct_sales, catalog)
    }

    /// Compute the report from already-prepared records.
    pub fn calculate_records(
        &self,
        fulfillment: &[FulfillmentRecord],
        physical: &[PhysicalRecord],
        direct_sales: &[DirectSaleRecord],
        catalog: &Catalog,
    ) -> Result<RepositionReport> {
        self.params.validate()?;

        let company = self.company.as_deref().unwrap_or("");
        let span = info_span!("calculate", company);
        let _guard = span.enter();

        let bom = catalog.effective_bom();
        debug!(
            outer_skus = bom.outer_count(),
            rows = bom.row_count(),
            self_kits = bom.self_kit_count(),
            "effective BOM built"
        );

        let fulfillment_sales = expand(
            fulfillment.iter().map(|r| (r.sku.clone(), r.sales_60d)),
            &bom,
        );
        let direct = expand(
            direct_sales.iter().map(|r| (r.sku.clone(), r.quantity)),
            &bom,
        );
        let need = expand(
            fulfillment.iter().map(|r| {
                let supply = r.fulfillment_stock.saturating_add(r.in_transit);
                let desired = target_stock(r.sales_60d, &self.params)
                    .saturating_sub(supply)
                    .max(0);
                (r.sku.clone(), desired)
            }),
            &bom,
        );

        let physical_by_sku: HashMap<&Sku, &PhysicalRecord> =
            physical.iter().map(|r| (&r.sku, r)).collect();
        let fulfillment_by_sku: HashMap<&Sku, &FulfillmentRecord> =
            fulfillment.iter().map(|r| (&r.sku, r)).collect();

        let rows: Vec<RepositionRow> = catalog
            .simple_items()
            .iter()
            .map(|item| {
                let fulfillment_sales_60d = fulfillment_sales.get(&item.sku);
                let direct_sales_60d = direct.get(&item.sku);
                let total_sales_60d = fulfillment_sales_60d.saturating_add(direct_sales_60d);

                let (physical_stock, unit_cost) = physical_by_sku
                    .get(&item.sku)
                    .map_or((0, 0.0), |r| (r.physical_stock, r.unit_cost));
                let (fulfillment_stock, in_transit) = fulfillment_by_sku
                    .get(&item.sku)
                    .map_or((0, 0), |r| (r.fulfillment_stock, r.in_transit));

                let fulfillment_need = need.get(&item.sku).max(0);
                let physical_slack = physical_stock
                    .saturating_sub(reserve_30d(total_sales_60d))
                    .max(0);
                let suggested_purchase = fulfillment_need.saturating_sub(physical_slack).max(0);

                RepositionRow {
                    sku: item.sku.clone(),
                    supplier: item.supplier.clone(),
                    total_sales_60d,
                    fulfillment_sales_60d,
                    direct_sales_60d,
                    fulfillment_stock,
                    in_transit,
                    physical_stock,
                    unit_cost,
                    fulfillment_need,
                    physical_slack,
                    suggested_purchase,
                    purchase_value: round_cents(suggested_purchase as f64 * unit_cost),
                }
            })
            .collect();

        let report = RepositionReport {
            rows,
            diagnostics: ReportDiagnostics {
                fulfillment_sales: fulfillment_sales.diagnostics,
                direct_sales: direct.diagnostics,
                fulfillment_need: need.diagnostics,
            },
        };

        info!(
            rows = report.len(),
            to_buy = report.to_buy().count(),
            units = report.total_units(),
            value = report.total_value(),
            "replenishment calculated"
        );
        Ok(report)
    }
}

/// Compute purchase recommendations from the three raw tables.
///
/// Table numbers are read in the plain `1,234.56` format; use
/// [`RepositionCalculator`] to pick another.
pub fn compute(
    fulfillment: &DataTable,
    physical: &DataTable,
    direct_sales: &DataTable,
    catalog: &Catalog,
    horizon_days: u32,
    lead_time_days: u32,
    growth_percent: f64,
) -> Result<RepositionReport> {
    let params = ReplenishmentParams::new(horizon_days, lead_time_days, growth_percent);
    RepositionCalculator::new(params).calculate(fulfillment, physical, direct_sales, catalog)
}
