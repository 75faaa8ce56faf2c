//! Purchase-order drafts and numbering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::consolidate::ConsolidatedReport;
use super::filter::ReportFilter;
use crate::calculation::round_cents;
use crate::error::{RestockError, Result};
use crate::normalize::{Sku, normalize_sku};

/// Order number: `OC-<SUPPLIER>-<YYYYMMDD>-<NNN>`.
///
/// The supplier is upper-cased with spaces removed; `sequence` is the
/// position of the order among those issued on `date`, starting at 1.
///
/// ```
/// use chrono::NaiveDate;
/// use restock::planning::order_number;
///
/// let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
/// assert_eq!(order_number("Dragon Fit", date, 1), "OC-DRAGONFIT-20251201-001");
/// ```
pub fn order_number(supplier: &str, date: NaiveDate, sequence: u32) -> String {
    let supplier: String = supplier
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    format!("OC-{}-{}-{:03}", supplier, date.format("%Y%m%d"), sequence)
}

/// One line of a purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftItem {
    pub sku: Sku,
    pub company: String,
    pub supplier: String,
    pub quantity: i64,
    pub unit_cost: f64,
    pub value: f64,
    /// Added by hand rather than suggested by the calculation.
    pub manual: bool,
}

/// An editable purchase order for one supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseDraft {
    pub supplier: String,
    /// `None` when the draft covers every company.
    pub company: Option<String>,
    pub items: Vec<DraftItem>,
}

impl PurchaseDraft {
    /// Start a draft from the suggested purchases of `supplier`.
    pub fn from_report(report: &ConsolidatedReport, supplier: &str, company: Option<&str>) -> Self {
        let mut filter = ReportFilter::new().with_supplier(supplier);
        filter.company = company.map(str::to_string);

        let items: Vec<DraftItem> = report
            .filter(&filter)
            .into_iter()
            .filter(|row| row.suggested_purchase > 0)
            .map(|row| DraftItem {
                sku: row.sku.clone(),
                company: row.company.clone(),
                supplier: row.supplier.clone(),
                quantity: row.suggested_purchase,
                unit_cost: row.unit_cost,
                value: row.purchase_value,
                manual: false,
            })
            .collect();

        debug!(supplier, items = items.len(), "purchase draft created");
        Self {
            supplier: supplier.to_string(),
            company: company.map(str::to_string),
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_units(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn total_value(&self) -> f64 {
        round_cents(self.items.iter().map(|i| i.value).sum())
    }

    /// Change the quantity of an item and recompute its value.
    pub fn adjust(&mut self, sku: &str, company: &str, quantity: i64) -> Result<()> {
        if quantity < 0 {
            return Err(RestockError::InvalidParameter(format!(
                "quantity must not be negative, got {quantity}"
            )));
        }

        let sku = normalize_sku(sku);
        let item = self
            .items
            .iter_mut()
            .find(|i| i.sku == sku && i.company == company)
            .ok_or_else(|| RestockError::UnknownSku(sku.to_string()))?;

        item.quantity = quantity;
        item.value = round_cents(quantity as f64 * item.unit_cost);
        Ok(())
    }

    /// Add an item the calculation did not suggest. Its cost is unknown (0).
    pub fn add_manual(&mut self, sku: &str, quantity: i64) -> Result<()> {
        let sku = normalize_sku(sku);
        if sku.is_empty() {
            return Err(RestockError::InvalidParameter("SKU must not be empty".to_string()));
        }
        if quantity <= 0 {
            return Err(RestockError::InvalidParameter(format!(
                "quantity must be positive, got {quantity}"
            )));
        }

        self.items.push(DraftItem {
            sku,
            company: self.company.clone().unwrap_or_default(),
            supplier: self.supplier.clone(),
            quantity,
            unit_cost: 0.0,
            value: 0.0,
            manual: true,
        });
        Ok(())
    }

    /// Drop zero-quantity items and number the order.
    pub fn finalize(self, date: NaiveDate, sequence: u32) -> PurchaseOrder {
        let number = order_number(&self.supplier, date, sequence);
        let items: Vec<DraftItem> = self.items.into_iter().filter(|i| i.quantity > 0).collect();
        let total_units = items.iter().map(|i| i.quantity).sum();
        let total_value = round_cents(items.iter().map(|i| i.value).sum());

        PurchaseOrder {
            number,
            date,
            supplier: self.supplier,
            company: self.company,
            items,
            total_units,
            total_value,
        }
    }
}

/// A numbered purchase order, ready to be stored or rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub number: String,
    pub date: NaiveDate,
    pub supplier: String,
    pub company: Option<String>,
    pub items: Vec<DraftItem>,
    pub total_units: i64,
    pub total_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::RepositionRow;
    use crate::planning::CompanyRow;

    fn row(company: &str, sku: &str, supplier: &str, qty: i64, cost: f64) -> CompanyRow {
        CompanyRow::new(
            company,
            RepositionRow {
                sku: Sku::new(sku),
                supplier: supplier.to_string(),
                total_sales_60d: qty,
                fulfillment_sales_60d: qty,
                direct_sales_60d: 0,
                fulfillment_stock: 0,
                in_transit: 0,
                physical_stock: 0,
                unit_cost: cost,
                fulfillment_need: qty,
                physical_slack: 0,
                suggested_purchase: qty,
                purchase_value: round_cents(qty as f64 * cost),
            },
        )
    }

    fn report() -> ConsolidatedReport {
        ConsolidatedReport {
            rows: vec![
                row("ALPHA", "A", "ACME", 10, 1.5),
                row("ALPHA", "B", "ACME", 0, 3.0),
                row("ALPHA", "C", "GLOBEX", 4, 2.0),
                row("BETA", "A", "ACME", 6, 1.5),
            ],
            diagnostics: Default::default(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
    }

    #[test]
    fn test_order_number() {
        assert_eq!(order_number("acme tools", date(), 12), "OC-ACMETOOLS-20250309-012");
    }

    #[test]
    fn test_draft_keeps_positive_suggestions_of_supplier() {
        let draft = PurchaseDraft::from_report(&report(), "ACME", None);
        assert_eq!(draft.len(), 2);
        assert_eq!(draft.total_units(), 16);
        assert_eq!(draft.total_value(), 24.0);

        let draft = PurchaseDraft::from_report(&report(), "ACME", Some("BETA"));
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.items[0].company, "BETA");
    }

    #[test]
    fn test_adjust_and_manual_items() {
        let mut draft = PurchaseDraft::from_report(&report(), "ACME", Some("ALPHA"));
        draft.adjust("a", "ALPHA", 3).unwrap();
        assert_eq!(draft.items[0].value, 4.5);

        assert!(matches!(
            draft.adjust("Z", "ALPHA", 1),
            Err(RestockError::UnknownSku(_))
        ));
        assert!(draft.adjust("A", "ALPHA", -1).is_err());

        draft.add_manual(" novo-sku ", 2).unwrap();
        let manual = draft.items.last().unwrap();
        assert_eq!(manual.sku, Sku::new("NOVO-SKU"));
        assert_eq!(manual.company, "ALPHA");
        assert_eq!(manual.value, 0.0);
        assert!(manual.manual);
        assert!(draft.add_manual("  ", 1).is_err());
    }

    #[test]
    fn test_finalize_drops_zero_quantities() {
        let mut draft = PurchaseDraft::from_report(&report(), "ACME", None);
        draft.adjust("A", "BETA", 0).unwrap();

        let order = draft.finalize(date(), 1);
        assert_eq!(order.number, "OC-ACME-20250309-001");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total_units, 10);
        assert_eq!(order.total_value, 15.0);
    }
}
