//! Row filters for consolidated results.

use serde::{Deserialize, Serialize};

use super::consolidate::CompanyRow;

/// Supplier, company and SKU filters. `None` keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    pub supplier: Option<String>,
    pub company: Option<String>,
    /// Substring of the SKU, matched case-insensitively.
    pub sku_query: Option<String>,
}

impl ReportFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = Some(supplier.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_sku_query(mut self, query: impl Into<String>) -> Self {
        self.sku_query = Some(query.into());
        self
    }

    pub fn matches(&self, row: &CompanyRow) -> bool {
        if self.supplier.as_ref().is_some_and(|s| s != &row.supplier) {
            return false;
        }
        if self.company.as_ref().is_some_and(|c| c != &row.company) {
            return false;
        }
        match &self.sku_query {
            Some(query) => row.sku.as_str().contains(query.trim().to_uppercase().as_str()),
            None => true,
        }
    }

    pub fn apply<'a>(&self, rows: &'a [CompanyRow]) -> Vec<&'a CompanyRow> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::RepositionRow;
    use crate::normalize::Sku;

    fn row(company: &str, sku: &str, supplier: &str) -> CompanyRow {
        CompanyRow::new(
            company,
            RepositionRow {
                sku: Sku::new(sku),
                supplier: supplier.to_string(),
                total_sales_60d: 0,
                fulfillment_sales_60d: 0,
                direct_sales_60d: 0,
                fulfillment_stock: 0,
                in_transit: 0,
                physical_stock: 0,
                unit_cost: 0.0,
                fulfillment_need: 0,
                physical_slack: 0,
                suggested_purchase: 0,
                purchase_value: 0.0,
            },
        )
    }

    #[test]
    fn test_filters_combine() {
        let rows = vec![
            row("ALPHA", "CAMISA-P", "ACME"),
            row("ALPHA", "CAMISA-G", "GLOBEX"),
            row("BETA", "CAMISA-P", "ACME"),
            row("BETA", "CALCA-M", "ACME"),
        ];

        assert_eq!(ReportFilter::new().apply(&rows).len(), 4);
        assert_eq!(ReportFilter::new().with_supplier("ACME").apply(&rows).len(), 3);
        assert_eq!(
            ReportFilter::new()
                .with_supplier("ACME")
                .with_company("BETA")
                .apply(&rows)
                .len(),
            2
        );

        let found = ReportFilter::new().with_sku_query(" camisa-p ").apply(&rows);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|r| r.sku.as_str() == "CAMISA-P"));
    }

    #[test]
    fn test_supplier_match_is_exact() {
        let rows = vec![row("ALPHA", "A", "ACME LTDA")];
        assert!(ReportFilter::new().with_supplier("ACME").apply(&rows).is_empty());
    }
}
