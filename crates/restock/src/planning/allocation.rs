//! Splitting a received quantity between companies by sales share.

use serde::{Deserialize, Serialize};

use super::consolidate::ConsolidatedReport;
use crate::error::{RestockError, Result};
use crate::normalize::{Sku, normalize_sku};

/// One company's part of an allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationShare {
    pub company: String,
    pub sales_60d: i64,
    pub share: f64,
    pub quantity: i64,
}

/// Split `quantity` of `sku` between the companies of a consolidated report,
/// proportionally to each company's `total_sales_60d`.
///
/// Companies without a row for the SKU take part with zero sales.
pub fn allocate(
    report: &ConsolidatedReport,
    sku: &str,
    quantity: i64,
) -> Result<Vec<AllocationShare>> {
    let sku = normalize_sku(sku);
    let mut found = false;

    let sales: Vec<(String, i64)> = report
        .companies()
        .map(|company| {
            let mut sales = 0;
            for row in report.rows.iter().filter(|r| r.company == company && r.sku == sku) {
                found = true;
                sales += row.total_sales_60d;
            }
            (company.to_string(), sales)
        })
        .collect();

    if !found {
        return Err(RestockError::UnknownSku(sku.to_string()));
    }
    allocate_by_sales(&sku, &sales, quantity)
}

/// Split `quantity` proportionally to the given sales.
///
/// Every company but the last receives `round(quantity × share)` (halves to
/// even), capped by what is left; the last receives the remainder, so the
/// parts always add up to `quantity`.
pub fn allocate_by_sales(
    sku: &Sku,
    sales: &[(String, i64)],
    quantity: i64,
) -> Result<Vec<AllocationShare>> {
    if quantity < 0 {
        return Err(RestockError::Allocation(format!(
            "cannot allocate a negative quantity ({quantity}) of {sku}"
        )));
    }

    let total: i64 = sales.iter().map(|(_, s)| (*s).max(0)).sum();
    if total == 0 {
        return Err(RestockError::Allocation(format!(
            "{sku} had no sales in the last 60 days"
        )));
    }

    let mut remaining = quantity;
    let last = sales.len() - 1;
    let shares = sales
        .iter()
        .enumerate()
        .map(|(i, (company, company_sales))| {
            let share = (*company_sales).max(0) as f64 / total as f64;
            let part = if i == last {
                remaining
            } else {
                ((quantity as f64 * share).round_ties_even() as i64).min(remaining)
            };
            remaining -= part;

            AllocationShare {
                company: company.clone(),
                sales_60d: *company_sales,
                share,
                quantity: part,
            }
        })
        .collect();

    Ok(shares)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales(pairs: &[(&str, i64)]) -> Vec<(String, i64)> {
        pairs.iter().map(|(c, s)| (c.to_string(), *s)).collect()
    }

    #[test]
    fn test_two_companies() {
        let shares =
            allocate_by_sales(&Sku::new("A"), &sales(&[("ALPHA", 30), ("BETA", 10)]), 10).unwrap();
        assert_eq!(shares[0].quantity, 8);
        assert_eq!(shares[1].quantity, 2);
        assert_eq!(shares[0].share, 0.75);
    }

    #[test]
    fn test_half_rounds_to_even_and_last_takes_remainder() {
        let shares =
            allocate_by_sales(&Sku::new("A"), &sales(&[("ALPHA", 1), ("BETA", 1)]), 5).unwrap();
        assert_eq!(shares[0].quantity, 2);
        assert_eq!(shares[1].quantity, 3);
    }

    #[test]
    fn test_many_companies_never_overshoot() {
        let shares = allocate_by_sales(
            &Sku::new("A"),
            &sales(&[("A", 1), ("B", 1), ("C", 0)]),
            3,
        )
        .unwrap();
        let parts: Vec<i64> = shares.iter().map(|s| s.quantity).collect();
        assert_eq!(parts, vec![2, 1, 0]);
        assert!(parts.iter().all(|&p| p >= 0));
    }

    #[test]
    fn test_zero_sales_is_an_error() {
        let err = allocate_by_sales(&Sku::new("A"), &sales(&[("ALPHA", 0), ("BETA", 0)]), 5)
            .unwrap_err();
        assert!(matches!(err, RestockError::Allocation(_)));
    }

    #[test]
    fn test_unknown_sku() {
        let err = allocate(&ConsolidatedReport::default(), "nope", 5).unwrap_err();
        assert!(matches!(err, RestockError::UnknownSku(ref s) if s == "NOPE"));
    }
}
