//! Property-based tests for Restock.
//!
//! These tests use proptest to generate random catalogs, tables and
//! parameters and check that the calculation keeps its invariants.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p restock --test property_tests
//!
//! # More cases
//! PROPTEST_CASES=10000 cargo test -p restock --test property_tests
//! ```

use proptest::prelude::*;

use restock::calculation::target_stock;
use restock::normalize::parse_localized_number;
use restock::planning::allocate_by_sales;
use restock::prepare::{DirectSaleRecord, FulfillmentRecord, PhysicalRecord};
use restock::{
    BomEntry, Catalog, CatalogItem, ReplenishmentParams, RepositionCalculator, Sku, expand,
    normalize_header, normalize_sku,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Latin text with accents, mixed case and padding.
fn arb_latin_text() -> impl Strategy<Value = String> {
    "[ a-zA-Z0-9çãáâàéêíóôõúüñÇÃÁÉÍÓÚÑßæøł_\\-\\(\\)/\\.]{0,30}"
}

/// SKUs from a small pool so that joins actually hit.
fn arb_sku() -> impl Strategy<Value = Sku> {
    "(COMP|KIT)-[0-9]".prop_map(|s| Sku::new(&s))
}

fn arb_catalog() -> impl Strategy<Value = Catalog> {
    (
        prop::collection::vec(("COMP-[0-9]", "[A-C]"), 0..10),
        prop::collection::vec(("KIT-[0-9]", "COMP-[0-9]", -2i64..5), 0..15),
    )
        .prop_map(|(items, bom)| {
            Catalog::new(
                items
                    .iter()
                    .map(|(sku, supplier)| CatalogItem::new(sku.as_str(), supplier.as_str()))
                    .collect(),
                bom.iter()
                    .map(|(kit, comp, qty)| BomEntry::new(kit.as_str(), comp.as_str(), *qty))
                    .collect(),
            )
        })
}

fn arb_params() -> impl Strategy<Value = ReplenishmentParams> {
    (1u32..120, 0u32..60, -50.0f64..100.0)
        .prop_map(|(h, l, g)| ReplenishmentParams::new(h, l, g))
}

// =============================================================================
// Normalization
// =============================================================================

proptest! {
    #[test]
    fn sku_normalization_is_idempotent(raw in arb_latin_text()) {
        let once = normalize_sku(raw.as_str());
        let twice = normalize_sku(once.as_str());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn header_normalization_is_idempotent(raw in arb_latin_text()) {
        let once = normalize_header(raw.as_str());
        prop_assert_eq!(normalize_header(once.as_str()), once.clone());
        prop_assert!(!once.starts_with('_') && !once.ends_with('_'));
        prop_assert!(!once.contains("__"));
    }

    #[test]
    fn number_parsing_never_panics(raw in "\\PC{0,40}") {
        let _ = parse_localized_number(raw.as_str());
    }
}

// =============================================================================
// Catalog and Expansion
// =============================================================================

proptest! {
    #[test]
    fn every_component_resolves_in_effective_bom(catalog in arb_catalog()) {
        let bom = catalog.effective_bom();
        for item in catalog.simple_items() {
            prop_assert!(bom.contains(&item.sku));
        }
        for entry in catalog.kit_bom() {
            prop_assert!(entry.quantity > 0);
        }
    }

    #[test]
    fn expansion_conserves_matched_quantity(
        catalog in arb_catalog(),
        rows in prop::collection::vec((arb_sku(), 0i64..1_000), 0..30),
    ) {
        let bom = catalog.effective_bom();
        let expansion = expand(rows.clone(), &bom);

        let expected: i64 = rows
            .iter()
            .filter_map(|(sku, qty)| {
                bom.resolve(sku)
                    .map(|lines| lines.iter().map(|l| qty * l.quantity).sum::<i64>())
            })
            .sum();
        prop_assert_eq!(expansion.total(), expected);

        let unmatched = rows.iter().filter(|(sku, _)| !bom.contains(sku)).count();
        prop_assert_eq!(expansion.diagnostics.unmatched_rows, unmatched);
        prop_assert_eq!(expansion.diagnostics.input_rows, rows.len());
    }

    #[test]
    fn unmatched_rows_do_not_change_the_result(
        catalog in arb_catalog(),
        rows in prop::collection::vec((arb_sku(), 0i64..1_000), 0..20),
        extra in prop::collection::vec(0i64..1_000, 0..5),
    ) {
        let bom = catalog.effective_bom();
        let base = expand(rows.clone(), &bom);

        let mut noisy = rows;
        noisy.extend(extra.iter().map(|q| (Sku::new("NOT-IN-CATALOG"), *q)));
        let with_noise = expand(noisy, &bom);

        prop_assert_eq!(base.quantities, with_noise.quantities);
    }
}

// =============================================================================
// Calculation
// =============================================================================

proptest! {
    #[test]
    fn recommendations_are_never_negative(
        catalog in arb_catalog(),
        params in arb_params(),
        fulfillment in prop::collection::vec((arb_sku(), 0i64..500, 0i64..500, 0i64..100), 0..10),
        physical in prop::collection::vec((arb_sku(), 0i64..500, 0.0f64..100.0), 0..10),
        direct in prop::collection::vec((arb_sku(), 0i64..500), 0..10),
    ) {
        let fulfillment: Vec<FulfillmentRecord> = fulfillment
            .into_iter()
            .map(|(sku, sales_60d, fulfillment_stock, in_transit)| FulfillmentRecord {
                sku,
                sales_60d,
                fulfillment_stock,
                in_transit,
            })
            .collect();
        let physical: Vec<PhysicalRecord> = physical
            .into_iter()
            .map(|(sku, physical_stock, unit_cost)| PhysicalRecord { sku, physical_stock, unit_cost })
            .collect();
        let direct: Vec<DirectSaleRecord> = direct
            .into_iter()
            .map(|(sku, quantity)| DirectSaleRecord { sku, quantity })
            .collect();

        let report = RepositionCalculator::new(params)
            .calculate_records(&fulfillment, &physical, &direct, &catalog)
            .unwrap();

        prop_assert_eq!(report.len(), catalog.simple_items().len());
        for row in &report.rows {
            prop_assert!(row.suggested_purchase >= 0);
            prop_assert!(row.fulfillment_need >= 0);
            prop_assert!(row.physical_slack >= 0);
            prop_assert!(row.purchase_value >= 0.0);
            prop_assert!(row.suggested_purchase <= row.fulfillment_need);
        }
    }

    #[test]
    fn higher_growth_never_lowers_target(
        sales in 0i64..10_000,
        horizon in 1u32..180,
        lead in 0u32..90,
        low in -90.0f64..200.0,
        delta in 0.0f64..100.0,
    ) {
        let slow = ReplenishmentParams::new(horizon, lead, low);
        let fast = ReplenishmentParams::new(horizon, lead, low + delta);
        prop_assert!(target_stock(sales, &slow) <= target_stock(sales, &fast));
    }

    #[test]
    fn allocation_sums_to_quantity(
        sales in prop::collection::vec(0i64..1_000, 1..6),
        quantity in 0i64..10_000,
    ) {
        prop_assume!(sales.iter().any(|&s| s > 0));
        let sales: Vec<(String, i64)> = sales
            .into_iter()
            .enumerate()
            .map(|(i, s)| (format!("COMPANY-{i}"), s))
            .collect();

        let shares = allocate_by_sales(&Sku::new("A"), &sales, quantity).unwrap();
        prop_assert_eq!(shares.iter().map(|s| s.quantity).sum::<i64>(), quantity);
        prop_assert!(shares.iter().all(|s| s.quantity >= 0));
    }
}
