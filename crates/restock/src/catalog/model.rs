//! Catalog and bill-of-materials types.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::normalize::Sku;

/// A purchasable component and its supplier attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub sku: Sku,
    pub supplier: String,
    pub status: String,
}

impl CatalogItem {
    pub fn new(sku: impl Into<Sku>, supplier: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            supplier: supplier.into(),
            status: String::new(),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }
}

/// One bill-of-materials row: `quantity` units of `component_sku` per kit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomEntry {
    pub kit_sku: Sku,
    pub component_sku: Sku,
    pub quantity: i64,
}

impl BomEntry {
    pub fn new(kit_sku: impl Into<Sku>, component_sku: impl Into<Sku>, quantity: i64) -> Self {
        Self {
            kit_sku: kit_sku.into(),
            component_sku: component_sku.into(),
            quantity,
        }
    }
}

/// Purchasable components plus the kit bill-of-materials.
///
/// Invariants, enforced by [`Catalog::new`]:
/// - every BOM quantity is positive;
/// - a (kit, component) pair appears at most once (first occurrence kept);
/// - component SKUs in `simple_items` are unique and non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    simple_items: Vec<CatalogItem>,
    kit_bom: Vec<BomEntry>,
}

impl Catalog {
    pub fn new(simple_items: Vec<CatalogItem>, kit_bom: Vec<BomEntry>) -> Self {
        let mut seen_items = HashSet::new();
        let simple_items = simple_items
            .into_iter()
            .filter(|item| !item.sku.is_empty() && seen_items.insert(item.sku.clone()))
            .collect();

        let mut seen_pairs = HashSet::new();
        let kit_bom = kit_bom
            .into_iter()
            .filter(|entry| {
                entry.quantity > 0
                    && !entry.kit_sku.is_empty()
                    && !entry.component_sku.is_empty()
                    && seen_pairs.insert((entry.kit_sku.clone(), entry.component_sku.clone()))
            })
            .collect();

        Self {
            simple_items,
            kit_bom,
        }
    }

    pub fn simple_items(&self) -> &[CatalogItem] {
        &self.simple_items
    }

    pub fn kit_bom(&self) -> &[BomEntry] {
        &self.kit_bom
    }

    pub fn item(&self, sku: &Sku) -> Option<&CatalogItem> {
        self.simple_items.iter().find(|item| &item.sku == sku)
    }

    /// Real kits plus a `(sku, sku, 1)` self-kit for every component that is
    /// not itself defined as a kit.
    pub fn effective_bom(&self) -> EffectiveBom {
        let mut lines: IndexMap<Sku, Vec<BomLine>> = IndexMap::new();
        for entry in &self.kit_bom {
            lines.entry(entry.kit_sku.clone()).or_default().push(BomLine {
                component_sku: entry.component_sku.clone(),
                quantity: entry.quantity,
            });
        }

        let mut self_kits = 0;
        for item in &self.simple_items {
            if !lines.contains_key(&item.sku) {
                lines.insert(
                    item.sku.clone(),
                    vec![BomLine {
                        component_sku: item.sku.clone(),
                        quantity: 1,
                    }],
                );
                self_kits += 1;
            }
        }

        EffectiveBom { lines, self_kits }
    }
}

/// A component line under one outer SKU of the effective BOM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLine {
    pub component_sku: Sku,
    pub quantity: i64,
}

/// Outer SKU to component lines, covering every sellable and purchasable SKU.
#[derive(Debug, Clone, Default)]
pub struct EffectiveBom {
    lines: IndexMap<Sku, Vec<BomLine>>,
    self_kits: usize,
}

impl EffectiveBom {
    /// Component lines for an outer SKU.
    pub fn resolve(&self, outer_sku: &Sku) -> Option<&[BomLine]> {
        self.lines.get(outer_sku).map(|v| v.as_slice())
    }

    pub fn contains(&self, outer_sku: &Sku) -> bool {
        self.lines.contains_key(outer_sku)
    }

    /// Number of distinct outer SKUs.
    pub fn outer_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of (outer, component) rows.
    pub fn row_count(&self) -> usize {
        self.lines.values().map(Vec::len).sum()
    }

    /// Number of self-kit rows added for plain components.
    pub fn self_kit_count(&self) -> usize {
        self.self_kits
    }

    /// All rows as `(outer, component, quantity)`.
    pub fn rows(&self) -> impl Iterator<Item = (&Sku, &Sku, i64)> {
        self.lines.iter().flat_map(|(outer, lines)| {
            lines
                .iter()
                .map(move |line| (outer, &line.component_sku, line.quantity))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        Catalog::new(
            vec![
                CatalogItem::new("COMP-1", "ACME"),
                CatalogItem::new("COMP-2", "ACME"),
                CatalogItem::new("COMP-3", "GLOBEX"),
            ],
            vec![
                BomEntry::new("KIT-A", "COMP-1", 2),
                BomEntry::new("KIT-A", "COMP-2", 1),
            ],
        )
    }

    #[test]
    fn test_catalog_enforces_invariants() {
        let catalog = Catalog::new(
            vec![
                CatalogItem::new("comp-1", "ACME"),
                CatalogItem::new("COMP-1 ", "OTHER"),
                CatalogItem::new("  ", "NOBODY"),
            ],
            vec![
                BomEntry::new("KIT-A", "COMP-1", 2),
                BomEntry::new("kit-a", "comp-1", 5),
                BomEntry::new("KIT-B", "COMP-1", 0),
                BomEntry::new("KIT-C", "COMP-1", -1),
            ],
        );

        assert_eq!(catalog.simple_items().len(), 1);
        assert_eq!(catalog.simple_items()[0].supplier, "ACME");
        assert_eq!(catalog.kit_bom(), &[BomEntry::new("KIT-A", "COMP-1", 2)]);
    }

    #[test]
    fn test_effective_bom_adds_self_kits() {
        let bom = sample_catalog().effective_bom();

        assert_eq!(bom.self_kit_count(), 3);
        assert_eq!(bom.outer_count(), 4);
        assert_eq!(bom.row_count(), 5);

        let comp3 = bom.resolve(&Sku::new("COMP-3")).unwrap();
        assert_eq!(
            comp3,
            &[BomLine {
                component_sku: Sku::new("COMP-3"),
                quantity: 1
            }]
        );

        let kit = bom.resolve(&Sku::new("KIT-A")).unwrap();
        assert_eq!(kit.len(), 2);
    }

    #[test]
    fn test_component_defined_as_kit_gets_no_self_row() {
        let catalog = Catalog::new(
            vec![CatalogItem::new("PACK", "ACME"), CatalogItem::new("UNIT", "ACME")],
            vec![BomEntry::new("PACK", "UNIT", 6)],
        );
        let bom = catalog.effective_bom();

        let pack = bom.resolve(&Sku::new("PACK")).unwrap();
        assert_eq!(pack.len(), 1);
        assert_eq!(pack[0].component_sku, Sku::new("UNIT"));
        assert_eq!(pack[0].quantity, 6);
        assert_eq!(bom.self_kit_count(), 1);
    }

}
