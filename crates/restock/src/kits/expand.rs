//! Explosion of kit-level quantities into component quantities.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::EffectiveBom;
use crate::error::{RestockError, Result};
use crate::input::DataTable;
use crate::normalize::{NumberParser, Sku, normalize_header, normalize_sku};
use crate::schema::coerce_number;

/// What an expansion could not resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionDiagnostics {
    /// Rows fed into the expansion.
    pub input_rows: usize,
    /// Rows whose outer SKU has no entry in the effective BOM.
    pub unmatched_rows: usize,
    /// Distinct non-empty outer SKUs without a BOM entry, sorted.
    pub unmatched_skus: Vec<Sku>,
}

impl ExpansionDiagnostics {
    pub fn has_unmatched(&self) -> bool {
        self.unmatched_rows > 0
    }
}

/// Component quantities produced by an expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expansion {
    /// One entry per component that received a contribution, ordered by SKU.
    pub quantities: BTreeMap<Sku, i64>,
    pub diagnostics: ExpansionDiagnostics,
}

impl Expansion {
    /// Quantity for a component; components without contributions read as 0.
    pub fn get(&self, sku: &Sku) -> i64 {
        self.quantities.get(sku).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Sum over all components.
    pub fn total(&self) -> i64 {
        self.quantities.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Sku, i64)> {
        self.quantities.iter().map(|(sku, qty)| (sku, *qty))
    }
}

/// Explode `(outer SKU, quantity)` rows through the effective BOM.
///
/// Each matched row contributes `quantity × per-kit quantity` to every
/// component of its kit; contributions are summed per component. Rows
/// whose SKU is not in the BOM contribute nothing and are counted in the
/// diagnostics.
pub fn expand<I>(rows: I, bom: &EffectiveBom) -> Expansion
where
    I: IntoIterator<Item = (Sku, i64)>,
{
    let mut quantities: BTreeMap<Sku, i64> = BTreeMap::new();
    let mut unmatched: BTreeSet<Sku> = BTreeSet::new();
    let mut input_rows = 0;
    let mut unmatched_rows = 0;

    for (outer, quantity) in rows {
        input_rows += 1;
        let Some(lines) = bom.resolve(&outer) else {
            unmatched_rows += 1;
            if !outer.is_empty() {
                unmatched.insert(outer);
            }
            continue;
        };

        for line in lines {
            let contribution = quantity.saturating_mul(line.quantity);
            let total = quantities.entry(line.component_sku.clone()).or_insert(0);
            *total = total.saturating_add(contribution);
        }
    }

    if unmatched_rows > 0 {
        warn!(
            unmatched_rows,
            distinct = unmatched.len(),
            "dropped rows with SKUs missing from the catalog"
        );
    }
    debug!(input_rows, components = quantities.len(), "expansion done");

    Expansion {
        quantities,
        diagnostics: ExpansionDiagnostics {
            input_rows,
            unmatched_rows,
            unmatched_skus: unmatched.into_iter().collect(),
        },
    }
}

/// Explode a raw table, reading the outer SKU and quantity by column name.
///
/// Column names are matched after header normalization. Quantities use
/// strict coercion: null-like cells are 0, unreadable cells fail with
/// [`RestockError::TypeCoercion`], fractions are truncated.
pub fn expand_table(
    table: &DataTable,
    bom: &EffectiveBom,
    outer_column: &str,
    quantity_column: &str,
    parser: &dyn NumberParser,
) -> Result<Expansion> {
    let sku_col = find_column(table, outer_column)?;
    let qty_col = find_column(table, quantity_column)?;

    let mut rows = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let quantity = coerce_number(
            "expansion",
            quantity_column,
            row,
            table.get(row, qty_col),
            parser,
        )?;
        rows.push((normalize_sku(table.get(row, sku_col)), quantity.trunc() as i64));
    }

    Ok(expand(rows, bom))
}

fn find_column(table: &DataTable, name: &str) -> Result<usize> {
    let wanted = normalize_header(name);
    table
        .headers
        .iter()
        .position(|h| normalize_header(h.as_str()) == wanted)
        .ok_or_else(|| RestockError::Schema {
            table: "expansion".to_string(),
            field: name.to_string(),
        })
}
