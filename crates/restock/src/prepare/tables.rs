//! Adapters from the three raw per-SKU tables to typed records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::input::DataTable;
use crate::normalize::{NumberParser, Sku, normalize_sku};
use crate::schema::{ColumnAliases, ColumnSpec};

const SKU_ALIASES: &[&str] = &["sku", "codigo", "component_sku", "kit_sku"];

const FULFILLMENT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::required("sku", SKU_ALIASES),
    ColumnSpec::required("sales_60d", &["vendas_60d", "sales_60d", "vendas"]),
    ColumnSpec::required("fulfillment_stock", &["estoque_full", "fulfillment_stock"]),
    ColumnSpec::required("in_transit", &["em_transito", "in_transit", "transito"]),
];

const PHYSICAL_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::required("sku", SKU_ALIASES),
    ColumnSpec::required("physical_stock", &["estoque_fisico", "physical_stock", "estoque"]),
    ColumnSpec::required(
        "unit_cost",
        &["preco", "preco_custo", "custo", "unit_cost", "cost"],
    ),
];

const DIRECT_SALES_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::required("sku", SKU_ALIASES),
    ColumnSpec::required("quantity", &["quantidade", "quantity", "qty", "qtd"]),
];

/// Alias table for the fulfillment stock-and-sales report.
pub const FULFILLMENT_ALIASES: ColumnAliases =
    ColumnAliases::new("fulfillment", FULFILLMENT_COLUMNS);

/// Alias table for the physical warehouse report.
pub const PHYSICAL_ALIASES: ColumnAliases = ColumnAliases::new("physical", PHYSICAL_COLUMNS);

/// Alias table for the direct-channel sales report.
pub const DIRECT_SALES_ALIASES: ColumnAliases =
    ColumnAliases::new("direct_sales", DIRECT_SALES_COLUMNS);

/// Fulfillment-channel sales and stock for one (possibly kit) SKU.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentRecord {
    pub sku: Sku,
    pub sales_60d: i64,
    pub fulfillment_stock: i64,
    pub in_transit: i64,
}

/// Physical warehouse stock and unit cost for one SKU.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalRecord {
    pub sku: Sku,
    pub physical_stock: i64,
    pub unit_cost: f64,
}

/// Direct-channel units sold over the last 60 days for one SKU.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectSaleRecord {
    pub sku: Sku,
    pub quantity: i64,
}

/// Coerce the fulfillment report. Duplicate SKUs are summed.
pub fn prepare_fulfillment(
    table: &DataTable,
    parser: &dyn NumberParser,
) -> Result<Vec<FulfillmentRecord>> {
    let columns = FULFILLMENT_ALIASES.resolve(table)?;
    let sku_col = columns.require("sku")?;

    let mut records: IndexMap<Sku, FulfillmentRecord> = IndexMap::new();
    for row in 0..table.row_count() {
        let sku = normalize_sku(table.get(row, sku_col));
        let sales = columns.count(table, row, "sales_60d", parser)?;
        let stock = columns.count(table, row, "fulfillment_stock", parser)?;
        let transit = columns.count(table, row, "in_transit", parser)?;

        let record = records
            .entry(sku.clone())
            .or_insert_with(|| FulfillmentRecord {
                sku,
                ..FulfillmentRecord::default()
            });
        record.sales_60d = record.sales_60d.saturating_add(sales);
        record.fulfillment_stock = record.fulfillment_stock.saturating_add(stock);
        record.in_transit = record.in_transit.saturating_add(transit);
    }

    debug!(rows = table.row_count(), skus = records.len(), "fulfillment table prepared");
    Ok(records.into_values().collect())
}

/// Coerce the physical warehouse report.
///
/// Duplicate SKUs sum their stock and keep the first non-zero cost.
pub fn prepare_physical(
    table: &DataTable,
    parser: &dyn NumberParser,
) -> Result<Vec<PhysicalRecord>> {
    let columns = PHYSICAL_ALIASES.resolve(table)?;
    let sku_col = columns.require("sku")?;

    let mut records: IndexMap<Sku, PhysicalRecord> = IndexMap::new();
    for row in 0..table.row_count() {
        let sku = normalize_sku(table.get(row, sku_col));
        let stock = columns.count(table, row, "physical_stock", parser)?;
        let cost = columns.number(table, row, "unit_cost", parser)?;

        let record = records.entry(sku.clone()).or_insert_with(|| PhysicalRecord {
            sku,
            ..PhysicalRecord::default()
        });
        record.physical_stock = record.physical_stock.saturating_add(stock);
        if record.unit_cost == 0.0 {
            record.unit_cost = cost;
        }
    }

    debug!(rows = table.row_count(), skus = records.len(), "physical table prepared");
    Ok(records.into_values().collect())
}

/// Coerce the direct-channel sales report. Duplicate SKUs are summed.
pub fn prepare_direct_sales(
    table: &DataTable,
    parser: &dyn NumberParser,
) -> Result<Vec<DirectSaleRecord>> {
    let columns = DIRECT_SALES_ALIASES.resolve(table)?;
    let sku_col = columns.require("sku")?;

    let mut records: IndexMap<Sku, DirectSaleRecord> = IndexMap::new();
    for row in 0..table.row_count() {
        let sku = normalize_sku(table.get(row, sku_col));
        let quantity = columns.count(table, row, "quantity", parser)?;

        let record = records
            .entry(sku.clone())
            .or_insert_with(|| DirectSaleRecord { sku, quantity: 0 });
        record.quantity = record.quantity.saturating_add(quantity);
    }

    debug!(rows = table.row_count(), skus = records.len(), "direct sales table prepared");
    Ok(records.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RestockError;
    use crate::normalize::{BrazilianNumberParser, PlainNumberParser};

    #[test]
    fn test_prepare_fulfillment_aliases_and_nulls() {
        let table = DataTable::from_slices(
            &["Código", "Vendas (60d)", "Estoque Full", "Em trânsito"],
            &[
                &["kit-a", "60", "10", "NA"],
                &["comp-1", "", "3", "1"],
                &["KIT-A", "5", "0", "2"],
            ],
        );
        let records = prepare_fulfillment(&table, &PlainNumberParser).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            FulfillmentRecord {
                sku: Sku::new("KIT-A"),
                sales_60d: 65,
                fulfillment_stock: 10,
                in_transit: 2,
            }
        );
        assert_eq!(records[1].sales_60d, 0);
        assert_eq!(records[1].in_transit, 1);
    }

    #[test]
    fn test_duplicate_rows_saturate_instead_of_overflowing() {
        let table = DataTable::from_slices(
            &["sku", "vendas_60d", "estoque_full", "em_transito"],
            &[&["COMP-1", "1", "1e19", "0"], &["COMP-1", "1", "1e19", "0"]],
        );
        let records = prepare_fulfillment(&table, &PlainNumberParser).unwrap();
        assert_eq!(records[0].fulfillment_stock, i64::MAX);
        assert_eq!(records[0].sales_60d, 2);

        let table = DataTable::from_slices(
            &["sku", "quantidade"],
            &[&["A", "9000000000000000000"], &["A", "9000000000000000000"]],
        );
        let records = prepare_direct_sales(&table, &PlainNumberParser).unwrap();
        assert_eq!(records[0].quantity, i64::MAX);
    }

    #[test]
    fn test_prepare_fulfillment_missing_column() {
        let table = DataTable::from_slices(&["sku", "vendas_60d", "estoque_full"], &[]);
        let err = prepare_fulfillment(&table, &PlainNumberParser).unwrap_err();
        assert!(
            matches!(err, RestockError::Schema { ref table, ref field } if table == "fulfillment" && field == "in_transit")
        );
    }

    #[test]
    fn test_type_coercion_error() {
        let table = DataTable::from_slices(
            &["sku", "vendas_60d", "estoque_full", "em_transito"],
            &[&["A", "1", "2", "3"], &["B", "doze", "0", "0"]],
        );
        let err = prepare_fulfillment(&table, &PlainNumberParser).unwrap_err();
        match err {
            RestockError::TypeCoercion {
                table,
                column,
                row,
                value,
            } => {
                assert_eq!(table, "fulfillment");
                assert_eq!(column, "sales_60d");
                assert_eq!(row, 2);
                assert_eq!(value, "doze");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_prepare_physical() {
        let table = DataTable::from_slices(
            &["SKU", "Estoque Físico", "Preço Custo"],
            &[
                &["comp-1", "100", "R$ 12,50"],
                &["comp-2", "7,9", ""],
                &["COMP-1", "5", "R$ 99,00"],
                &["comp-2", "1", "3,10"],
            ],
        );
        let records = prepare_physical(&table, &BrazilianNumberParser).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].physical_stock, 105);
        assert_eq!(records[0].unit_cost, 12.5);
        assert_eq!(records[1].physical_stock, 8);
        assert_eq!(records[1].unit_cost, 3.1);
    }

    #[test]
    fn test_prepare_direct_sales() {
        let table = DataTable::from_slices(
            &["sku", "Quantidade"],
            &[&["kit-a", "3"], &["kit-a", "2.9"], &["comp-9", "-"]],
        );
        let records = prepare_direct_sales(&table, &PlainNumberParser).unwrap();
        assert_eq!(
            records,
            vec![
                DirectSaleRecord {
                    sku: Sku::new("KIT-A"),
                    quantity: 5
                },
                DirectSaleRecord {
                    sku: Sku::new("COMP-9"),
                    quantity: 0
                },
            ]
        );
    }
}
