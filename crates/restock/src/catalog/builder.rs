//! Builds a [`Catalog`] from the raw catalog and kit sheets.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::model::{BomEntry, Catalog, CatalogItem};
use crate::error::{RestockError, Result};
use crate::input::{DataTable, Workbook};
use crate::normalize::{NumberFormat, NumberParser, normalize_header, normalize_sku};
use crate::schema::{ColumnAliases, ColumnSpec};

const CATALOG_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::required(
        "component_sku",
        &["component_sku", "sku", "codigo", "code", "produto", "product"],
    ),
    ColumnSpec::optional("supplier", &["fornecedor", "supplier"]),
    ColumnSpec::optional("status", &["status_reposicao", "status"]),
];

const KIT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::required("kit_sku", &["kit_sku", "sku_kit", "kit"]),
    ColumnSpec::required(
        "component_sku",
        &["component_sku", "sku_componente", "componente", "component"],
    ),
    ColumnSpec::required("qty", &["qty", "quantidade", "qtd", "qtd_por_kit", "quantity"]),
];

/// Alias table for the catalog sheet.
pub const CATALOG_ALIASES: ColumnAliases = ColumnAliases::new("catalog", CATALOG_COLUMNS);

/// Alias table for the kit sheet.
pub const KIT_ALIASES: ColumnAliases = ColumnAliases::new("kits", KIT_COLUMNS);

/// Catalog loading rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Substring identifying the catalog sheet (case-insensitive).
    pub catalog_sheet: String,
    /// Substring identifying the kit sheet (case-insensitive).
    pub kit_sheet: String,
    /// Status markers that exclude an item from replenishment.
    /// Compared after header-style normalization, so `"Não repor"`,
    /// `"NAO_REPOR"` and `"nao-repor"` are the same marker.
    pub skip_markers: Vec<String>,
    /// Number format of the per-kit quantity column.
    pub quantity_format: NumberFormat,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            catalog_sheet: "CATALOG".to_string(),
            kit_sheet: "KIT".to_string(),
            skip_markers: vec!["nao_repor".to_string(), "do_not_replenish".to_string()],
            quantity_format: NumberFormat::Brazilian,
        }
    }
}

/// Turns raw catalog and kit tables into a validated [`Catalog`].
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    config: CatalogConfig,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CatalogConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Locate the catalog and kit sheets by name and build the catalog.
    pub fn build(&self, workbook: &Workbook) -> Result<Catalog> {
        let (catalog_name, catalog_table) = workbook
            .find_sheet(&self.config.catalog_sheet)
            .ok_or_else(|| RestockError::MissingSheet {
                sheet: self.config.catalog_sheet.clone(),
            })?;

        let (kit_name, kit_table) = workbook
            .find_sheet_except(&self.config.kit_sheet, Some(catalog_name))
            .ok_or_else(|| RestockError::MissingSheet {
                sheet: self.config.kit_sheet.clone(),
            })?;

        debug!(catalog = catalog_name, kits = kit_name, "catalog sheets located");
        self.build_from_tables(catalog_table, kit_table)
    }

    /// Build the catalog from already-selected tables.
    pub fn build_from_tables(&self, catalog: &DataTable, kits: &DataTable) -> Result<Catalog> {
        let items = self.read_items(catalog)?;
        let bom = self.read_bom(kits, &self.config.quantity_format)?;
        Ok(Catalog::new(items, bom))
    }

    /// Read catalog rows, dropping do-not-replenish items.
    pub fn read_items(&self, table: &DataTable) -> Result<Vec<CatalogItem>> {
        let columns = CATALOG_ALIASES.resolve(table)?;
        let sku_col = columns.require("component_sku")?;
        let supplier_col = columns.get("supplier");
        let status_col = columns.get("status");

        let text = |row: usize, col: Option<usize>| {
            col.and_then(|c| table.get(row, c))
                .map(|v| v.trim().to_string())
                .unwrap_or_default()
        };

        let mut items = Vec::with_capacity(table.row_count());
        let mut excluded = 0;
        for row in 0..table.row_count() {
            let item = CatalogItem {
                sku: normalize_sku(table.get(row, sku_col)),
                supplier: text(row, supplier_col),
                status: text(row, status_col),
            };

            if self.is_skipped(&item.status) {
                excluded += 1;
                continue;
            }
            items.push(item);
        }

        debug!(kept = items.len(), excluded, "catalog items read");
        Ok(items)
    }

    /// Read kit rows; unparsable quantities count as zero and are dropped.
    pub fn read_bom(&self, table: &DataTable, parser: &dyn NumberParser) -> Result<Vec<BomEntry>> {
        let columns = KIT_ALIASES.resolve(table)?;
        let kit_col = columns.require("kit_sku")?;
        let component_col = columns.require("component_sku")?;
        let qty_col = columns.require("qty")?;

        let mut entries = Vec::with_capacity(table.row_count());
        let mut invalid = 0;
        for row in 0..table.row_count() {
            let quantity = parser
                .parse_input(table.get(row, qty_col).into())
                .unwrap_or(0.0)
                .trunc() as i64;

            if quantity <= 0 {
                invalid += 1;
                continue;
            }

            entries.push(BomEntry {
                kit_sku: normalize_sku(table.get(row, kit_col)),
                component_sku: normalize_sku(table.get(row, component_col)),
                quantity,
            });
        }

        debug!(rows = entries.len(), invalid, "kit rows read");
        Ok(entries)
    }

    fn is_skipped(&self, status: &str) -> bool {
        if status.is_empty() {
            return false;
        }
        let status = normalize_header(status);
        self.config
            .skip_markers
            .iter()
            .map(|m| normalize_header(m.as_str()))
            .any(|marker| !marker.is_empty() && status.contains(&marker))
    }
}

/// Build a catalog from a workbook with the default rules.
pub fn load_catalog(workbook: &Workbook) -> Result<Catalog> {
    CatalogBuilder::new().build(workbook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::Sku;

    fn catalog_sheet() -> DataTable {
        DataTable::from_slices(
            &["Código", "Fornecedor", "Status Reposição"],
            &[
                &["comp-1", "ACME", ""],
                &["COMP-2", "ACME", "ativo"],
                &["comp-3", "GLOBEX", "NAO_REPOR"],
                &["comp-4", "GLOBEX", "Não repor"],
                &["comp-5", "", "do-not-replenish"],
            ],
        )
    }

    fn kit_sheet() -> DataTable {
        DataTable::from_slices(
            &["Kit", "Componente", "Qtd por Kit"],
            &[
                &["kit-a", "comp-1", "2"],
                &["KIT-A", "COMP-2", "1"],
                &["kit-a", "comp-1", "9"],
                &["kit-b", "comp-2", "0"],
                &["kit-c", "comp-2", "abc"],
                &["kit-d", "comp-2", "1,9"],
            ],
        )
    }

    #[test]
    fn test_build_from_workbook() {
        let workbook = Workbook::new()
            .with_sheet("CATALOGO", catalog_sheet())
            .with_sheet("KITS", kit_sheet());

        let catalog = load_catalog(&workbook).unwrap();
        let skus: Vec<&str> = catalog.simple_items().iter().map(|i| i.sku.as_str()).collect();
        assert_eq!(skus, vec!["COMP-1", "COMP-2"]);

        assert_eq!(
            catalog.kit_bom(),
            &[
                BomEntry::new("KIT-A", "COMP-1", 2),
                BomEntry::new("KIT-A", "COMP-2", 1),
                BomEntry::new("KIT-D", "COMP-2", 1),
            ]
        );
    }

    #[test]
    fn test_missing_catalog_sheet() {
        let workbook = Workbook::new().with_sheet("KITS", kit_sheet());
        let err = load_catalog(&workbook).unwrap_err();
        assert!(matches!(err, RestockError::MissingSheet { ref sheet } if sheet == "CATALOG"));
    }

    #[test]
    fn test_missing_kit_sheet() {
        let workbook = Workbook::new().with_sheet("Catalogo", catalog_sheet());
        let err = load_catalog(&workbook).unwrap_err();
        assert!(matches!(err, RestockError::MissingSheet { ref sheet } if sheet == "KIT"));
    }

    #[test]
    fn test_missing_required_kit_column() {
        let kits = DataTable::from_slices(&["kit", "componente"], &[&["K", "C"]]);
        let err = CatalogBuilder::new()
            .build_from_tables(&catalog_sheet(), &kits)
            .unwrap_err();
        assert!(matches!(err, RestockError::Schema { ref field, .. } if field == "qty"));
    }

    #[test]
    fn test_optional_supplier_and_status() {
        let catalog = DataTable::from_slices(&["sku"], &[&["a"], &["b"]]);
        let kits = DataTable::from_slices(&["kit_sku", "component_sku", "qty"], &[]);
        let result = CatalogBuilder::new().build_from_tables(&catalog, &kits).unwrap();

        assert_eq!(result.simple_items().len(), 2);
        assert_eq!(result.simple_items()[0].supplier, "");
        assert_eq!(result.simple_items()[0].status, "");
    }

    #[test]
    fn test_custom_skip_markers() {
        let builder = CatalogBuilder::with_config(CatalogConfig {
            skip_markers: vec!["descontinuado".to_string()],
            ..CatalogConfig::default()
        });
        let catalog = DataTable::from_slices(
            &["sku", "status"],
            &[&["A", "Descontinuado"], &["B", "NAO_REPOR"]],
        );
        let items = builder.read_items(&catalog).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].sku, Sku::new("B"));
    }
}
