//! Restock: replenishment calculation for multi-channel sellers.
//!
//! Given 60-day sales, fulfillment-warehouse stock, physical-warehouse stock
//! and a catalog mapping kit SKUs to their components, Restock computes how
//! many units of each component should be bought.
//!
//! # Pipeline
//!
//! - **Normalize**: SKUs, headers and locale-formatted numbers are made canonical
//! - **Prepare**: raw tables become typed per-SKU records
//! - **Expand**: kit quantities are exploded into component quantities
//! - **Calculate**: velocity, stock and slack become a purchase suggestion
//!
//! The calculation is pure and synchronous; file loading lives in [`input`].
//!
//! # Example
//!
//! ```
//! use restock::{BomEntry, Catalog, CatalogItem, DataTable, compute};
//!
//! let catalog = Catalog::new(
//!     vec![CatalogItem::new("COMP-1", "ACME"), CatalogItem::new("COMP-2", "ACME")],
//!     vec![BomEntry::new("KIT-A", "COMP-1", 2), BomEntry::new("KIT-A", "COMP-2", 1)],
//! );
//! let fulfillment = DataTable::from_slices(
//!     &["SKU", "Vendas 60d", "Estoque Full", "Em Transito"],
//!     &[&["kit-a", "60", "0", "0"]],
//! );
//! let physical = DataTable::from_slices(&["SKU", "Estoque Fisico", "Preco"], &[]);
//! let direct = DataTable::from_slices(&["SKU", "Quantidade"], &[]);
//!
//! let report = compute(&fulfillment, &physical, &direct, &catalog, 60, 0, 0.0).unwrap();
//! assert_eq!(report.rows[0].suggested_purchase, 120);
//! assert_eq!(report.rows[1].suggested_purchase, 60);
//! ```

pub mod calculation;
pub mod catalog;
pub mod config;
pub mod error;
pub mod input;
pub mod kits;
pub mod normalize;
pub mod planning;
pub mod prepare;
pub mod schema;

mod restock;

pub use crate::restock::Restock;
pub use calculation::{
    ReplenishmentParams, RepositionCalculator, RepositionReport, RepositionRow, compute,
};
pub use catalog::{BomEntry, Catalog, CatalogBuilder, CatalogConfig, CatalogItem, EffectiveBom};
pub use config::RestockConfig;
pub use error::{RestockError, Result};
pub use input::{DataTable, Parser, SourceMetadata, Workbook};
pub use kits::{Expansion, ExpansionDiagnostics, expand};
pub use normalize::{NumberFormat, ParsedNumber, Sku, normalize_header, normalize_sku};
