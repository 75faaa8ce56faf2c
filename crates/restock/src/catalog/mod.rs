//! Product catalog and kit bill-of-materials.

mod builder;
mod model;

pub use builder::{CATALOG_ALIASES, CatalogBuilder, CatalogConfig, KIT_ALIASES, load_catalog};
pub use model::{BomEntry, BomLine, Catalog, CatalogItem, EffectiveBom};
