//! Main Restock struct and file-level API.

use std::path::Path;

use crate::calculation::{RepositionCalculator, RepositionReport};
use crate::catalog::{Catalog, CatalogBuilder};
use crate::config::RestockConfig;
use crate::error::Result;
use crate::input::{DataTable, Parser, Workbook};
use crate::planning::{CompanyInputs, ConsolidatedReport, consolidate_with};

/// Loads uploaded files and runs calculations with one configuration.
#[derive(Debug, Clone)]
pub struct Restock {
    config: RestockConfig,
    parser: Parser,
    catalog_builder: CatalogBuilder,
}

impl Default for Restock {
    fn default() -> Self {
        Self::new()
    }
}

impl Restock {
    /// Create a new Restock instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(RestockConfig::default())
    }

    /// Create a Restock instance with custom configuration.
    pub fn with_config(config: RestockConfig) -> Self {
        let catalog_builder = CatalogBuilder::with_config(config.catalog.clone());
        Self {
            config,
            parser: Parser::new(),
            catalog_builder,
        }
    }

    pub fn config(&self) -> &RestockConfig {
        &self.config
    }

    /// Calculator carrying this instance's parameters and table format.
    pub fn calculator(&self) -> RepositionCalculator {
        RepositionCalculator::new(self.config.params).with_table_format(self.config.table_format)
    }

    pub fn load_table(&self, path: impl AsRef<Path>) -> Result<DataTable> {
        let (table, _) = self.parser.parse_file(path)?;
        Ok(table)
    }

    /// Load a directory of sheet files.
    pub fn load_workbook(&self, dir: impl AsRef<Path>) -> Result<Workbook> {
        self.parser.parse_dir(dir)
    }

    pub fn build_catalog(&self, workbook: &Workbook) -> Result<Catalog> {
        self.catalog_builder.build(workbook)
    }

    /// Load one company's three reports.
    pub fn load_company(
        &self,
        name: impl Into<String>,
        fulfillment: impl AsRef<Path>,
        physical: impl AsRef<Path>,
        direct_sales: impl AsRef<Path>,
    ) -> Result<CompanyInputs> {
        Ok(CompanyInputs::new(
            name,
            self.load_table(fulfillment)?,
            self.load_table(physical)?,
            self.load_table(direct_sales)?,
        ))
    }

    /// Compute one company's report.
    pub fn calculate(&self, inputs: &CompanyInputs, catalog: &Catalog) -> Result<RepositionReport> {
        let mut calculator = self.calculator();
        if !inputs.name.is_empty() {
            calculator = calculator.with_company(inputs.name.as_str());
        }
        calculator.calculate(
            &inputs.fulfillment,
            &inputs.physical,
            &inputs.direct_sales,
            catalog,
        )
    }

    pub fn consolidate(
        &self,
        companies: &[CompanyInputs],
        catalog: &Catalog,
    ) -> Result<ConsolidatedReport> {
        consolidate_with(companies, catalog, &self.calculator())
    }
}
