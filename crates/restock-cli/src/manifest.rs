//! Multi-company manifest files.
//!
//! ```json
//! {
//!   "workbook": "catalogo",
//!   "companies": [
//!     {"name": "ALPHA", "fulfillment": "alpha/full.csv",
//!      "physical": "alpha/fisico.csv", "sales": "alpha/vendas.csv"}
//!   ]
//! }
//! ```
//!
//! Relative paths are resolved against the manifest's directory.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use restock::Restock;
use restock::planning::CompanyInputs;
use restock::{Catalog, ReplenishmentParams};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub workbook: PathBuf,
    pub companies: Vec<CompanyEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyEntry {
    pub name: String,
    pub fulfillment: PathBuf,
    pub physical: PathBuf,
    pub sales: PathBuf,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read manifest {}: {}", path.display(), e))?;
        let manifest: Manifest = serde_json::from_str(&content)
            .map_err(|e| format!("Invalid manifest {}: {}", path.display(), e))?;
        manifest.validate()?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        debug!(
            manifest = %path.display(),
            companies = manifest.companies.len(),
            "manifest loaded"
        );
        Ok(manifest.resolve(base))
    }

    fn validate(&self) -> Result<(), String> {
        if self.companies.is_empty() {
            return Err("Manifest lists no companies".to_string());
        }
        let mut seen = HashSet::new();
        for company in &self.companies {
            if company.name.trim().is_empty() {
                return Err("Manifest has a company without a name".to_string());
            }
            if !seen.insert(company.name.as_str()) {
                return Err(format!("Company listed twice: {}", company.name));
            }
        }
        Ok(())
    }

    fn resolve(mut self, base: &Path) -> Self {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        join(&mut self.workbook);
        for company in &mut self.companies {
            join(&mut company.fulfillment);
            join(&mut company.physical);
            join(&mut company.sales);
        }
        self
    }

    /// Build the catalog and read every company's reports.
    pub fn load_inputs(&self, restock: &Restock) -> restock::Result<(Catalog, Vec<CompanyInputs>)> {
        let catalog = restock.build_catalog(&restock.load_workbook(&self.workbook)?)?;
        let companies = self
            .companies
            .iter()
            .map(|c| restock.load_company(c.name.as_str(), &c.fulfillment, &c.physical, &c.sales))
            .collect::<restock::Result<Vec<_>>>()?;
        Ok((catalog, companies))
    }
}

/// One-line summary of the active parameters.
pub fn describe_params(params: &ReplenishmentParams) -> String {
    format!(
        "horizon {}d, lead time {}d, growth {}%",
        params.horizon_days, params.lead_time_days, params.growth_percent
    )
}
