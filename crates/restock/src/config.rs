//! Run configuration, loadable from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculation::ReplenishmentParams;
use crate::catalog::CatalogConfig;
use crate::error::{RestockError, Result};
use crate::normalize::NumberFormat;

/// Everything a replenishment run can be configured with.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```
/// use restock::RestockConfig;
///
/// let config = RestockConfig::from_json_str(r#"{"params": {"lead_time_days": 15}}"#).unwrap();
/// assert_eq!(config.params.horizon_days, 60);
/// assert_eq!(config.params.lead_time_days, 15);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestockConfig {
    pub params: ReplenishmentParams,
    pub catalog: CatalogConfig,
    /// Number format of the sales and stock reports.
    pub table_format: NumberFormat,
}

impl Default for RestockConfig {
    fn default() -> Self {
        Self {
            params: ReplenishmentParams::default(),
            catalog: CatalogConfig::default(),
            table_format: NumberFormat::Plain,
        }
    }
}

impl RestockConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| RestockError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&json)
    }

    pub fn with_params(mut self, params: ReplenishmentParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_table_format(mut self, format: NumberFormat) -> Self {
        self.table_format = format;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        if self.catalog.catalog_sheet.trim().is_empty() || self.catalog.kit_sheet.trim().is_empty() {
            return Err(RestockError::Config(
                "catalog_sheet and kit_sheet must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
