//! Error types for the Restock library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Restock operations.
#[derive(Debug, Error)]
pub enum RestockError {
    /// A required named table is absent from the workbook.
    #[error("Missing sheet: no table matching '{sheet}' was supplied")]
    MissingSheet { sheet: String },

    /// A required canonical column could not be resolved from any alias.
    #[error("Schema error in '{table}': required column '{field}' not found")]
    Schema { table: String, field: String },

    /// A non-numeric cell in a strictly numeric column.
    #[error("Type error in '{table}' at row {row}, column '{column}': cannot read '{value}' as a number")]
    TypeCoercion {
        table: String,
        column: String,
        row: usize,
        value: String,
    },

    /// Calculation parameters out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// SKU not present in any of the supplied reports.
    #[error("Unknown SKU: {0}")]
    UnknownSku(String),

    /// A quantity could not be split between companies.
    #[error("Allocation error: {0}")]
    Allocation(String),
}

impl RestockError {
    /// Whether the error comes from the uploaded data rather than the parameters.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            RestockError::MissingSheet { .. }
                | RestockError::Schema { .. }
                | RestockError::TypeCoercion { .. }
                | RestockError::Io { .. }
                | RestockError::Csv(_)
                | RestockError::EmptyData(_)
        )
    }

    /// Whether the error comes from calculation parameters.
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, RestockError::InvalidParameter(_))
    }
}

/// Result type alias for Restock operations.
pub type Result<T> = std::result::Result<T, RestockError>;
