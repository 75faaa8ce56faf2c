//! In-memory tables, workbooks and source metadata.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::parser::Parser;
use crate::error::Result;

/// Metadata about a loaded data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Detected encoding.
    pub encoding: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        encoding: String,
        table: &DataTable,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            encoding,
            row_count: table.row_count(),
            column_count: table.column_count(),
            loaded_at: Utc::now(),
        }
    }
}

/// Raw tabular data with string cells, as uploaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataTable {
    /// Column headers, exactly as supplied.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from string slices.
    ///
    /// ```
    /// use restock::DataTable;
    ///
    /// let table = DataTable::from_slices(&["SKU", "Quantidade"], &[&["KIT-A", "3"]]);
    /// assert_eq!(table.get(0, 1), Some("3"));
    /// ```
    pub fn from_slices(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get all values for a column by index. Short rows read as empty cells.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Get a cell, treating null-like values as missing.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.get(row, col).filter(|v| !Self::is_null_value(v))
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed == "."
            || trimmed == "-"
    }
}

/// Named tables in supply order, like the sheets of a spreadsheet file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    sheets: IndexMap<String, DataTable>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every delimited file in `dir` with the default parser.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Parser::new().parse_dir(dir)
    }

    /// Add a sheet, replacing any sheet with the same name.
    pub fn insert(&mut self, name: impl Into<String>, table: DataTable) {
        self.sheets.insert(name.into(), table);
    }

    /// Builder-style [`Workbook::insert`].
    pub fn with_sheet(mut self, name: impl Into<String>, table: DataTable) -> Self {
        self.insert(name, table);
        self
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(|k| k.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&DataTable> {
        self.sheets.get(name)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// First sheet whose name contains `needle`, ignoring case.
    pub fn find_sheet(&self, needle: &str) -> Option<(&str, &DataTable)> {
        self.find_sheet_except(needle, None)
    }

    /// Like [`Workbook::find_sheet`], skipping the sheet named `skip`.
    pub fn find_sheet_except(
        &self,
        needle: &str,
        skip: Option<&str>,
    ) -> Option<(&str, &DataTable)> {
        let needle = needle.to_uppercase();
        self.sheets
            .iter()
            .filter(|(name, _)| Some(name.as_str()) != skip)
            .find(|(name, _)| name.to_uppercase().contains(&needle))
            .map(|(name, table)| (name.as_str(), table))
    }
}
