//! Column alias resolution at the ingestion boundary.
//!
//! Uploaded tables arrive with whatever header spelling the exporting system
//! used. Each table kind declares its canonical columns and the normalized
//! header spellings accepted for each; resolution maps canonical names to
//! column positions once, so downstream code works on fixed positions.

use indexmap::IndexMap;

use crate::error::{RestockError, Result};
use crate::input::DataTable;
use crate::normalize::{NumberParser, normalize_header};

/// One canonical column and its accepted aliases.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub required: bool,
}

impl ColumnSpec {
    pub const fn required(canonical: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            canonical,
            aliases,
            required: true,
        }
    }

    pub const fn optional(canonical: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            canonical,
            aliases,
            required: false,
        }
    }
}

/// The alias table for one kind of input table.
#[derive(Debug, Clone)]
pub struct ColumnAliases {
    table: &'static str,
    columns: &'static [ColumnSpec],
}

impl ColumnAliases {
    pub const fn new(table: &'static str, columns: &'static [ColumnSpec]) -> Self {
        Self { table, columns }
    }

    /// Name of the table kind, used in error messages.
    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Resolve canonical columns against the table's headers.
    ///
    /// Headers are compared after [`normalize_header`]. Aliases are tried in
    /// declaration order, so the first listed spelling wins when a table
    /// carries several. A required column without any match is an error.
    pub fn resolve(&self, table: &DataTable) -> Result<ResolvedColumns> {
        let normalized: Vec<String> = table
            .headers
            .iter()
            .map(|h| normalize_header(h.as_str()))
            .collect();

        let mut positions = IndexMap::new();
        for spec in self.columns {
            let found = spec
                .aliases
                .iter()
                .find_map(|alias| normalized.iter().position(|h| h == alias));

            match found {
                Some(index) => {
                    positions.insert(spec.canonical, index);
                }
                None if spec.required => {
                    return Err(RestockError::Schema {
                        table: self.table.to_string(),
                        field: spec.canonical.to_string(),
                    });
                }
                None => {}
            }
        }

        Ok(ResolvedColumns {
            table: self.table,
            positions,
        })
    }
}

/// Canonical column name to column position, for one table.
#[derive(Debug, Clone)]
pub struct ResolvedColumns {
    table: &'static str,
    positions: IndexMap<&'static str, usize>,
}

impl ResolvedColumns {
    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Position of a canonical column, if present.
    pub fn get(&self, canonical: &str) -> Option<usize> {
        self.positions.get(canonical).copied()
    }

    /// Position of a column that resolution guaranteed to exist.
    pub fn require(&self, canonical: &str) -> Result<usize> {
        self.get(canonical).ok_or_else(|| RestockError::Schema {
            table: self.table.to_string(),
            field: canonical.to_string(),
        })
    }

    /// Read a numeric cell of a resolved column with strict coercion.
    ///
    /// See [`coerce_number`] for the rules.
    pub fn number(
        &self,
        table: &DataTable,
        row: usize,
        canonical: &str,
        parser: &dyn NumberParser,
    ) -> Result<f64> {
        let col = self.require(canonical)?;
        coerce_number(self.table, canonical, row, table.get(row, col), parser)
    }

    /// Like [`ResolvedColumns::number`], truncated toward zero.
    pub fn count(
        &self,
        table: &DataTable,
        row: usize,
        canonical: &str,
        parser: &dyn NumberParser,
    ) -> Result<i64> {
        self.number(table, row, canonical, parser)
            .map(|v| v.trunc() as i64)
    }
}

/// Strict numeric coercion of one cell.
///
/// Null-like cells read as `0.0`. Anything else the parser cannot read is a
/// [`RestockError::TypeCoercion`]; `row` is the zero-based data row and is
/// reported one-based.
pub fn coerce_number(
    table: &str,
    column: &str,
    row: usize,
    raw: Option<&str>,
    parser: &dyn NumberParser,
) -> Result<f64> {
    let Some(raw) = raw.filter(|v| !DataTable::is_null_value(v)) else {
        return Ok(0.0);
    };

    parser
        .parse(raw)
        .value()
        .ok_or_else(|| RestockError::TypeCoercion {
            table: table.to_string(),
            column: column.to_string(),
            row: row + 1,
            value: raw.to_string(),
        })
}
