//! Import layer: raw tables, named workbooks and the delimited-file parser.
//!
//! Everything here is upstream of the calculation; nothing in the
//! calculation modules touches the file system.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata, Workbook};
