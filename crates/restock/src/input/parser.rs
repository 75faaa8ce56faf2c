//! Delimited-file parser with delimiter and encoding detection.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, WINDOWS_1252};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::{DataTable, SourceMetadata, Workbook};
use crate::error::{RestockError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b';', b',', b'|'];

/// File extensions loaded as workbook sheets.
const SHEET_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Reads uploaded spreadsheet exports into [`DataTable`]s.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the table and its metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|e| RestockError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let hash = format!("sha256:{:x}", Sha256::digest(&bytes));
        let (text, encoding) = decode(&bytes);
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&text)?,
        };

        let table = self.parse_text(&text, delimiter)?;
        debug!(
            file = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            encoding,
            "loaded table"
        );

        let metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            bytes.len() as u64,
            format_name(delimiter).to_string(),
            encoding.to_string(),
            &table,
        );

        Ok((table, metadata))
    }

    /// Parse in-memory text, detecting the delimiter.
    pub fn parse_str(&self, text: &str) -> Result<DataTable> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(text)?,
        };
        self.parse_text(text, delimiter)
    }

    /// Load every delimited file in `dir` as a sheet named after its file stem.
    ///
    /// Sheets are ordered by file name so lookups are reproducible.
    pub fn parse_dir(&self, dir: impl AsRef<Path>) -> Result<Workbook> {
        let dir = dir.as_ref();
        let io_err = |e: std::io::Error| RestockError::Io {
            path: dir.to_path_buf(),
            source: e,
        };

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            let is_sheet = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| SHEET_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));
            if path.is_file() && is_sheet {
                paths.push(path);
            }
        }
        paths.sort();

        let mut workbook = Workbook::new();
        for path in paths {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let (table, _) = self.parse_file(&path)?;
            workbook.insert(name, table);
        }

        if workbook.is_empty() {
            return Err(RestockError::EmptyData(format!(
                "no delimited files found in '{}'",
                dir.display()
            )));
        }

        Ok(workbook)
    }

    fn parse_text(&self, text: &str, delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(RestockError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for result in reader.records() {
            if self.config.max_rows.is_some_and(|max| rows.len() >= max) {
                break;
            }

            let record = result?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }

            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            row.resize(expected_cols, String::new());
            rows.push(row);
        }

        Ok(DataTable::new(headers, rows))
    }
}

/// Decode file bytes: BOM first, then UTF-8, falling back to Windows-1252.
fn decode(bytes: &[u8]) -> (Cow<'_, str>, &'static str) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (text, encoding.name());
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => (Cow::Borrowed(text), "UTF-8"),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            (text, WINDOWS_1252.name())
        }
    }
}

fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

/// Detect the delimiter by analyzing the first few lines.
///
/// A delimiter that appears the same number of times on every line wins;
/// semicolons are preferred over commas on ties because Brazilian exports
/// use the comma as decimal separator.
fn detect_delimiter(text: &str) -> Result<u8> {
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(10)
        .collect();

    if lines.is_empty() {
        return Err(RestockError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for (rank, &delim) in DELIMITERS.iter().enumerate() {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let bonus = DELIMITERS.len() - rank;
        let score = if consistent {
            first_count * 1000 + bonus
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
