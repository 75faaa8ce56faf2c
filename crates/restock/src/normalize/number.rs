//! Locale-aware number parsing.
//!
//! Uploaded spreadsheets mix formats: Brazilian exports write `R$ 1.234,56`,
//! international ones `1,234.56`. Parsing never fails; an unreadable value is
//! reported as [`ParsedNumber::NotANumber`] and the caller picks the default.

use serde::{Deserialize, Serialize};

/// Result of parsing a numeric-looking value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedNumber {
    /// A finite number.
    Value(f64),
    /// Empty, missing or unparsable input.
    NotANumber,
}

impl ParsedNumber {
    /// The parsed value, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            ParsedNumber::Value(v) => Some(v),
            ParsedNumber::NotANumber => None,
        }
    }

    /// The parsed value or `default`.
    pub fn unwrap_or(self, default: f64) -> f64 {
        self.value().unwrap_or(default)
    }

    pub fn is_not_a_number(self) -> bool {
        matches!(self, ParsedNumber::NotANumber)
    }
}

impl From<f64> for ParsedNumber {
    fn from(value: f64) -> Self {
        if value.is_finite() {
            ParsedNumber::Value(value)
        } else {
            ParsedNumber::NotANumber
        }
    }
}

impl From<Option<f64>> for ParsedNumber {
    fn from(value: Option<f64>) -> Self {
        value.map_or(ParsedNumber::NotANumber, ParsedNumber::from)
    }
}

/// A raw value handed to [`parse_localized_number`].
#[derive(Debug, Clone, Copy)]
pub enum NumericInput<'a> {
    Text(&'a str),
    Number(f64),
    Missing,
}

impl<'a> From<&'a str> for NumericInput<'a> {
    fn from(value: &'a str) -> Self {
        NumericInput::Text(value)
    }
}

impl<'a> From<Option<&'a str>> for NumericInput<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(NumericInput::Missing, NumericInput::Text)
    }
}

impl From<f64> for NumericInput<'_> {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<i64> for NumericInput<'_> {
    fn from(value: i64) -> Self {
        NumericInput::Number(value as f64)
    }
}

/// Strategy for reading numbers written in a given locale.
pub trait NumberParser: Send + Sync {
    /// Parse a textual value.
    fn parse(&self, raw: &str) -> ParsedNumber;

    /// Parse a value that may already be numeric or missing.
    fn parse_input(&self, input: NumericInput<'_>) -> ParsedNumber {
        match input {
            NumericInput::Text(raw) => self.parse(raw),
            NumericInput::Number(value) => ParsedNumber::from(value),
            NumericInput::Missing => ParsedNumber::NotANumber,
        }
    }
}

/// Brazilian format: `R$` prefix, `.` thousands, `,` decimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrazilianNumberParser;

impl NumberParser for BrazilianNumberParser {
    fn parse(&self, raw: &str) -> ParsedNumber {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ParsedNumber::NotANumber;
        }

        let cleaned = trimmed
            .replace("R$", "")
            .replace('.', "")
            .replace([' ', '\u{a0}'], "")
            .replace(',', ".");

        cleaned.parse::<f64>().ok().into()
    }
}

/// International format: `,` thousands, `.` decimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainNumberParser;

impl NumberParser for PlainNumberParser {
    fn parse(&self, raw: &str) -> ParsedNumber {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ParsedNumber::NotANumber;
        }

        let cleaned = trimmed.replace([',', ' ', '\u{a0}'], "");
        let cleaned = cleaned.strip_prefix('$').unwrap_or(&cleaned);

        cleaned.parse::<f64>().ok().into()
    }
}

/// Selectable number format, for configuration files and CLI flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    /// `R$ 1.234,56`
    #[default]
    Brazilian,
    /// `1,234.56`
    Plain,
}

impl NumberParser for NumberFormat {
    fn parse(&self, raw: &str) -> ParsedNumber {
        match self {
            NumberFormat::Brazilian => BrazilianNumberParser.parse(raw),
            NumberFormat::Plain => PlainNumberParser.parse(raw),
        }
    }
}

/// Parse a Brazilian-formatted number.
///
/// ```
/// use restock::normalize::{parse_localized_number, ParsedNumber};
///
/// assert_eq!(parse_localized_number("R$ 1.234,56"), ParsedNumber::Value(1234.56));
/// assert_eq!(parse_localized_number(""), ParsedNumber::NotANumber);
/// assert_eq!(parse_localized_number(7.5), ParsedNumber::Value(7.5));
/// ```
pub fn parse_localized_number<'a>(value: impl Into<NumericInput<'a>>) -> ParsedNumber {
    BrazilianNumberParser.parse_input(value.into())
}
