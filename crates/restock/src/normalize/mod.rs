//! Canonicalization of SKUs, column headers and locale-formatted numbers.

mod number;
mod text;

pub use number::{
    BrazilianNumberParser, NumberFormat, NumberParser, NumericInput, ParsedNumber,
    PlainNumberParser, parse_localized_number,
};
pub use text::{Sku, fold_diacritics, normalize_header, normalize_sku};
