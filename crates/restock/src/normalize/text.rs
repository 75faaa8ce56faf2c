//! SKU and header canonicalization.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

// Characters replaced by an underscore in column headers.
const HEADER_SEPARATORS: &[char] = &[' ', '-', '(', ')', '/', '\\', '[', ']', '.', ',', ';', ':'];

static REPEATED_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}").unwrap());

/// A normalized stock keeping unit identifier.
///
/// The only way to build a `Sku` is through [`normalize_sku`] (or the
/// equivalent [`Sku::new`]), so two values that differ only by case, accents
/// or surrounding whitespace always compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Normalize a raw value into a SKU.
    pub fn new(raw: &str) -> Self {
        let upper = raw.to_uppercase();
        let folded = fold_diacritics(&upper).to_uppercase();
        Sku(folded.trim().to_string())
    }

    /// The normalized identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier is empty (missing in the source row).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Sku {
    fn from(raw: &str) -> Self {
        Sku::new(raw)
    }
}

impl<'de> Deserialize<'de> for Sku {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Sku::new(&raw))
    }
}

/// Normalize a SKU: strip diacritics, trim whitespace, uppercase.
///
/// A missing value yields the empty SKU.
///
/// ```
/// use restock::normalize_sku;
///
/// assert_eq!(normalize_sku("  full-sku ç ").as_str(), "FULL-SKU C");
/// assert!(normalize_sku(None).is_empty());
/// ```
pub fn normalize_sku<'a>(value: impl Into<Option<&'a str>>) -> Sku {
    match value.into() {
        Some(raw) => Sku::new(raw),
        None => Sku::default(),
    }
}

/// Normalize a column header to `snake_case` ASCII.
///
/// ```
/// use restock::normalize_header;
///
/// assert_eq!(normalize_header("Qtd. por Kit"), "qtd_por_kit");
/// assert_eq!(normalize_header("Status (Reposição)"), "status_reposicao");
/// ```
pub fn normalize_header<'a>(value: impl Into<Option<&'a str>>) -> String {
    let Some(raw) = value.into() else {
        return String::new();
    };

    let lowered = fold_diacritics(raw).to_lowercase();
    let replaced: String = lowered
        .trim()
        .chars()
        .map(|c| if HEADER_SEPARATORS.contains(&c) { '_' } else { c })
        .collect();

    REPEATED_UNDERSCORES
        .replace_all(&replaced, "_")
        .trim_matches('_')
        .to_string()
}

/// Replace accented Latin letters with their ASCII base letters.
///
/// Covers Latin-1 Supplement and Latin Extended-A; combining diacritical
/// marks (U+0300..U+036F) are dropped and a no-break space becomes a space.
/// Case is preserved. Anything else passes through unchanged.
pub fn fold_diacritics(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match fold_char(c) {
            Some(base) if c.is_uppercase() => out.push_str(base),
            Some(base) => out.extend(base.chars().map(|b| b.to_ascii_lowercase())),
            None if is_combining_mark(c) => {}
            None if c == '\u{a0}' => out.push(' '),
            None => out.push(c),
        }
    }
    out
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Uppercase ASCII replacement for a folded letter.
fn fold_char(c: char) -> Option<&'static str> {
    let base = match c {
        'À'..='Å' | 'à'..='å' | 'ª' | 'Ā'..='ą' => "A",
        'Æ' | 'æ' => "AE",
        'Ç' | 'ç' | 'Ć'..='č' => "C",
        'Ð' | 'ð' | 'Ď'..='đ' => "D",
        'È'..='Ë' | 'è'..='ë' | 'Ē'..='ě' => "E",
        'Ĝ'..='ģ' => "G",
        'Ĥ'..='ħ' => "H",
        'Ì'..='Ï' | 'ì'..='ï' | 'Ĩ'..='ı' => "I",
        'Ĳ' | 'ĳ' => "IJ",
        'Ĵ' | 'ĵ' => "J",
        'Ķ' | 'ķ' => "K",
        'ĸ' => "Q",
        'Ĺ'..='ł' => "L",
        'Ñ' | 'ñ' | 'Ń'..='ň' | 'Ŋ' | 'ŋ' => "N",
        'ŉ' => "'N",
        'Ò'..='Ö' | 'Ø' | 'ò'..='ö' | 'ø' | 'º' | 'Ō'..='ő' => "O",
        'Œ' | 'œ' => "OE",
        'Ŕ'..='ř' => "R",
        'Ś'..='š' | 'ſ' => "S",
        'ß' => "SS",
        'Ţ'..='ŧ' => "T",
        'Þ' | 'þ' => "TH",
        'Ù'..='Ü' | 'ù'..='ü' | 'Ũ'..='ų' => "U",
        'Ŵ' | 'ŵ' => "W",
        'Ý' | 'ý' | 'ÿ' | 'Ŷ'..='Ÿ' => "Y",
        'Ź'..='ž' => "Z",
        _ => return None,
    };
    Some(base)
}
