//! Cell values and cell-level normalization.
//!
//! Every value read from a sheet or CSV file is a [`CellValue`]. Before a
//! table is classified its cells pass through [`normalize_cell`], which turns
//! blank and NaN-like values into "absent" (`None`) and strips formatting
//! noise such as surrounding whitespace and wrapping quotes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tokens accepted as `true` by [`coerce_bool`] (compared lowercased).
pub const TRUTHY_TOKENS: &[&str] = &["true", "1", "yes", "y", "t"];

/// A single cell as delivered by a tabular reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Missing,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for `Missing` and for floats that are NaN.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Float(value) => value.is_nan(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Missing => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Normalizes a cell, returning `None` when the cell carries no value.
///
/// Text is trimmed and unwrapped from matching quote pairs (see
/// [`strip_wrapping_quotes`]); text that ends up empty is absent. Numbers
/// and booleans pass through, except NaN which is absent.
pub fn normalize_cell(cell: CellValue) -> Option<CellValue> {
    match cell {
        CellValue::Missing => None,
        CellValue::Float(value) if value.is_nan() => None,
        CellValue::Text(value) => {
            let stripped = strip_wrapping_quotes(&value);
            if stripped.is_empty() {
                None
            } else if stripped.len() == value.len() {
                Some(CellValue::Text(value))
            } else {
                Some(CellValue::Text(stripped.to_string()))
            }
        }
        other => Some(other),
    }
}

/// Strips whitespace and any number of matching wrapping quote layers.
///
/// A layer is removed only when the first and last characters are the same
/// quote character (`'` or `"`). Interior characters are never touched, so
/// backticks, `{CUBE}` placeholders and embedded quotes survive.
pub fn strip_wrapping_quotes(raw: &str) -> &str {
    let mut value = raw.trim();
    loop {
        let bytes = value.as_bytes();
        if bytes.len() < 2 {
            return value;
        }
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first != last || !matches!(first, b'"' | b'\'') {
            return value;
        }
        value = value[1..value.len() - 1].trim();
    }
}

/// Interprets a cell as a boolean flag.
///
/// Returns `None` when the cell is missing or blank so callers can tell
/// "not specified" apart from "explicitly false". Any other text that is not
/// one of [`TRUTHY_TOKENS`] is `Some(false)`.
pub fn coerce_bool(cell: &CellValue) -> Option<bool> {
    match cell {
        CellValue::Bool(value) => Some(*value),
        other if other.is_missing() => None,
        other => {
            let token = other.to_string().trim().to_lowercase();
            if token.is_empty() {
                None
            } else {
                Some(TRUTHY_TOKENS.contains(&token.as_str()))
            }
        }
    }
}

/// Collapses multi-line text into a single line.
///
/// Line breaks and runs of whitespace become one space; the result is trimmed.
pub fn collapse_multiline(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_nested_quote_layers() {
        assert_eq!(strip_wrapping_quotes("\"'table'\""), "table");
        assert_eq!(strip_wrapping_quotes("  \" 'orders' \"  "), "orders");
    }

    #[test]
    fn keeps_interior_characters() {
        assert_eq!(strip_wrapping_quotes("\"`name`\""), "`name`");
        assert_eq!(strip_wrapping_quotes("{CUBE}.field"), "{CUBE}.field");
        assert_eq!(strip_wrapping_quotes("'a' = 'b'"), "a' = 'b");
        assert_eq!(strip_wrapping_quotes("\"mixed'"), "\"mixed'");
        assert_eq!(strip_wrapping_quotes("\""), "\"");
    }

    #[test]
    fn normalize_blank_and_nan_are_absent() {
        assert_eq!(normalize_cell(CellValue::Missing), None);
        assert_eq!(normalize_cell(CellValue::text("   ")), None);
        assert_eq!(normalize_cell(CellValue::text("''")), None);
        assert_eq!(normalize_cell(CellValue::Float(f64::NAN)), None);
    }

    #[test]
    fn normalize_passes_typed_values() {
        assert_eq!(normalize_cell(CellValue::Int(3)), Some(CellValue::Int(3)));
        assert_eq!(
            normalize_cell(CellValue::Bool(false)),
            Some(CellValue::Bool(false))
        );
        assert_eq!(
            normalize_cell(CellValue::text(" orders ")),
            Some(CellValue::text("orders"))
        );
    }

    #[test]
    fn coerce_bool_tokens() {
        for token in ["Yes", "1", "true", "Y", "T", " TRUE "] {
            assert_eq!(coerce_bool(&CellValue::text(token)), Some(true), "{token}");
        }
        for token in ["no", "0", "false", "n", "maybe"] {
            assert_eq!(coerce_bool(&CellValue::text(token)), Some(false), "{token}");
        }
        assert_eq!(coerce_bool(&CellValue::text("")), None);
        assert_eq!(coerce_bool(&CellValue::Missing), None);
        assert_eq!(coerce_bool(&CellValue::Bool(false)), Some(false));
        assert_eq!(coerce_bool(&CellValue::Int(1)), Some(true));
        assert_eq!(coerce_bool(&CellValue::Float(1.0)), Some(true));
    }

    #[test]
    fn collapses_line_breaks() {
        assert_eq!(
            collapse_multiline("  first line\r\nsecond\n\n  third\tpart "),
            "first line second third part"
        );
    }
}
