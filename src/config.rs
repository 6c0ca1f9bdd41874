//! Validated column/separator settings
//!
//! Turns the loosely-typed `column` and `separator` entries of a loaded
//! configuration mapping into values the row splitter can use without
//! further checking: a 1-based column designator (kept in whatever
//! representation the user wrote it in) and a single-character field
//! delimiter with the `\t` escape literal translated to a real tab.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Escape literals recognized in the `separator` setting, applied before
/// length/whitespace validation. `\t` is the only documented translation.
const SEPARATOR_ESCAPES: [(&str, char); 1] = [("\\t", '\t')];

/// A `column` value in the shape the caller supplied it.
///
/// The configuration source may carry the column as a YAML integer
/// (`column: 5`) or as a digit string (`column: "5"`). Both are accepted,
/// and the original shape is kept so [`Configurator::column`] hands back
/// exactly what was set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnValue {
    Number(u64),
    Text(String),
}

impl ColumnValue {
    /// Numeric interpretation, if the value is a positive decimal integer.
    ///
    /// Text must be digits only; signs, spaces, letters, the empty string,
    /// and numbers too large for u64 are all rejected. Columns are 1-based,
    /// so zero is rejected too.
    fn as_positive_int(&self) -> Option<u64> {
        let n = match self {
            ColumnValue::Number(n) => *n,
            ColumnValue::Text(s) => {
                if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                s.parse().ok()?
            }
        };
        (n >= 1).then_some(n)
    }
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Number(n) => write!(f, "{}", n),
            ColumnValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for ColumnValue {
    fn from(n: u64) -> Self {
        ColumnValue::Number(n)
    }
}

impl From<&str> for ColumnValue {
    fn from(s: &str) -> Self {
        ColumnValue::Text(s.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(s: String) -> Self {
        ColumnValue::Text(s)
    }
}

/// Validation failures for the two settings
///
/// The inner value is the offending input; `None` means the key was
/// missing from the mapping entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `column` is not a positive decimal integer
    InvalidColumn(Option<String>),
    /// `separator` is not a single usable delimiter character
    InvalidSeparator(Option<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidColumn(Some(value)) => {
                write!(f, "invalid column {:?}: expected a positive number", value)
            }
            Self::InvalidColumn(None) => write!(f, "missing 'column' setting"),
            Self::InvalidSeparator(Some(value)) => write!(
                f,
                "invalid separator {:?}: expected a single non-space character",
                value
            ),
            Self::InvalidSeparator(None) => write!(f, "missing 'separator' setting"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validated settings for selecting one column out of delimited rows
///
/// Built once from an externally-loaded configuration mapping; both fields
/// may be reassigned afterwards, with every write re-running validation. A
/// rejected write leaves the previous valid state untouched, so downstream
/// readers never observe an invalid value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configurator {
    /// The 1-based column designator, as supplied
    column: ColumnValue,
    /// Parsed form of `column` (>= 1); written only together with it
    column_number: u64,
    /// Normalized single-character field delimiter
    separator: char,
}

impl Configurator {
    /// Build from a loaded configuration mapping
    ///
    /// The mapping must carry `column` (integer or digit string) and
    /// `separator` (string); both go through the same validation as the
    /// setters. A missing key or invalid value fails construction, so no
    /// half-configured instance can exist.
    pub fn from_mapping(mapping: &Mapping) -> Result<Self, ConfigError> {
        let column = match mapping.get("column") {
            Some(Value::Number(n)) => n
                .as_u64()
                .map(ColumnValue::Number)
                .ok_or_else(|| ConfigError::InvalidColumn(Some(n.to_string())))?,
            Some(Value::String(s)) => ColumnValue::Text(s.clone()),
            Some(other) => return Err(ConfigError::InvalidColumn(Some(yaml_repr(other)))),
            None => return Err(ConfigError::InvalidColumn(None)),
        };
        let separator = match mapping.get("separator") {
            Some(Value::String(s)) => s.as_str(),
            Some(other) => return Err(ConfigError::InvalidSeparator(Some(yaml_repr(other)))),
            None => return Err(ConfigError::InvalidSeparator(None)),
        };

        let column_number = validated_column(&column)?;
        let separator = validated_separator(separator)?;

        tracing::debug!(
            column = %column,
            separator = ?separator,
            "configuration validated"
        );

        Ok(Self {
            column,
            column_number,
            separator,
        })
    }

    /// Set the 1-based column, keeping the caller's representation
    ///
    /// Accepts a positive integer or a string of decimal digits; anything
    /// else fails with [`ConfigError::InvalidColumn`] and leaves the
    /// current column unchanged.
    pub fn set_column(&mut self, value: impl Into<ColumnValue>) -> Result<(), ConfigError> {
        let value = value.into();
        self.column_number = validated_column(&value)?;
        self.column = value;
        Ok(())
    }

    /// The column designator exactly as it was last set
    pub fn column(&self) -> &ColumnValue {
        &self.column
    }

    /// 0-based index for positional field lookup
    ///
    /// Always the numeric interpretation of [`column`](Self::column) minus
    /// one, recomputed on every call.
    pub fn column_index(&self) -> usize {
        (self.column_number - 1) as usize
    }

    /// Set the field delimiter
    ///
    /// The two-character literal `\t` is translated to a horizontal tab
    /// first. The result must be exactly one character and may not be a
    /// plain space (which would silently swallow columns) or a line break.
    /// On failure the current separator is unchanged.
    pub fn set_separator(&mut self, value: &str) -> Result<(), ConfigError> {
        self.separator = validated_separator(value)?;
        Ok(())
    }

    /// The normalized single-character delimiter
    pub fn separator(&self) -> char {
        self.separator
    }
}

fn validated_column(value: &ColumnValue) -> Result<u64, ConfigError> {
    value
        .as_positive_int()
        .ok_or_else(|| ConfigError::InvalidColumn(Some(value.to_string())))
}

fn validated_separator(value: &str) -> Result<char, ConfigError> {
    let translated = SEPARATOR_ESCAPES
        .iter()
        .find(|(literal, _)| *literal == value)
        .map(|&(_, ch)| ch);

    let ch = match translated {
        Some(ch) => ch,
        None => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => ch,
                _ => return Err(ConfigError::InvalidSeparator(Some(value.to_string()))),
            }
        }
    };

    // Tab stays legal: it is the escape target and a standard delimiter.
    // Line breaks can never occur inside a record of line-oriented input.
    if ch == ' ' || ch == '\n' || ch == '\r' {
        return Err(ConfigError::InvalidSeparator(Some(value.to_string())));
    }

    Ok(ch)
}

fn yaml_repr(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{:?}", value))
}
