//! Borrowed scalar values passed into and read out of columns

use std::borrow::Cow;

use super::schema::ColumnType;

/// Sentinel stored in Integer columns for an empty field.
///
/// A literal `-9223372036854775808` in the data is stored as the same value and reads back as
/// missing.
pub const INT_MISSING: i64 = i64::MIN;

/// Sentinel stored in Float columns for an empty field.
///
/// Positive infinity doubles as the sentinel, so a genuine `inf` value is indistinguishable from
/// a missing one: it renders as `NULL`/`null` and is counted by [`Column::missing_count`].
/// Negative infinity and NaN are ordinary values.
///
/// [`Column::missing_count`]: super::Column::missing_count
pub const FLOAT_MISSING: f64 = f64::INFINITY;

/// A single typed value.
///
/// Text borrows from wherever it came from (a line buffer on the way in, column storage on the
/// way out). Columns copy text into owned storage on append.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Integer(i64),
    Float(f64),
    Text(&'a str),
}

impl<'a> Scalar<'a> {
    /// Type tag matching this value's representation
    pub fn column_type(&self) -> ColumnType {
        match self {
            Scalar::Integer(_) => ColumnType::Integer,
            Scalar::Float(_) => ColumnType::Float,
            Scalar::Text(_) => ColumnType::Text,
        }
    }

    /// The "missing" value for a column type.
    ///
    /// Text has no sentinel: an empty field is stored as the empty string.
    pub fn missing(column_type: ColumnType) -> Scalar<'static> {
        match column_type {
            ColumnType::Integer => Scalar::Integer(INT_MISSING),
            ColumnType::Float => Scalar::Float(FLOAT_MISSING),
            ColumnType::Text => Scalar::Text(""),
        }
    }

    /// Check if the value is a numeric missing sentinel
    pub fn is_missing(&self) -> bool {
        match self {
            Scalar::Integer(i) => *i == INT_MISSING,
            Scalar::Float(f) => *f == FLOAT_MISSING,
            Scalar::Text(_) => false,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Scalar::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&'a str> {
        match *self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to a display string, rendering sentinels as `NULL`
    pub fn display(&self) -> Cow<'a, str> {
        if self.is_missing() {
            return Cow::Borrowed("NULL");
        }
        match *self {
            Scalar::Integer(i) => Cow::Owned(i.to_string()),
            Scalar::Float(f) => Cow::Owned(f.to_string()),
            Scalar::Text(s) => Cow::Borrowed(s),
        }
    }
}

impl std::fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<i64> for Scalar<'_> {
    fn from(i: i64) -> Self {
        Scalar::Integer(i)
    }
}

impl From<f64> for Scalar<'_> {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

impl<'a> From<&'a str> for Scalar<'a> {
    fn from(s: &'a str) -> Self {
        Scalar::Text(s)
    }
}
