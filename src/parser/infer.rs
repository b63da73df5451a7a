//! Type inference from the sample row and per-type field parsing

use crate::config::FloatPolicy;
use crate::model::{ColumnType, Scalar};

/// Decide a field's type by trying integer, then float, then falling back to text.
///
/// Returns the parsed value; its [`Scalar::column_type`] is the inferred type. An empty field
/// is text, since neither numeric parser accepts it.
pub fn infer(field: &str, policy: FloatPolicy) -> Scalar<'_> {
    if let Some(i) = parse_integer(field) {
        return Scalar::Integer(i);
    }
    if let Some(f) = parse_float(field, policy) {
        return Scalar::Float(f);
    }
    Scalar::Text(field)
}

/// Parse a data field for a column already bound to `column_type`.
///
/// Numeric fields that are empty after trimming map to the column's missing sentinel. Text is
/// returned verbatim. `None` means the field does not parse as `column_type`.
pub fn parse_as(field: &str, column_type: ColumnType, policy: FloatPolicy) -> Option<Scalar<'_>> {
    if column_type.is_numeric() && field.trim().is_empty() {
        return Some(Scalar::missing(column_type));
    }
    match column_type {
        ColumnType::Integer => parse_integer(field).map(Scalar::Integer),
        ColumnType::Float => parse_float(field, policy).map(Scalar::Float),
        ColumnType::Text => Some(Scalar::Text(field)),
    }
}

/// The whole trimmed field must be an `i64`
fn parse_integer(field: &str) -> Option<i64> {
    field.trim().parse().ok()
}

fn parse_float(field: &str, policy: FloatPolicy) -> Option<f64> {
    let trimmed = field.trim();
    let literal = match policy {
        FloatPolicy::Strict => trimmed,
        FloatPolicy::Prefix => float_prefix(trimmed)?,
    };
    let value: f64 = literal.parse().ok()?;
    // overflow to infinity is a range error unless the literal spelled it out
    if value.is_infinite() && !literal.to_ascii_lowercase().contains("inf") {
        return None;
    }
    Some(value)
}

/// Longest leading slice of `s` that is a decimal float literal
fn float_prefix(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    for word in ["infinity", "inf", "nan"] {
        let candidate = s.get(end..end + word.len());
        if candidate.is_some_and(|c| c.eq_ignore_ascii_case(word)) {
            return Some(&s[..end + word.len()]);
        }
    }

    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_digits = digits_from(end);
    end += int_digits;
    let mut mantissa_digits = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
            mantissa_digits += frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    Some(&s[..end])
}
