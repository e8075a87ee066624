//! SQL literal rendering.
//!
//! Text is single-quoted with embedded quotes doubled and nothing else
//! escaped. Numbers are bare. Conversion failures abort the run.

use crate::error::{LibrittsError, Result};

/// Quote a text value as a SQL string literal.
pub fn text(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Quote an optional text value, rendering `None` as `NULL`.
pub fn nullable_text(value: Option<&str>) -> String {
    value.map_or_else(|| "NULL".to_string(), text)
}

/// Render an identifier or other integer column.
pub fn integer(value: &str, table: &'static str, field: &'static str) -> Result<String> {
    value
        .parse::<i64>()
        .map(|n| n.to_string())
        .map_err(|_| invalid(value, table, field))
}

/// Render a REAL column. Always carries a decimal point (`10` becomes `10.0`).
pub fn real(value: &str, table: &'static str, field: &'static str) -> Result<String> {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(format!("{n:?}")),
        _ => Err(invalid(value, table, field)),
    }
}

fn invalid(value: &str, table: &'static str, field: &'static str) -> LibrittsError {
    LibrittsError::InvalidNumber {
        table,
        field,
        value: value.to_string(),
    }
}
