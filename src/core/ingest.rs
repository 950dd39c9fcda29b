//! Turns a raw stream record into the column/value pairs of one `events` row.

use crate::errors::{AppError, AppResult};
use crate::models::mapping::ColumnMapping;
use crate::models::record::RawRecord;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Value as SqlValue;
use serde_json::Value;

/// Maximum number of characters kept from any incoming field.
pub const MAX_FIELD_CHARS: usize = 50;

const QUOTE_CHARS: [char; 2] = ['\'', '"'];

/// A row ready to be inserted: mapped column names with their bound values.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRow {
    pub columns: Vec<String>,
    pub values: Vec<SqlValue>,
}

impl PreparedRow {
    pub fn value(&self, column: &str) -> Option<&SqlValue> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values.get(idx)
    }
}

pub struct IngestLogic;

impl IngestLogic {
    /// Check the record shape against the mapping.
    pub fn validate_shape(record: &RawRecord, mapping: &ColumnMapping) -> AppResult<()> {
        let expected = mapping.expected_len();
        if record.len() != expected {
            return Err(AppError::Validation(format!(
                "expected {expected} fields, got {}",
                record.len()
            )));
        }
        Ok(())
    }

    /// Deduplication key of the record: the field sitting at the external id's
    /// column position, coerced the same way it will be stored.
    pub fn external_id(record: &RawRecord, mapping: &ColumnMapping) -> AppResult<String> {
        Self::validate_shape(record, mapping)?;

        let missing = || AppError::Validation(format!("missing field '{}'", mapping.external_id));
        let position = mapping.external_id_position().ok_or_else(missing)?;
        let (_, raw) = record.fields().nth(position).ok_or_else(missing)?;

        coerce_field(raw).ok_or_else(|| {
            AppError::Validation(format!("field '{}' is null", mapping.external_id))
        })
    }

    /// Coerce, zip, convert dates and default numerics.
    pub fn prepare(record: &RawRecord, mapping: &ColumnMapping) -> AppResult<PreparedRow> {
        Self::validate_shape(record, mapping)?;

        let mut columns = Vec::with_capacity(mapping.expected_len());
        let mut values = Vec::with_capacity(mapping.expected_len());

        for (column, (_, raw)) in mapping.columns.iter().zip(record.fields()) {
            let mut text = coerce_field(raw);

            // Absent numerics become zero before any date conversion.
            let defaulted = mapping.is_numeric_column(column)
                && text.as_deref().is_none_or(|t| t.trim().is_empty());
            if defaulted {
                text = Some("0".to_string());
            }

            let value = if mapping.is_date_column(column) {
                let text = text.unwrap_or_else(|| "null".to_string());
                SqlValue::Text(format_timestamp(&parse_epoch(column, &text)?))
            } else if defaulted {
                SqlValue::Integer(0)
            } else {
                text.map_or(SqlValue::Null, SqlValue::Text)
            };

            columns.push(column.clone());
            values.push(value);
        }

        Ok(PreparedRow { columns, values })
    }
}

/// Text form of a JSON field: truncated to [`MAX_FIELD_CHARS`] characters,
/// then stripped of quote characters. `null` has no text form.
pub fn coerce_field(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(coerce_text(s)),
        other => Some(coerce_text(&other.to_string())),
    }
}

/// Stored form of a text value (see [`coerce_field`]).
pub fn coerce_text(text: &str) -> String {
    text.chars()
        .take(MAX_FIELD_CHARS)
        .filter(|c| !QUOTE_CHARS.contains(c))
        .collect()
}

/// Parse epoch seconds (integer or floating point) into a UTC timestamp.
/// Fractional seconds are dropped.
pub fn parse_epoch(column: &str, text: &str) -> AppResult<DateTime<Utc>> {
    let bad = || AppError::DataFormat {
        column: column.to_string(),
        value: text.to_string(),
    };

    let secs: f64 = text.trim().parse().map_err(|_| bad())?;
    if !secs.is_finite() || secs.abs() > i64::MAX as f64 {
        return Err(bad());
    }

    DateTime::<Utc>::from_timestamp(secs.trunc() as i64, 0).ok_or_else(bad)
}

/// Storage form of a timestamp, e.g. `2021-01-01T00:00:00Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
