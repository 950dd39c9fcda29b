//! Explicit, versioned mapping between the positional fields of an incoming
//! record and the columns of the `events` table.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Columns owned by the store itself; a mapping may never target them.
pub const RESERVED_COLUMNS: [&str; 4] = ["eventid", "prediction", "pred_prob", "disposition"];

/// Projection used by the review dashboard.
pub const DASHBOARD_COLUMNS: [&str; 8] = [
    "eventid",
    "prediction",
    "pred_prob",
    "disposition",
    "name",
    "org_name",
    "sale_duration2",
    "num_payouts",
];

const WEB_COLUMNS_V1: [&str; 43] = [
    "approx_payout_date",
    "body_length",
    "channels",
    "country",
    "currency",
    "delivery_method",
    "description",
    "email_domain",
    "event_created",
    "event_end",
    "event_published",
    "event_start",
    "fb_published",
    "gts",
    "has_analytics",
    "has_header",
    "has_logo",
    "listed",
    "name",
    "name_length",
    "num_order",
    "num_payouts",
    "object_id",
    "org_desc",
    "org_facebook",
    "org_name",
    "org_twitter",
    "payee_name",
    "payout_type",
    "previous_payouts",
    "sale_duration",
    "sale_duration2",
    "show_map",
    "ticket_types",
    "user_age",
    "user_created",
    "user_type",
    "venue_address",
    "venue_country",
    "venue_latitude",
    "venue_longitude",
    "venue_name",
    "venue_state",
];

const DATE_COLUMNS_V1: [&str; 6] = [
    "approx_payout_date",
    "event_created",
    "event_end",
    "event_published",
    "event_start",
    "user_created",
];

const NUMERIC_COLUMNS_V1: [&str; 3] = ["event_published", "venue_latitude", "venue_longitude"];

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
});

fn default_external_id() -> String {
    "object_id".to_string()
}

fn owned(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub version: u32,
    /// Record field holding the deduplication key.
    #[serde(default = "default_external_id")]
    pub external_id: String,
    /// Target columns, in the order the record fields arrive.
    pub columns: Vec<String>,
    /// Columns whose values arrive as epoch seconds.
    #[serde(default)]
    pub date_columns: Vec<String>,
    /// Columns that must never be stored as NULL.
    #[serde(default)]
    pub numeric_columns: Vec<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            version: 1,
            external_id: default_external_id(),
            columns: owned(&WEB_COLUMNS_V1),
            date_columns: owned(&DATE_COLUMNS_V1),
            numeric_columns: owned(&NUMERIC_COLUMNS_V1),
        }
    }
}

impl ColumnMapping {
    /// Load a mapping from a YAML file and validate it.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read column mapping {}: {e}", path.display()))
        })?;
        let mapping: ColumnMapping = serde_yaml::from_str(&content)?;
        mapping.validate()?;
        Ok(mapping)
    }

    /// Number of fields an incoming record must carry.
    pub fn expected_len(&self) -> usize {
        self.columns.len()
    }

    /// Index of the external id among the mapped columns.
    pub fn external_id_position(&self) -> Option<usize> {
        self.columns.iter().position(|c| *c == self.external_id)
    }

    pub fn is_date_column(&self, column: &str) -> bool {
        self.date_columns.iter().any(|c| c == column)
    }

    pub fn is_numeric_column(&self, column: &str) -> bool {
        self.numeric_columns.iter().any(|c| c == column)
    }

    /// Header of the full row: store-owned columns first, then the mapped ones.
    pub fn full_header(&self) -> Vec<String> {
        RESERVED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.columns.iter().cloned())
            .collect()
    }

    /// Check that the mapping can be used to build SQL safely.
    pub fn validate(&self) -> AppResult<()> {
        if self.columns.is_empty() {
            return Err(AppError::Validation(
                "column mapping has no columns".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for col in &self.columns {
            if !IDENTIFIER.is_match(col) {
                return Err(AppError::Validation(format!(
                    "column '{col}' is not a valid SQL identifier"
                )));
            }
            if RESERVED_COLUMNS.contains(&col.to_ascii_lowercase().as_str()) {
                return Err(AppError::Validation(format!(
                    "column '{col}' is reserved by the store"
                )));
            }
            if !seen.insert(col.to_ascii_lowercase()) {
                return Err(AppError::Validation(format!(
                    "column '{col}' appears more than once"
                )));
            }
        }

        if !self.columns.contains(&self.external_id) {
            return Err(AppError::Validation(format!(
                "external id '{}' is not a mapped column",
                self.external_id
            )));
        }

        for col in self.date_columns.iter().chain(&self.numeric_columns) {
            if !self.columns.contains(col) {
                return Err(AppError::Validation(format!(
                    "column '{col}' is not part of the mapping"
                )));
            }
        }

        // Dashboard projection must be satisfiable.
        for col in DASHBOARD_COLUMNS.iter().skip(RESERVED_COLUMNS.len()) {
            if !self.columns.iter().any(|c| c == *col) {
                return Err(AppError::Validation(format!(
                    "dashboard column '{col}' is missing from the mapping"
                )));
            }
        }

        Ok(())
    }
}
