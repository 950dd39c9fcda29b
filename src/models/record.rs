use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One record from the ingestion stream.
///
/// Field order is significant: values are matched to columns by position,
/// so the underlying map keeps insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style append, mostly used by ingestion tests and fixtures.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.to_string(), value.into())
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.shift_remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Parse a batch of records: one JSON object, a JSON array of objects,
    /// or JSON Lines (one object per non-empty line).
    pub fn parse_many(content: &str) -> AppResult<Vec<RawRecord>> {
        let trimmed = content.trim_start();

        if trimmed.starts_with('[') {
            return Ok(serde_json::from_str(trimmed)?);
        }

        if let Ok(single) = serde_json::from_str::<RawRecord>(trimmed) {
            return Ok(vec![single]);
        }

        trimmed
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line).map_err(|e| {
                    AppError::Validation(format!("line {}: not a JSON object: {e}", i + 1))
                })
            })
            .collect()
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
