use serde::Serialize;

/// Result of a successful `add_event` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    /// The row was written; carries the number of rows affected.
    Inserted(usize),
    /// The external id was already stored; nothing was written.
    DuplicateSkipped,
}

impl AddOutcome {
    /// Rows affected by the call: 1 for a fresh insert, 0 for a duplicate.
    pub fn rows_affected(&self) -> usize {
        match self {
            AddOutcome::Inserted(n) => *n,
            AddOutcome::DuplicateSkipped => 0,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, AddOutcome::DuplicateSkipped)
    }
}
