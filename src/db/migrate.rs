use crate::db::queries::quote_ident;
use crate::errors::AppResult;
use crate::models::mapping::ColumnMapping;
use rusqlite::{Connection, OptionalExtension};
use tracing::info;

/// Schema version recorded in `PRAGMA user_version` after bootstrap.
pub const SCHEMA_VERSION: i64 = 1;

/// Check if the `events` table exists.
fn events_table_exists(conn: &Connection) -> AppResult<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='events'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Column names currently present on `events`.
fn events_columns(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA table_info('events')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;
    Ok(cols.collect::<Result<Vec<_>, _>>()?)
}

/// SQL type declaration for a mapped column.
fn column_decl(mapping: &ColumnMapping, column: &str) -> &'static str {
    let date = mapping.is_date_column(column);
    let numeric = mapping.is_numeric_column(column);
    match (date, numeric) {
        (true, true) => "TEXT NOT NULL DEFAULT '1970-01-01T00:00:00Z'",
        (true, false) => "TEXT",
        (false, true) => "REAL NOT NULL DEFAULT 0",
        (false, false) => "TEXT",
    }
}

/// Create the `events` table for the given mapping.
fn create_events_table(conn: &Connection, mapping: &ColumnMapping) -> AppResult<()> {
    let mapped: Vec<String> = mapping
        .columns
        .iter()
        .map(|c| format!("    {} {}", quote_ident(c), column_decl(mapping, c)))
        .collect();

    let sql = format!(
        "CREATE TABLE IF NOT EXISTS events (
    eventid      INTEGER PRIMARY KEY AUTOINCREMENT,
    prediction   TEXT,
    pred_prob    REAL,
    disposition  TEXT,
{}
);",
        mapped.join(",\n")
    );
    conn.execute_batch(&sql)?;
    Ok(())
}

fn ensure_indexes(conn: &Connection, mapping: &ColumnMapping) -> AppResult<()> {
    conn.execute_batch(&format!(
        "CREATE INDEX IF NOT EXISTS idx_events_external_id ON events({});
         CREATE INDEX IF NOT EXISTS idx_events_prediction ON events(prediction);
         CREATE INDEX IF NOT EXISTS idx_events_disposition ON events(disposition);",
        quote_ident(&mapping.external_id)
    ))?;
    Ok(())
}

/// Add mapped columns the existing table does not have yet
/// (a newer mapping version may extend the record).
fn migrate_add_missing_columns(conn: &Connection, mapping: &ColumnMapping) -> AppResult<usize> {
    let existing = events_columns(conn)?;
    let mut added = 0;

    for col in &mapping.columns {
        if existing.iter().any(|e| e.eq_ignore_ascii_case(col)) {
            continue;
        }
        conn.execute_batch(&format!(
            "ALTER TABLE events ADD COLUMN {} {};",
            quote_ident(col),
            column_decl(mapping, col)
        ))?;
        info!(column = %col, "added column to events table");
        added += 1;
    }

    Ok(added)
}

pub fn schema_version(conn: &Connection) -> AppResult<i64> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Public entry point: bring the `events` table in line with the mapping.
///
/// Invoked by `db::initialize::init_db()`. Safe to call repeatedly.
pub fn run_pending_migrations(conn: &Connection, mapping: &ColumnMapping) -> AppResult<()> {
    if events_table_exists(conn)? {
        let added = migrate_add_missing_columns(conn, mapping)?;
        if added > 0 {
            info!(added, mapping_version = mapping.version, "events table extended");
        }
    } else {
        create_events_table(conn, mapping)?;
        info!(
            columns = mapping.expected_len(),
            mapping_version = mapping.version,
            "created events table"
        );
    }

    ensure_indexes(conn, mapping)?;

    if schema_version(conn)? < SCHEMA_VERSION {
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    }

    Ok(())
}
