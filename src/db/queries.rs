//! Raw SQL against the `events` table.
//!
//! Values are always bound as parameters. Identifiers only ever come from a
//! validated `ColumnMapping` or from the constants in `models::mapping`.

use crate::core::ingest::PreparedRow;
use crate::errors::AppResult;
use crate::models::mapping::DASHBOARD_COLUMNS;
use crate::models::table::{EventTable, cell_from_sql};
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, ToSql, params, params_from_iter};
use tracing::debug;

/// Double-quote an identifier for SQLite.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn select_list(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Run a SELECT and collect every row under the given header.
fn load_table(
    conn: &Connection,
    sql: &str,
    header: Vec<String>,
    params: &[&dyn ToSql],
) -> AppResult<EventTable> {
    let mut stmt = conn.prepare_cached(sql)?;
    let width = header.len();

    let rows = stmt.query_map(params, |row| {
        (0..width)
            .map(|i| row.get::<_, SqlValue>(i).map(cell_from_sql))
            .collect::<rusqlite::Result<Vec<_>>>()
    })?;

    let mut out = EventTable::empty(header);
    for r in rows {
        out.rows.push(r?);
    }

    debug!(rows = out.len(), "query returned");
    Ok(out)
}

/// Number of rows whose external id equals `value`.
pub fn count_by_external_id(conn: &Connection, column: &str, value: &str) -> AppResult<i64> {
    let sql = format!("SELECT count(*) FROM events WHERE {} = ?1", quote_ident(column));
    let count = conn.query_row(&sql, [value], |row| row.get(0))?;
    Ok(count)
}

/// Insert one prepared row. Returns the number of rows affected.
pub fn insert_row(conn: &Connection, row: &PreparedRow) -> AppResult<usize> {
    let placeholders: Vec<String> = (1..=row.values.len()).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "INSERT INTO events ({}) VALUES ({})",
        select_list(&row.columns),
        placeholders.join(", ")
    );

    let mut stmt = conn.prepare_cached(&sql)?;
    let n = stmt.execute(params_from_iter(row.values.iter()))?;
    Ok(n)
}

/// Every row still waiting for a prediction.
pub fn load_pending(conn: &Connection, header: Vec<String>) -> AppResult<EventTable> {
    let sql = format!(
        "SELECT {} FROM events WHERE prediction IS NULL ORDER BY eventid ASC",
        select_list(&header)
    );
    load_table(conn, &sql, header, &[])
}

/// Dashboard projection, newest first.
pub fn load_event_list(conn: &Connection, include_all: bool) -> AppResult<EventTable> {
    let header: Vec<String> = DASHBOARD_COLUMNS.iter().map(|c| c.to_string()).collect();
    let filter = if include_all {
        ""
    } else {
        " WHERE disposition IS NULL"
    };
    let sql = format!(
        "SELECT {} FROM events{} ORDER BY eventid DESC",
        select_list(&header),
        filter
    );
    load_table(conn, &sql, header, &[])
}

pub fn update_prediction(
    conn: &Connection,
    event_id: i64,
    prediction: &str,
    probability: f64,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE events SET prediction = ?1, pred_prob = ?2 WHERE eventid = ?3",
        params![prediction, probability, event_id],
    )?;
    Ok(n)
}

pub fn update_disposition(conn: &Connection, event_id: i64, disposition: &str) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE events SET disposition = ?1 WHERE eventid = ?2",
        params![disposition, event_id],
    )?;
    Ok(n)
}

pub fn count_events(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT count(*) FROM events", [], |row| row.get(0))?)
}
