// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::models::table::{EventTable, cell_to_string};
use std::io::Write;

/// JSON array of objects, pretty-printed, keys in header order.
pub(crate) fn write_json<W: Write>(table: &EventTable, mut out: W) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut out, &table.to_records())?;
    writeln!(out)?;
    Ok(())
}

/// CSV with the table header as first record; NULL cells are empty.
pub(crate) fn write_csv<W: Write>(table: &EventTable, out: W) -> AppResult<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(cell_to_string))?;
    }

    wtr.flush()?;
    Ok(())
}
