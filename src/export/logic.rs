// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{write_csv, write_json};
use crate::export::{OutputFormat, notify_export_success};
use crate::models::table::EventTable;
use crate::utils::table::Table;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write `table` in `format` to any writer.
    pub fn write<W: Write>(table: &EventTable, format: OutputFormat, mut out: W) -> AppResult<()> {
        match format {
            OutputFormat::Table => {
                out.write_all(Table::from_event_table(table).render().as_bytes())?;
                Ok(())
            }
            OutputFormat::Csv => write_csv(table, out),
            OutputFormat::Json => write_json(table, out),
        }
    }

    /// Write to `file` when given, to stdout otherwise.
    pub fn emit(
        table: &EventTable,
        format: OutputFormat,
        file: Option<&Path>,
        force: bool,
    ) -> AppResult<()> {
        match file {
            Some(path) => {
                ensure_writable(path, force)?;
                let mut out = BufWriter::new(File::create(path)?);
                Self::write(table, format, &mut out)?;
                out.flush()?;
                notify_export_success(&format.as_str().to_uppercase(), table.len(), path);
                Ok(())
            }
            None => {
                let stdout = io::stdout();
                Self::write(table, format, stdout.lock())
            }
        }
    }
}
