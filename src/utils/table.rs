//! Table rendering utilities for CLI outputs.

use crate::models::table::{EventTable, cell_to_string};
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(cell));
    format!("{cell}{} ", " ".repeat(fill))
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Column widths sized to the widest of header and cells.
    pub fn from_event_table(table: &EventTable) -> Self {
        let mut columns: Vec<Column> = table
            .columns
            .iter()
            .map(|h| Column {
                header: h.clone(),
                width: UnicodeWidthStr::width(h.as_str()),
            })
            .collect();

        let mut out_rows = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let cells: Vec<String> = row.iter().map(cell_to_string).collect();
            for (col, cell) in columns.iter_mut().zip(&cells) {
                col.width = col.width.max(UnicodeWidthStr::width(cell.as_str()));
            }
            out_rows.push(cells);
        }

        let mut t = Self::new(columns);
        for r in out_rows {
            t.add_row(r);
        }
        t
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad(&col.header, col.width));
        }
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad(cell, col.width));
            }
            out.push('\n');
        }

        out
    }
}
