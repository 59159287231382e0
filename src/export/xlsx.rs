//! XLSX writer for flattened product tables.

use crate::export::table::{Cell, Table};
use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;
use std::path::Path;

/// Writes the table to a single-sheet workbook.
///
/// Column 0 holds the row index under an empty header; data columns follow.
pub fn write_xlsx(table: &Table, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (i, header) in table.headers.iter().enumerate() {
        worksheet.write_string(0, column(i + 1)?, header.as_str())?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let line = u32::try_from(r + 1).context("Too many rows for a worksheet")?;
        worksheet.write_number(line, 0, row.index as f64)?;

        for (c, cell) in row.cells.iter().enumerate() {
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(line, column(c + 1)?, text.as_str())?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(line, column(c + 1)?, *n)?;
                }
                Cell::Empty => {}
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to write XLSX file: {}", path.display()))
}

fn column(index: usize) -> Result<u16> {
    u16::try_from(index).context("Too many columns for a worksheet")
}
