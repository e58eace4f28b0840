//! CSV stat sheet → Table
//!
//! The first record is the header. Every cell is trimmed. Identity columns
//! (`player`, `position`) load as text, so IDs like `007` survive; all other
//! cells go through [`Value::parse`] and numeric columns come back as
//! `Int`/`Float`.

use crate::dataset::{PLAYER_COLUMN, POSITION_COLUMN};
use crate::error::Result;
use crate::table::{Table, Value};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load a CSV file from disk
pub fn load_csv(path: &Path) -> Result<Table> {
    let file = File::open(path)?;
    let table = read_csv(file)?;

    log::debug!(
        "Loaded {} rows x {} columns from {}",
        table.row_count(),
        table.col_count(),
        path.display()
    );

    Ok(table)
}

/// Read CSV from any reader. Ragged records are an error.
pub fn read_csv<R: Read>(reader: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let text_columns: Vec<bool> = headers
        .iter()
        .map(|name| name == PLAYER_COLUMN || name == POSITION_COLUMN)
        .collect();
    let mut table = Table::new(headers.iter());

    for record in reader.records() {
        let record = record?;
        let row = record
            .iter()
            .enumerate()
            .map(|(i, raw)| match text_columns.get(i) {
                Some(true) => text_cell(raw),
                _ => Value::parse(raw),
            })
            .collect();
        table.push_row(row)?;
    }

    Ok(table)
}

fn text_cell(raw: &str) -> Value {
    if raw.is_empty() {
        Value::Null
    } else {
        Value::Text(raw.to_string())
    }
}
