//! Table export to CSV and records-shaped JSON
//!
//! Both writers create missing parent directories and overwrite the target.

use crate::error::Result;
use crate::table::Table;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes tables to disk. Stateless; held by `StatsDataset` for delegation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exporter;

impl Exporter {
    pub fn new() -> Self {
        Self
    }

    /// Write `table` as CSV: header row, then one record per row, no index column.
    ///
    /// # Returns
    ///
    /// The path that was written
    pub fn to_csv(&self, table: &Table, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        ensure_parent_dir(path)?;

        let file = File::create(path)?;
        self.write_csv(table, BufWriter::new(file))?;

        log::debug!("Exported {} rows to {}", table.row_count(), path.display());
        Ok(path.to_path_buf())
    }

    /// Write `table` as a JSON array of objects, one per row.
    ///
    /// # Returns
    ///
    /// The path that was written
    pub fn to_json(&self, table: &Table, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        ensure_parent_dir(path)?;

        let file = File::create(path)?;
        self.write_json(table, BufWriter::new(file))?;

        log::debug!("Exported {} records to {}", table.row_count(), path.display());
        Ok(path.to_path_buf())
    }

    /// Stream CSV into any writer
    pub fn write_csv<W: Write>(&self, table: &Table, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);

        // A table without columns has nothing to describe, not even a header
        if table.col_count() > 0 {
            writer.write_record(table.columns())?;
            for row in table.rows() {
                writer.write_record(row.iter().map(|v| v.to_string()))?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    /// Stream records JSON into any writer
    pub fn write_json<W: Write>(&self, table: &Table, mut writer: W) -> Result<()> {
        serde_json::to_writer(&mut writer, &table.records())?;
        writer.flush()?;
        Ok(())
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
