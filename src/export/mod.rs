// src/export/mod.rs
use std::fs::File;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::process::FilteredTable;

/// Write `table` to `path` as comma-delimited UTF-8.
///
/// Header row first, one row per record, no index column. Any existing
/// file at `path` is truncated; a crash mid-write can leave a partial
/// file behind.
pub fn write_csv(table: &FilteredTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    info!(rows = table.rows.len(), path = %path.display(), "export written");
    Ok(())
}
