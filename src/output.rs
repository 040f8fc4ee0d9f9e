//! Persistence for commute records and aggregate views.
//!
//! Records are exported to and re-imported from CSV; views are written as JSON.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::record::{CommuteRecord, CommuteRecordSet};
use csv::WriterBuilder;
use std::fs::File;

/// Writes every record to a CSV file with a header row.
///
/// An existing file at `path` is overwritten.
pub fn write_records(path: &str, records: &CommuteRecordSet) -> Result<()> {
    debug!(path, records = records.len(), "Writing CSV export");

    let file = File::create(path).with_context(|| format!("creating {path}"))?;

    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!(path, records = records.len(), "CSV export written");
    Ok(())
}

/// Reads a CSV export back into a record set.
///
/// Rows whose stored mood disagrees with their duration are rejected.
pub fn read_records(path: &str) -> Result<CommuteRecordSet> {
    let file = File::open(path).with_context(|| format!("opening {path}"))?;
    let mut rdr = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: CommuteRecord = result.with_context(|| format!("reading {path}"))?;
        rows.push(record);
    }

    debug!(path, records = rows.len(), "CSV export loaded");
    Ok(CommuteRecordSet::new(rows))
}

/// Serializes a value as pretty-printed JSON to `path`.
pub fn write_json(path: &str, value: &impl Serialize) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {path}"))?;
    serde_json::to_writer_pretty(file, value)?;

    info!(path, "JSON export written");
    Ok(())
}
