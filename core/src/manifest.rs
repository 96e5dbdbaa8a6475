//! Manifest writer: data-row count and byte size per output table.
//!
//! Diagnostic only. The engine logs and swallows any failure here; a
//! broken manifest never invalidates an otherwise complete dataset.

use crate::{error::GenResult, writer::TABLE_FILES};
use serde::Serialize;
use std::path::Path;

pub const MANIFEST_FILE: &str = "manifest.csv";

#[derive(Debug, Serialize)]
struct ManifestRow {
    file: String,
    rows: u64,
    size_bytes: u64,
}

pub fn write(out_dir: &Path) -> GenResult<()> {
    let mut writer = csv::Writer::from_path(out_dir.join(MANIFEST_FILE))?;
    for name in TABLE_FILES {
        let path = out_dir.join(name);
        let (rows, size_bytes) = match std::fs::metadata(&path) {
            Ok(meta) => (count_data_rows(&path)?, meta.len()),
            Err(_) => (0, 0),
        };
        writer.serialize(ManifestRow {
            file: (*name).to_string(),
            rows,
            size_bytes,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn count_data_rows(path: &Path) -> GenResult<u64> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut n = 0u64;
    for record in reader.records() {
        record?;
        n += 1;
    }
    Ok(n)
}
