use crate::model::{StorageError, Table};
use crate::storage::csv_store::to_csv_bytes;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeStatus {
    NoBaseline,
    Unchanged,
    Changed,
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ChangeStatus::NoBaseline => "No previous data to compare with.",
            ChangeStatus::Unchanged => "No data change detected.",
            ChangeStatus::Changed => "Data has changed since the last run.",
        };
        f.write_str(text)
    }
}

/// Compares the file currently at `path` with `table` serialized as CSV.
///
/// Only the bytes on disk are consulted, so this must run before the file is
/// overwritten with the new table in the same run.
pub fn detect_change(path: &Path, table: &Table) -> Result<ChangeStatus, StorageError> {
    if !path.exists() {
        return Ok(ChangeStatus::NoBaseline);
    }

    let previous = blake3::hash(&fs::read(path)?);
    let current = blake3::hash(&to_csv_bytes(table)?);

    Ok(if previous == current {
        ChangeStatus::Unchanged
    } else {
        ChangeStatus::Changed
    })
}
