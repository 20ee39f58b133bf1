//! CSV reader producing key -> fields mappings

use crate::error::{Error, Result};
use crate::record::RawTable;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read a CSV file into a RawTable keyed by its first column
pub fn read_rows<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    read_rows_from(BufReader::new(file), path.to_path_buf())
}

/// Read CSV from a string (useful for testing)
pub fn read_rows_str(content: &str, source_name: &str) -> Result<RawTable> {
    read_rows_from(content.as_bytes(), PathBuf::from(source_name))
}

/// Read CSV from any reader.
///
/// The first row is a header and is skipped without looking at it. Every
/// other row must start with an integer key; a later row with the same key
/// replaces the earlier one.
pub fn read_rows_from<R: Read>(reader: R, source_path: PathBuf) -> Result<RawTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // notes rows carry a varying number of fields
        .from_reader(reader);

    let mut table = RawTable::new(source_path);
    let mut saw_header = false;

    for result in csv_reader.records() {
        let record = result.map_err(|e| Error::Csv {
            path: table.source_path.clone(),
            source: e,
        })?;

        if !saw_header {
            saw_header = true;
            continue;
        }

        let key = record.get(0).unwrap_or_default();
        let id: i64 = key.parse().map_err(|_| Error::InvalidKey {
            path: table.source_path.clone(),
            line: record.position().map(|p| p.line()).unwrap_or_default(),
            value: key.to_string(),
        })?;

        let fields: Vec<String> = record.iter().skip(1).map(str::to_string).collect();

        if table.rows.insert(id, fields).is_some() {
            debug!(
                id,
                path = %table.source_path.display(),
                "duplicate key, keeping the later row"
            );
        }
    }

    if !saw_header {
        return Err(Error::MissingHeader {
            path: table.source_path,
        });
    }

    debug!(
        rows = table.row_count(),
        path = %table.source_path.display(),
        "read rows"
    );

    Ok(table)
}
