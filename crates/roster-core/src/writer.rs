//! Export merged records as CSV or JSON, ordered by student ID

use crate::error::{Error, Result};
use crate::record::{Record, Records, HEADER};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Records in ascending key order
pub fn sorted_records(records: &Records) -> Vec<&Record> {
    let mut sorted: Vec<&Record> = records.values().collect();
    sorted.sort_unstable_by_key(|r| r.id);
    sorted
}

/// Write records to a CSV file, replacing any existing content
pub fn write_csv<P: AsRef<Path>>(records: &Records, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = create(path)?;

    write_csv_to(records, file, path)?;

    info!(rows = records.len(), path = %path.display(), "wrote CSV");
    Ok(())
}

/// Write records as CSV to any writer; `dest` names it in errors
pub fn write_csv_to<W: Write>(records: &Records, writer: W, dest: &Path) -> Result<()> {
    let csv_error = |e| Error::Csv {
        path: dest.to_path_buf(),
        source: e,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER).map_err(csv_error)?;

    for record in sorted_records(records) {
        csv_writer.write_record(record.to_row()).map_err(csv_error)?;
    }

    csv_writer.flush().map_err(|e| Error::FileWrite {
        path: dest.to_path_buf(),
        source: e,
    })
}

/// Render records as a CSV string
pub fn to_csv_string(records: &Records) -> Result<String> {
    let mut buf = Vec::new();
    write_csv_to(records, &mut buf, &PathBuf::from("<memory>"))?;
    String::from_utf8(buf).map_err(|e| {
        Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

/// Write records to a JSON file as an array ordered by key
pub fn write_json<P: AsRef<Path>>(records: &Records, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(create(path)?);
    let write_error = |e: std::io::Error| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    };

    serde_json::to_writer_pretty(&mut writer, &sorted_records(records)).map_err(|e| {
        if e.is_io() {
            write_error(e.into())
        } else {
            Error::Json(e)
        }
    })?;
    writeln!(writer)
        .and_then(|_| writer.flush())
        .map_err(write_error)?;

    info!(rows = records.len(), path = %path.display(), "wrote JSON");
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
