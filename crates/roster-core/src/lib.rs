//! roster-core: Core library for joining student list and notes tables
//!
//! This library provides functionality to:
//! - Read CSV files into mappings keyed by an integer student ID
//! - Inner-join a student list with student notes into merged records
//! - Update single fields of merged records, alone or in JSON patch batches
//! - Export records as CSV or JSON, sorted by student ID

pub mod error;
pub mod job;
pub mod joiner;
pub mod patch;
pub mod pipeline;
pub mod reader;
pub mod record;
pub mod updater;
pub mod writer;

pub use error::{Error, Result};
pub use job::{JobFile, OutputFormat};
pub use joiner::{join_files, join_rows};
pub use patch::{apply_patch, Edit, PatchFile, PatchResult};
pub use pipeline::{run, run_job, PipelineReport};
pub use reader::{read_rows, read_rows_str};
pub use record::{Field, RawTable, Record, Records, HEADER, NOTES_SEPARATOR};
pub use updater::{update, update_field};
pub use writer::{sorted_records, to_csv_string, write_csv, write_json};
