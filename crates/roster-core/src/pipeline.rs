//! Join -> edit -> export driver

use crate::error::Result;
use crate::job::{JobFile, OutputFormat};
use crate::joiner::join_files;
use crate::patch::{apply_patch, PatchFile, PatchResult};
use crate::record::Records;
use crate::writer::{write_csv, write_json};
use std::path::Path;
use tracing::info;

/// Result of a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Records after edits
    pub records: Records,
    /// Outcome of the edits
    pub patch: PatchResult,
}

/// Run a job. Read and write errors abort the run; a failing edit is only
/// reported.
pub fn run_job(job: &JobFile) -> Result<PipelineReport> {
    run(
        &job.list,
        &job.notes,
        &PatchFile::from(job.edits.clone()),
        &job.output,
        job.format,
    )
}

/// Join two files, apply a patch and write the result
pub fn run(
    list: &Path,
    notes: &Path,
    patch: &PatchFile,
    output: &Path,
    format: OutputFormat,
) -> Result<PipelineReport> {
    let mut records = join_files(list, notes)?;
    let patch_result = apply_patch(&mut records, patch);

    match format {
        OutputFormat::Csv => write_csv(&records, output)?,
        OutputFormat::Json => write_json(&records, output)?,
    }

    info!(
        records = records.len(),
        edits_applied = patch_result.edits_applied,
        edits_failed = patch_result.failed_edits.len(),
        "pipeline complete"
    );

    Ok(PipelineReport {
        records,
        patch: patch_result,
    })
}
