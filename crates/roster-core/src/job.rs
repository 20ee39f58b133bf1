//! Job files describing one join/edit/export run

use crate::error::{Error, Result};
use crate::patch::Edit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output format of the result file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown format '{other}', supported formats: csv, json"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => f.write_str("csv"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// A job file: inputs, output and edits for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFile {
    /// Student list (StudentID, FirstName, LastName, Certificate)
    pub list: PathBuf,
    /// Student notes (StudentID, Note1, Note2, ...)
    pub notes: PathBuf,
    /// Result file, replaced if it exists
    pub output: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
    /// Edits applied after the join, in order
    #[serde(default)]
    pub edits: Vec<Edit>,
}

impl JobFile {
    /// Create a job with no edits and CSV output
    pub fn new(list: PathBuf, notes: PathBuf, output: PathBuf) -> Self {
        Self {
            list,
            notes,
            output,
            format: OutputFormat::Csv,
            edits: Vec::new(),
        }
    }

    /// Load a job file from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the job file to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
