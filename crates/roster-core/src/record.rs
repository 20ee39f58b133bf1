//! Core record types for raw input rows and merged students

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Header row written in front of every exported table
pub const HEADER: [&str; 5] = ["StudentID", "FirstName", "LastName", "Certificate", "Notes"];

/// Separator placed between note fields when they are merged
pub const NOTES_SEPARATOR: &str = ", ";

/// Merged records keyed by student ID (no iteration order)
pub type Records = HashMap<i64, Record>;

/// Rows read from a single source, keyed by the first column
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Remaining fields of each row, keyed by the integer in the first column
    pub rows: HashMap<i64, Vec<String>>,
    /// Source file path
    pub source_path: PathBuf,
}

impl RawTable {
    /// Create a new empty table
    pub fn new(source_path: PathBuf) -> Self {
        Self {
            rows: HashMap::new(),
            source_path,
        }
    }

    /// Get the number of distinct keys
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find the fields of a row by key
    pub fn get(&self, id: i64) -> Option<&[String]> {
        self.rows.get(&id).map(Vec::as_slice)
    }
}

/// A student merged from the list and notes tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    #[serde(rename = "StudentID")]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub certificate: String,
    pub notes: String,
}

impl Record {
    /// Read one attribute
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Certificate => &self.certificate,
            Field::Notes => &self.notes,
        }
    }

    /// Replace one attribute
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::FirstName => self.first_name = value,
            Field::LastName => self.last_name = value,
            Field::Certificate => self.certificate = value,
            Field::Notes => self.notes = value,
        }
    }

    /// Render as an output row, key first
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(HEADER.len());
        row.push(self.id.to_string());
        row.extend(Field::ALL.iter().map(|&f| self.get(f).to_string()));
        row
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StudentID: {}, Name: {}, Surname: {}, Certificate: {}, Notes: {}",
            self.id, self.first_name, self.last_name, self.certificate, self.notes
        )
    }
}

/// An editable attribute of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    FirstName,
    LastName,
    Certificate,
    Notes,
}

impl Field {
    /// All fields in output column order
    pub const ALL: [Field; 4] = [
        Field::FirstName,
        Field::LastName,
        Field::Certificate,
        Field::Notes,
    ];

    /// Column name as it appears in the header
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FirstName => "FirstName",
            Field::LastName => "LastName",
            Field::Certificate => "Certificate",
            Field::Notes => "Notes",
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    /// Exact, case-sensitive match on the column name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| Error::InvalidField(s.to_string()))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
