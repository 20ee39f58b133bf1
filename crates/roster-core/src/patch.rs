//! Batched field edits
//!
//! This module provides:
//! - Edits addressing one field of one record
//! - Patch file format (JSON) for storing edits
//! - Applying a batch where a failing edit does not stop the rest

use crate::error::{Error, Result};
use crate::record::Records;
use crate::updater::update_field;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// A single edit to a record field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// Student ID (must match a record)
    pub id: i64,
    /// Field name, e.g. "FirstName"
    pub field: String,
    /// New value
    pub value: String,
}

impl Edit {
    /// Create a new edit
    pub fn new(id: i64, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id,
            field: field.into(),
            value: value.into(),
        }
    }

    /// Parse the `id:field:value` shorthand. The value may contain colons.
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.splitn(3, ':').collect();
        let [id, field, value] = parts.as_slice() else {
            return Err(Error::InvalidEdit(s.to_string()));
        };

        let id: i64 = id.parse().map_err(|_| Error::InvalidEdit(s.to_string()))?;
        Ok(Self::new(id, *field, *value))
    }
}

/// A patch file containing edits applied in order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchFile {
    /// List of edits
    pub edits: Vec<Edit>,
}

impl PatchFile {
    /// Load a patch file from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the patch file to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl From<Vec<Edit>> for PatchFile {
    fn from(edits: Vec<Edit>) -> Self {
        Self { edits }
    }
}

/// Outcome of applying a patch
#[derive(Debug, Clone, Default)]
pub struct PatchResult {
    /// Number of edits applied
    pub edits_applied: usize,
    /// Edits that failed (record not found, invalid field)
    pub failed_edits: Vec<(Edit, String)>,
}

impl PatchResult {
    pub fn is_clean(&self) -> bool {
        self.failed_edits.is_empty()
    }
}

/// Apply every edit in order, collecting the ones that fail
pub fn apply_patch(records: &mut Records, patch: &PatchFile) -> PatchResult {
    let mut result = PatchResult::default();

    for edit in &patch.edits {
        match update_field(records, edit.id, &edit.field, edit.value.as_str()) {
            Ok(()) => result.edits_applied += 1,
            Err(e) => {
                warn!(id = edit.id, field = %edit.field, "skipping edit: {e}");
                result.failed_edits.push((edit.clone(), e.to_string()));
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn students() -> Records {
        let jane = Record {
            id: 1,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            certificate: "CertA".to_string(),
            notes: "Good".to_string(),
        };
        [(1, jane)].into()
    }

    #[test]
    fn test_edit_creation() {
        let edit = Edit::new(42, "FirstName", "John");
        assert_eq!(edit.id, 42);
        assert_eq!(edit.field, "FirstName");
        assert_eq!(edit.value, "John");
    }

    #[test]
    fn test_edit_parse() {
        assert_eq!(
            Edit::parse("1:Notes:see 10:30").unwrap(),
            Edit::new(1, "Notes", "see 10:30")
        );
        assert_eq!(Edit::parse("-3:LastName:").unwrap(), Edit::new(-3, "LastName", ""));
    }

    #[test]
    fn test_edit_parse_invalid() {
        assert!(matches!(Edit::parse("1:Notes"), Err(Error::InvalidEdit(_))));
        assert!(matches!(Edit::parse("x:Notes:v"), Err(Error::InvalidEdit(_))));
    }

    #[test]
    fn test_patch_file_serialization() {
        let patch = PatchFile::from(vec![
            Edit::new(1, "FirstName", "John"),
            Edit::new(2, "Notes", "Moved"),
        ]);

        let json = serde_json::to_string_pretty(&patch).unwrap();
        let loaded: PatchFile = serde_json::from_str(&json).unwrap();

        assert_eq!(loaded.edits, patch.edits);
    }

    #[test]
    fn test_patch_file_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patch.json");

        let patch = PatchFile::from(vec![Edit::new(1, "Certificate", "CertB")]);
        patch.save(&path).unwrap();

        assert_eq!(PatchFile::load(&path).unwrap().edits, patch.edits);
    }

    #[test]
    fn test_apply_patch_continues_after_failure() {
        let mut records = students();
        let patch = PatchFile::from(vec![
            Edit::new(9999, "FirstName", "Ghost"),
            Edit::new(1, "Nickname", "JJ"),
            Edit::new(1, "FirstName", "John"),
            Edit::new(1, "Notes", "THIS IS JOHNY BEEEEEE"),
        ]);

        let result = apply_patch(&mut records, &patch);

        assert_eq!(result.edits_applied, 2);
        assert_eq!(result.failed_edits.len(), 2);
        assert!(!result.is_clean());
        assert_eq!(result.failed_edits[0].0.id, 9999);
        assert_eq!(result.failed_edits[1].0.field, "Nickname");

        assert_eq!(records[&1].first_name, "John");
        assert_eq!(records[&1].notes, "THIS IS JOHNY BEEEEEE");
    }

    #[test]
    fn test_later_edit_wins() {
        let mut records = students();
        let patch = PatchFile::from(vec![
            Edit::new(1, "LastName", "Roe"),
            Edit::new(1, "LastName", "Poe"),
        ]);

        let result = apply_patch(&mut records, &patch);
        assert!(result.is_clean());
        assert_eq!(records[&1].last_name, "Poe");
    }
}
