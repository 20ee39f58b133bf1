//! Inner join of the student list and notes tables

use crate::error::{Error, Result};
use crate::reader::read_rows;
use crate::record::{RawTable, Record, Records, NOTES_SEPARATOR};
use std::path::Path;
use tracing::info;

/// Number of list fields a row needs to build a record
pub const LIST_FIELDS: usize = 3;

/// Read both files and join them into records
pub fn join_files<P: AsRef<Path>, Q: AsRef<Path>>(list_path: P, notes_path: Q) -> Result<Records> {
    let list = read_rows(list_path)?;
    let notes = read_rows(notes_path)?;

    join_rows(list, notes)
}

/// Join two raw tables on their keys.
///
/// Only keys present in both tables produce a record. The list row supplies
/// the first name, last name and certificate; every field of the notes row
/// is merged into `notes`. Both tables are consumed.
///
/// Keys are visited in ascending order, so a `ShortRow` error always names
/// the lowest matched short key.
pub fn join_rows(list: RawTable, mut notes: RawTable) -> Result<Records> {
    let list_total = list.row_count();
    let notes_total = notes.row_count();
    let mut records = Records::with_capacity(list_total.min(notes_total));

    let mut list_rows: Vec<(i64, Vec<String>)> = list.rows.into_iter().collect();
    list_rows.sort_unstable_by_key(|(id, _)| *id);

    for (id, fields) in list_rows {
        let Some(note_fields) = notes.rows.remove(&id) else {
            continue;
        };

        if fields.len() < LIST_FIELDS {
            return Err(Error::ShortRow {
                path: list.source_path,
                id,
                expected: LIST_FIELDS,
                found: fields.len(),
            });
        }

        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();

        records.insert(
            id,
            Record {
                id,
                first_name: next(),
                last_name: next(),
                certificate: next(),
                notes: note_fields.join(NOTES_SEPARATOR),
            },
        );
    }

    info!(
        matched = records.len(),
        list_dropped = list_total - records.len(),
        notes_dropped = notes_total - records.len(),
        "joined list and notes"
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_rows_str;
    use std::collections::BTreeSet;

    const LIST: &str = "StudentID,FirstName,LastName,Certificate\n";
    const NOTES: &str = "StudentID,Note1,Note2\n";

    fn join(list: &str, notes: &str) -> Result<Records> {
        let list = read_rows_str(&format!("{LIST}{list}"), "list.csv").unwrap();
        let notes = read_rows_str(&format!("{NOTES}{notes}"), "notes.csv").unwrap();
        join_rows(list, notes)
    }

    #[test]
    fn test_join_keeps_intersection() {
        let records = join(
            "1,A,A,X\n2,B,B,X\n3,C,C,X\n",
            "2,two\n3,three\n4,four\n",
        )
        .unwrap();

        let keys: BTreeSet<i64> = records.keys().copied().collect();
        assert_eq!(keys, BTreeSet::from([2, 3]));
    }

    #[test]
    fn test_join_builds_record() {
        let records = join("1,Jane,Doe,CertA\n", "1,\"Good\",\"Needs review\"\n").unwrap();

        assert_eq!(
            records[&1],
            Record {
                id: 1,
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                certificate: "CertA".to_string(),
                notes: "Good, Needs review".to_string(),
            }
        );
    }

    #[test]
    fn test_single_note_has_no_separator() {
        let records = join("1,Jane,Doe,CertA\n", "1,Only note\n").unwrap();
        assert_eq!(records[&1].notes, "Only note");
    }

    #[test]
    fn test_notes_row_without_fields() {
        let records = join("1,Jane,Doe,CertA\n", "1\n").unwrap();
        assert_eq!(records[&1].notes, "");
    }

    #[test]
    fn test_extra_list_fields_ignored() {
        let records = join("1,Jane,Doe,CertA,extra\n", "1,n\n").unwrap();
        assert_eq!(records[&1].certificate, "CertA");
    }

    #[test]
    fn test_short_list_row_fails() {
        let err = join("1,Jane,Doe\n", "1,n\n").unwrap_err();

        assert!(matches!(
            err,
            Error::ShortRow { id: 1, expected: 3, found: 2, .. }
        ));
    }

    #[test]
    fn test_short_row_reports_lowest_key() {
        for _ in 0..20 {
            let err = join(
                "5,e\n3,c\n1,a\n4,d\n2,b\n",
                "1,n\n2,n\n3,n\n4,n\n5,n\n",
            )
            .unwrap_err();
            assert!(matches!(err, Error::ShortRow { id: 1, .. }));
        }
    }

    #[test]
    fn test_short_row_reports_lowest_matched_key() {
        let err = join("1,a\n7,g\n9,i\n", "7,n\n9,n\n").unwrap_err();
        assert!(matches!(err, Error::ShortRow { id: 7, found: 1, .. }));
    }

    #[test]
    fn test_short_row_without_notes_is_dropped() {
        let records = join("1,Jane\n2,John,Roe,CertB\n", "2,n\n").unwrap();
        assert_eq!(records.len(), 1);
        assert!(records.contains_key(&2));
    }

    #[test]
    fn test_non_contiguous_keys() {
        let records = join("10,A,A,X\n500,B,B,X\n", "500,n\n10,m\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[&10].notes, "m");
        assert_eq!(records[&500].notes, "n");
    }

    #[test]
    fn test_join_is_deterministic() {
        let a = join("1,A,A,X\n2,B,B,X\n", "1,x,y\n2,z\n").unwrap();
        let b = join("1,A,A,X\n2,B,B,X\n", "1,x,y\n2,z\n").unwrap();
        assert_eq!(a, b);
    }
}
