//! In-place field updates on merged records

use crate::error::{Error, Result};
use crate::record::{Field, Records};
use tracing::debug;

/// Update a field addressed by its column name.
///
/// The key is checked before the field name. On any error the records are
/// left untouched.
pub fn update_field(
    records: &mut Records,
    id: i64,
    field: &str,
    value: impl Into<String>,
) -> Result<()> {
    if !records.contains_key(&id) {
        return Err(Error::RecordNotFound(id));
    }
    let field: Field = field.parse()?;

    update(records, id, field, value)
}

/// Update a typed field of one record
pub fn update(records: &mut Records, id: i64, field: Field, value: impl Into<String>) -> Result<()> {
    let record = records.get_mut(&id).ok_or(Error::RecordNotFound(id))?;
    record.set(field, value.into());

    debug!(id, %field, "updated field");
    Ok(())
}
