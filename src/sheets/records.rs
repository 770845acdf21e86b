use std::collections::BTreeSet;

use serde_json::Value as JsonValue;

use crate::data::model::{CellValue, SheetRow, SheetTable};
use crate::error::RemoteAccessError;

/// Turn a raw `values` grid into records keyed by the header row.
///
/// * first row = header, remaining rows = records
/// * short rows are padded with `Empty`, cells past the header are dropped
/// * no rows (or only a header) → empty table
/// * a repeated header is rejected, blank ones included; a single blank
///   header is a valid column named `""`
pub fn records_from_values(values: &[Vec<JsonValue>]) -> Result<SheetTable, RemoteAccessError> {
    let Some((header, body)) = values.split_first() else {
        return Ok(SheetTable::default());
    };

    let columns: Vec<String> = header
        .iter()
        .map(|v| CellValue::from_json(v).to_string())
        .collect();

    let mut seen = BTreeSet::new();
    for col in &columns {
        if !seen.insert(col.as_str()) {
            return Err(RemoteAccessError::MalformedSheet(col.clone()));
        }
    }

    let rows = body
        .iter()
        .map(|raw| {
            columns
                .iter()
                .enumerate()
                .map(|(i, col)| {
                    let cell = raw.get(i).map(CellValue::from_json).unwrap_or(CellValue::Empty);
                    (col.clone(), cell)
                })
                .collect::<SheetRow>()
        })
        .collect();

    Ok(SheetTable { columns, rows })
}
