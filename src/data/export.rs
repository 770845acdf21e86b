use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{PropertyRecord, SheetTable};

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Write property records as CSV (header from the struct fields, ISO dates).
pub fn write_properties<'a, W: Write>(
    writer: W,
    records: impl IntoIterator<Item = &'a PropertyRecord>,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut wrote_any = false;
    for record in records {
        wtr.serialize(record).context("writing property row")?;
        wrote_any = true;
    }
    // serde only emits the header alongside the first row.
    if !wrote_any {
        wtr.write_record([
            "name",
            "monthly_rent",
            "maintenance_cost",
            "tenant_name",
            "lease_start_date",
            "is_vacant",
        ])
        .context("writing CSV header")?;
    }
    wtr.flush().context("flushing CSV")?;
    Ok(())
}

/// Write a worksheet as CSV: header row, then one line per record.
pub fn write_sheet<W: Write>(writer: W, table: &SheetTable) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&table.columns).context("writing CSV header")?;
    for row in 0..table.len() {
        let cells: Vec<String> = table
            .columns
            .iter()
            .map(|col| table.cell(row, col).to_string())
            .collect();
        wtr.write_record(&cells)
            .with_context(|| format!("writing sheet row {row}"))?;
    }
    wtr.flush().context("flushing CSV")?;
    Ok(())
}

pub fn save_properties<'a>(
    path: &Path,
    records: impl IntoIterator<Item = &'a PropertyRecord>,
) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_properties(file, records)
}

pub fn save_sheet(path: &Path, table: &SheetTable) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_sheet(file, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, SheetRow};
    use crate::data::provider::{DemoProperties, PropertySource};

    #[test]
    fn test_write_properties() {
        let records = DemoProperties.properties();
        let mut buf = Vec::new();
        write_properties(&mut buf, records.iter().filter(|r| r.is_vacant)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "name,monthly_rent,maintenance_cost,tenant_name,lease_start_date,is_vacant\n\
             D Heights,90000,8000,Ito,2023-07-20,true\n"
        );
    }

    #[test]
    fn test_write_properties_empty_has_header() {
        let mut buf = Vec::new();
        write_properties(&mut buf, std::iter::empty()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("name,monthly_rent,"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_save_sheet_keeps_header_order() {
        let mut row = SheetRow::new();
        row.insert("zeta".into(), CellValue::Integer(1));
        row.insert("alpha".into(), CellValue::String("x, y".into()));
        let table = SheetTable {
            columns: vec!["zeta".into(), "alpha".into()],
            rows: vec![row],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.csv");
        save_sheet(&path, &table).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "zeta,alpha\n1,\"x, y\"\n");
    }
}
