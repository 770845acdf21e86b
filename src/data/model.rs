use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A cell exactly as the Sheets API returned it. No coercion: a
/// numeric-looking string stays a `String`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl CellValue {
    pub fn from_json(val: &JsonValue) -> Self {
        match val {
            JsonValue::String(s) if s.is_empty() => CellValue::Empty,
            JsonValue::String(s) => CellValue::String(s.clone()),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    CellValue::Float(f)
                } else {
                    CellValue::String(n.to_string())
                }
            }
            JsonValue::Bool(b) => CellValue::Bool(*b),
            JsonValue::Null => CellValue::Empty,
            other => CellValue::String(other.to_string()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::String(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SheetTable – all records of one worksheet
// ---------------------------------------------------------------------------

/// One data row: header text → cell.
pub type SheetRow = BTreeMap<String, CellValue>;

/// A worksheet materialised as records. `columns` keeps the header order,
/// since `SheetRow` is keyed alphabetically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetTable {
    pub columns: Vec<String>,
    pub rows: Vec<SheetRow>,
}

impl SheetTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row` for `column`, or `Empty` if absent.
    pub fn cell(&self, row: usize, column: &str) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(EMPTY)
    }
}

// ---------------------------------------------------------------------------
// PropertyRecord – one rental unit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyRecord {
    pub name: String,
    pub monthly_rent: u32,
    pub maintenance_cost: u32,
    pub tenant_name: String,
    pub lease_start_date: NaiveDate,
    pub is_vacant: bool,
}
