//! XLSX operation exports, the bank's primary format.

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, open_workbook_auto};
use serde_json::{Value, json};
use tracing::info;

use svodka_core::Table;

use crate::headers::canonical_column;

/// The sheet the bank writes operations to.
pub const OPERATIONS_SHEET: &str = "Отчет по операциям";

pub fn load_operations_xlsx(path: &Path) -> Result<Table> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("opening {}", path.display()))?;
    let range = workbook
        .worksheet_range(OPERATIONS_SHEET)
        .with_context(|| format!("sheet '{OPERATIONS_SHEET}' in {}", path.display()))?;

    let mut rows = range.rows();
    let header_row = rows.next().context("operations sheet is empty")?;
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| canonical_column(&cell.to_string()))
        .collect();
    let width = headers.len();

    let mut table = Table::new(headers);
    for row in rows {
        let mut cells: Vec<Value> = row.iter().map(cell_to_value).collect();
        cells.resize(width, Value::Null);
        cells.truncate(width);
        table.push_row(cells)?;
    }

    info!("loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) if s.trim().is_empty() => Value::Null,
        Data::String(s) => Value::String(s.trim().to_string()),
        Data::Float(f) => json!(f),
        Data::Int(i) => json!(i),
        Data::Bool(b) => json!(b),
        other => Value::String(other.to_string()),
    }
}
