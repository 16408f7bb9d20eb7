//! Semicolon-delimited CSV operation exports.
//!
//! The bank's CSV variant uses ';' as the field separator and a decimal
//! comma in amounts ("-160,89"). Only the amount column is coerced to a
//! number here; everything else stays textual so the core's lenient parsing
//! policies apply unchanged.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tracing::info;

use svodka_core::{Table, columns};

use crate::headers::canonical_column;

pub fn load_operations_csv(path: &Path) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers: Vec<String> = rdr
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(canonical_column)
        .collect();
    let width = headers.len();
    let mut table = Table::new(headers);
    let amount_idx = table.column_index(columns::AMOUNT);

    for result in rdr.records() {
        let record = result?;
        let mut row = Vec::with_capacity(width);
        for i in 0..width {
            let raw = record.get(i).unwrap_or("");
            let value = if Some(i) == amount_idx {
                amount_cell(raw)
            } else {
                text_cell(raw)
            };
            row.push(value);
        }
        table.push_row(row)?;
    }

    info!("loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

fn text_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Value::Null
    } else {
        Value::String(trimmed.to_string())
    }
}

/// Amounts may carry a decimal comma; anything unparseable is kept as text
/// for the core to treat as malformed.
fn amount_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(number) = trimmed.parse::<f64>() {
        return json!(number);
    }
    if let Ok(number) = trimmed.replace(',', ".").parse::<f64>() {
        return json!(number);
    }
    Value::String(trimmed.to_string())
}
