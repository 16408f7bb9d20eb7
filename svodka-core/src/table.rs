//! In-memory transaction table: ordered rows over a fixed, named column schema.
//!
//! Cells are `serde_json::Value` so a table round-trips cleanly to the
//! record-oriented JSON the report layer emits. The ingest crate maps the
//! bank export's headers onto the canonical names in [`columns`].

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;

use crate::error::{ReportError, Result};

/// Canonical column names produced by the ingest layer.
pub mod columns {
    pub const OPERATION_DATE: &str = "operation_date";
    pub const PAYMENT_DATE: &str = "payment_date";
    pub const CARD_NUMBER: &str = "card_number";
    pub const AMOUNT: &str = "amount";
    pub const CATEGORY: &str = "category";
    pub const DESCRIPTION: &str = "description";
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. The cell count must match the schema width.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ReportError::RowShape {
                got: row.len(),
                want: self.columns.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Names from `required` that are absent, in the order they were asked for.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.has_column(name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Check that every required column exists and return their indices,
    /// positionally matching `required`. Missing columns are a structural
    /// error naming each absent column.
    pub fn require_columns(&self, required: &[&str]) -> Result<Vec<usize>> {
        let missing = self.missing_columns(required);
        if !missing.is_empty() {
            return Err(ReportError::MissingColumns(missing));
        }
        Ok(required
            .iter()
            .filter_map(|name| self.column_index(name))
            .collect())
    }

    /// A new table with the same schema and the given rows. Filters use this
    /// so the input table stays untouched.
    pub fn with_rows(&self, rows: Vec<Vec<Value>>) -> Table {
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Rows as JSON objects keyed by column name, the shape the classifier
    /// and the serialized report work with.
    pub fn records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut object = serde_json::Map::new();
                for (name, value) in self.columns.iter().zip(row) {
                    object.insert(name.clone(), value.clone());
                }
                Value::Object(object)
            })
            .collect()
    }
}

/// Tables serialize in record orientation: one object per row, keys in
/// column order.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&RecordView {
                columns: &self.columns,
                row,
            })?;
        }
        seq.end()
    }
}

struct RecordView<'a> {
    columns: &'a [String],
    row: &'a [Value],
}

impl Serialize for RecordView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in self.columns.iter().zip(self.row) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Numeric cell value: a JSON number, or a string holding one.
pub fn cell_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Text cell value. Null and non-string cells yield `None`.
pub fn cell_str(value: &Value) -> Option<&str> {
    value.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Table {
        let mut table = Table::new([columns::CARD_NUMBER, columns::AMOUNT]);
        table
            .push_row(vec![json!("*7197"), json!(-160.89)])
            .unwrap();
        table.push_row(vec![json!(null), json!(200.0)]).unwrap();
        table
    }

    #[test]
    fn test_missing_columns_preserve_requested_order() {
        let table = sample();
        let missing = table.missing_columns(&[columns::CARD_NUMBER, "foo", "bar"]);
        assert_eq!(missing, vec!["foo".to_string(), "bar".to_string()]);
    }

    #[test]
    fn test_require_columns_message_lists_all_missing() {
        let table = Table::new(["other"]);
        let err = table
            .require_columns(&[columns::CARD_NUMBER, columns::AMOUNT])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required columns: card_number, amount"
        );
    }

    #[test]
    fn test_require_columns_returns_positional_indices() {
        let table = sample();
        let idx = table
            .require_columns(&[columns::AMOUNT, columns::CARD_NUMBER])
            .unwrap();
        assert_eq!(idx, vec![1, 0]);
    }

    #[test]
    fn test_push_row_rejects_wrong_width() {
        let mut table = sample();
        let err = table.push_row(vec![json!(1)]).unwrap_err();
        assert!(matches!(err, ReportError::RowShape { got: 1, want: 2 }));
    }

    #[test]
    fn test_serializes_as_records() {
        let table = sample();
        let rendered = serde_json::to_value(&table).unwrap();
        assert_eq!(
            rendered,
            json!([
                {"card_number": "*7197", "amount": -160.89},
                {"card_number": null, "amount": 200.0}
            ])
        );
    }

    #[test]
    fn test_records_keyed_by_column() {
        let table = sample();
        let records = table.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["card_number"], json!("*7197"));
        assert_eq!(records[1]["card_number"], json!(null));
    }

    #[test]
    fn test_cell_coercions() {
        assert_eq!(cell_f64(&json!(-15.5)), Some(-15.5));
        assert_eq!(cell_f64(&json!("  -15.5 ")), Some(-15.5));
        assert_eq!(cell_f64(&json!("Такси")), None);
        assert_eq!(cell_f64(&json!(null)), None);
        assert_eq!(cell_str(&json!("Еда")), Some("Еда"));
        assert_eq!(cell_str(&json!(null)), None);
    }
}
