//! Top-N transaction selection with keep-all-ties semantics.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::Result;
use crate::round2;
use crate::table::{Table, cell_f64, cell_str, columns};
use crate::time::{format_short_date, parse_row_datetime};

pub const DEFAULT_TOP_N: usize = 5;

/// Shown for a null category or description.
pub const MISSING_LABEL: &str = "Не указана";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTransaction {
    /// "DD.MM.YYYY"
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

/// The `n` transactions with the greatest amount, plus every row tied with
/// the n-th largest value, so the result can exceed `n`. An empty table is
/// an empty result, not an error; `n == 0` falls back to the default of 5.
pub fn top_transactions(table: &Table, n: usize) -> Result<Vec<TopTransaction>> {
    if table.is_empty() {
        warn!("top transactions requested for an empty table");
        return Ok(Vec::new());
    }
    let idx = table.require_columns(&[
        columns::OPERATION_DATE,
        columns::AMOUNT,
        columns::CATEGORY,
        columns::DESCRIPTION,
    ])?;
    let (date_idx, amount_idx, category_idx, description_idx) = (idx[0], idx[1], idx[2], idx[3]);

    let n = if n == 0 {
        warn!("invalid top-N of 0 requested, using the default of {DEFAULT_TOP_N}");
        DEFAULT_TOP_N
    } else {
        n
    };

    let mut entries = Vec::new();
    for row in table.rows() {
        let date = row
            .get(date_idx)
            .and_then(|v| cell_str(v))
            .and_then(parse_row_datetime);
        let Some(date) = date else {
            warn!("dropping row with unparseable operation date");
            continue;
        };
        let Some(amount) = row.get(amount_idx).and_then(|v| cell_f64(v)) else {
            warn!("dropping row with non-numeric amount");
            continue;
        };
        entries.push(TopTransaction {
            date: format_short_date(date),
            amount: round2(amount),
            category: text_or_placeholder(row.get(category_idx)),
            description: text_or_placeholder(row.get(description_idx)),
        });
    }

    entries.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    if entries.len() > n {
        let cutoff = entries[n - 1].amount;
        let mut end = n;
        while end < entries.len() && entries[end].amount == cutoff {
            end += 1;
        }
        entries.truncate(end);
    }

    info!("selected {} top transactions", entries.len());
    Ok(entries)
}

fn text_or_placeholder(cell: Option<&Value>) -> String {
    cell.and_then(|v| cell_str(v))
        .map(str::to_string)
        .unwrap_or_else(|| MISSING_LABEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn transactions_table(rows: &[(&str, f64, Option<&str>, Option<&str>)]) -> Table {
        let mut table = Table::new([
            columns::OPERATION_DATE,
            columns::AMOUNT,
            columns::CATEGORY,
            columns::DESCRIPTION,
        ]);
        for (date, amount, category, description) in rows {
            table
                .push_row(vec![
                    json!(date),
                    json!(amount),
                    category.map_or(json!(null), |c| json!(c)),
                    description.map_or(json!(null), |d| json!(d)),
                ])
                .unwrap();
        }
        table
    }

    #[test]
    fn test_top_two_ordered_by_amount() {
        let table = transactions_table(&[
            ("31.12.2021", 100.0, Some("Еда"), None),
            ("30.12.2021", 200.0, Some("Транспорт"), Some("Такси")),
            ("24.12.2021", 50.0, Some("Развлечения"), Some("Кино")),
        ]);
        let top = top_transactions(&table, 2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].amount, 200.0);
        assert_eq!(top[0].date, "30.12.2021");
        assert_eq!(top[1].amount, 100.0);
        assert_eq!(top[1].category, "Еда");
        assert_eq!(top[1].description, MISSING_LABEL);
    }

    #[test]
    fn test_keeps_all_rows_tied_with_the_nth() {
        let table = transactions_table(&[
            ("01.12.2021", 300.0, Some("А"), None),
            ("02.12.2021", 100.0, Some("Б"), None),
            ("03.12.2021", 100.0, Some("В"), None),
            ("04.12.2021", 100.0, Some("Г"), None),
            ("05.12.2021", 50.0, Some("Д"), None),
        ]);
        let top = top_transactions(&table, 2).unwrap();
        // 300 plus all three rows tied at 100.
        assert_eq!(top.len(), 4);
        assert!(top.iter().skip(1).all(|t| t.amount == 100.0));
    }

    #[test]
    fn test_zero_n_behaves_like_default() {
        let rows: Vec<(String, f64)> = (1..=8).map(|i| (format!("0{i}.12.2021"), i as f64)).collect();
        let mut table = Table::new([
            columns::OPERATION_DATE,
            columns::AMOUNT,
            columns::CATEGORY,
            columns::DESCRIPTION,
        ]);
        for (date, amount) in &rows {
            table
                .push_row(vec![json!(date), json!(amount), json!("Еда"), json!("x")])
                .unwrap();
        }
        let default = top_transactions(&table, DEFAULT_TOP_N).unwrap();
        let zero = top_transactions(&table, 0).unwrap();
        assert_eq!(default, zero);
        assert_eq!(zero.len(), 5);
    }

    #[test]
    fn test_empty_table_is_empty_result() {
        let table = Table::new([
            columns::OPERATION_DATE,
            columns::AMOUNT,
            columns::CATEGORY,
            columns::DESCRIPTION,
        ]);
        assert!(top_transactions(&table, 5).unwrap().is_empty());
    }

    #[test]
    fn test_missing_columns_all_named() {
        let mut table = Table::new([columns::OPERATION_DATE]);
        table.push_row(vec![json!("31.12.2021")]).unwrap();
        let err = top_transactions(&table, 5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required columns: amount, category, description"
        );
    }

    #[test]
    fn test_drops_rows_with_bad_dates() {
        let table = transactions_table(&[
            ("31.12.2021 16:44:00", 100.0, Some("Еда"), None),
            ("когда-то", 9999.0, Some("Еда"), None),
        ]);
        let top = top_transactions(&table, 5).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].amount, 100.0);
    }
}
