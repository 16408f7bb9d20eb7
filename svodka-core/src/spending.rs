//! Category spending over the rolling three-month window.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::filters::{DEFAULT_WINDOW_MONTHS, rolling_window};
use crate::table::{Table, cell_f64, cell_str, columns};
use crate::time::parse_row_datetime;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMonthSummary {
    /// "YYYY-MM"
    pub month: String,
    pub total_spent: f64,
    pub transaction_count: usize,
}

/// Spend in `category` per calendar month over the three months ending at
/// `as_of` (today when unset). Category matching is case-insensitive. Months
/// with no matching rows are omitted, not zero-filled. An empty input table
/// or a category with no matches is an empty result; missing columns are a
/// structural error.
pub fn spending_by_category(
    table: &Table,
    category: &str,
    as_of: Option<NaiveDate>,
) -> Result<Vec<CategoryMonthSummary>> {
    if table.is_empty() {
        warn!("spending report requested for an empty table");
        return Ok(Vec::new());
    }
    let idx = table.require_columns(&[columns::OPERATION_DATE, columns::CATEGORY, columns::AMOUNT])?;
    let (date_idx, category_idx, amount_idx) = (idx[0], idx[1], idx[2]);

    let window = rolling_window(table, as_of, DEFAULT_WINDOW_MONTHS)?;
    let wanted = category.to_lowercase();

    let mut by_month: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for row in window.rows() {
        let Some(row_category) = row.get(category_idx).and_then(|v| cell_str(v)) else {
            continue;
        };
        if row_category.to_lowercase() != wanted {
            continue;
        }
        let date = row
            .get(date_idx)
            .and_then(|v| cell_str(v))
            .and_then(parse_row_datetime);
        let Some(date) = date else { continue };
        let Some(amount) = row.get(amount_idx).and_then(|v| cell_f64(v)) else {
            continue;
        };
        let slot = by_month.entry(date.format("%Y-%m").to_string()).or_insert((0.0, 0));
        slot.0 += amount;
        slot.1 += 1;
    }

    if by_month.is_empty() {
        info!("no '{category}' transactions in the last {DEFAULT_WINDOW_MONTHS} months");
        return Ok(Vec::new());
    }

    info!("spending on '{category}' covers {} months", by_month.len());
    Ok(by_month
        .into_iter()
        .map(|(month, (total_spent, transaction_count))| CategoryMonthSummary {
            month,
            total_spent,
            transaction_count,
        })
        .collect())
}
