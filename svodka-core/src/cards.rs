//! Per-card cashback aggregation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{ReportError, Result};
use crate::round2;
use crate::table::{Table, cell_f64, cell_str, columns};

/// 1% of total spend.
pub const CASHBACK_RATE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSummary {
    /// Last 4 characters of the card number.
    pub last_digits: String,
    pub total_spent: f64,
    pub cashback: f64,
}

/// Aggregate expenses by card and compute cashback.
///
/// Only rows with a negative amount and a non-null card number count.
/// Summaries come back sorted by total spend descending; equal totals keep
/// the order the cards first appeared in.
pub fn cashback_by_card(table: &Table) -> Result<Vec<CardSummary>> {
    if table.is_empty() {
        error!("cashback requested for an empty table");
        return Err(ReportError::EmptyTable);
    }
    let idx = table.require_columns(&[columns::CARD_NUMBER, columns::AMOUNT])?;
    let (card_idx, amount_idx) = (idx[0], idx[1]);

    let mut order: Vec<String> = Vec::new();
    let mut totals: HashMap<String, f64> = HashMap::new();
    for row in table.rows() {
        let Some(amount) = row.get(amount_idx).and_then(|v| cell_f64(v)) else {
            continue;
        };
        if amount >= 0.0 {
            continue;
        }
        let Some(card) = row.get(card_idx).and_then(|v| cell_str(v)) else {
            continue;
        };
        let key = last_digits(card);
        if !totals.contains_key(&key) {
            order.push(key.clone());
        }
        *totals.entry(key).or_insert(0.0) += amount.abs();
    }

    let mut summaries: Vec<CardSummary> = order
        .into_iter()
        .map(|key| {
            let total = totals.get(&key).copied().unwrap_or(0.0);
            CardSummary {
                last_digits: key,
                total_spent: round2(total),
                cashback: round2(total * CASHBACK_RATE),
            }
        })
        .collect();
    summaries.sort_by(|a, b| b.total_spent.total_cmp(&a.total_spent));

    info!("aggregated cashback for {} cards", summaries.len());
    Ok(summaries)
}

/// Grouping key: the last 4 characters of the card string, or the whole
/// string when it is shorter.
fn last_digits(card: &str) -> String {
    let chars: Vec<char> = card.chars().collect();
    let start = chars.len().saturating_sub(4);
    chars[start..].iter().collect()
}
