//! Assembles the event report: greeting, card summaries, top transactions,
//! and the externally fetched market data.

use chrono::{Local, NaiveDateTime, Timelike};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use crate::cards::{CardSummary, cashback_by_card};
use crate::error::{ReportError, Result};
use crate::filters::month_to_date;
use crate::table::Table;
use crate::top::{DEFAULT_TOP_N, TopTransaction, top_transactions};

/// Time-of-day greeting for a given hour.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Доброе утро",
        12..=17 => "Добрый день",
        18..=22 => "Добрый вечер",
        _ => "Доброй ночи",
    }
}

/// Greeting for the current local hour.
pub fn greeting() -> &'static str {
    greeting_for_hour(Local::now().hour())
}

/// The assembled report. Field order is the serialization order.
/// `currency_rates` and `stock_prices` are embedded verbatim; their shape
/// belongs to the API clients, not to this crate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub greeting: String,
    pub cards: Vec<CardSummary>,
    pub top_transactions: Vec<TopTransaction>,
    pub currency_rates: Value,
    pub stock_prices: Value,
}

/// Build the month-to-date report as of `as_of`.
///
/// Short-circuits with [`ReportError::NoDataForPeriod`] when the month slice
/// is empty: a report built from zero rows would be indistinguishable from a
/// legitimate zero-transaction month. Aggregator errors propagate unchanged.
pub fn build_report(
    table: &Table,
    as_of: NaiveDateTime,
    currency_rates: Value,
    stock_prices: Value,
) -> Result<Report> {
    let filtered = month_to_date(table, as_of);
    if filtered.is_empty() {
        error!("no rows between the start of the month and {as_of}");
        return Err(ReportError::NoDataForPeriod);
    }
    Ok(Report {
        greeting: greeting().to_string(),
        cards: cashback_by_card(&filtered)?,
        top_transactions: top_transactions(&filtered, DEFAULT_TOP_N)?,
        currency_rates,
        stock_prices,
    })
}

/// JSON view of a report outcome: the report itself, or a single top-level
/// `{"error": ...}` object, never a mix of failed and successful sections.
pub fn report_to_json(outcome: Result<Report>) -> Value {
    match outcome.and_then(|report| Ok(serde_json::to_value(&report)?)) {
        Ok(value) => value,
        Err(err) => json!({"error": err.to_string()}),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::columns;
    use crate::time::parse_row_datetime;
    use serde_json::json;

    fn operations_table() -> Table {
        let mut table = Table::new([
            columns::OPERATION_DATE,
            columns::CARD_NUMBER,
            columns::AMOUNT,
            columns::CATEGORY,
            columns::DESCRIPTION,
        ]);
        for (date, card, amount, category, description) in [
            ("31.12.2021 16:44:00", "*7197", -160.89, "Супермаркеты", "Колхоз"),
            ("30.12.2021 17:50:17", "*7197", -349.0, "Связь", "МТС"),
            ("05.12.2021 12:00:00", "*5091", -1500.0, "Переводы", "Валерий А."),
        ] {
            table
                .push_row(vec![
                    json!(date),
                    json!(card),
                    json!(amount),
                    json!(category),
                    json!(description),
                ])
                .unwrap();
        }
        table
    }

    #[test]
    fn test_greeting_bands() {
        assert_eq!(greeting_for_hour(7), "Доброе утро");
        assert_eq!(greeting_for_hour(14), "Добрый день");
        assert_eq!(greeting_for_hour(21), "Добрый вечер");
        assert_eq!(greeting_for_hour(4), "Доброй ночи");
        assert_eq!(greeting_for_hour(23), "Доброй ночи");
        assert_eq!(greeting_for_hour(5), "Доброе утро");
    }

    #[test]
    fn test_builds_report_from_month_slice() {
        let as_of = parse_row_datetime("2021-12-31 23:59:59").unwrap();
        let report = build_report(
            &operations_table(),
            as_of,
            json!([{"currency": "USD", "rate": 75.45}]),
            json!([{"stock": "AAPL", "price": 11250.75, "currency": "RUB"}]),
        )
        .unwrap();
        assert_eq!(report.cards.len(), 2);
        assert_eq!(report.cards[0].last_digits, "5091");
        assert_eq!(report.top_transactions.len(), 3);
        assert_eq!(report.currency_rates[0]["currency"], json!("USD"));
    }

    #[test]
    fn test_empty_month_short_circuits() {
        let as_of = parse_row_datetime("2019-01-31 23:59:59").unwrap();
        let outcome = build_report(&operations_table(), as_of, json!([]), json!([]));
        assert!(matches!(outcome, Err(ReportError::NoDataForPeriod)));
    }

    #[test]
    fn test_report_json_field_order() {
        let as_of = parse_row_datetime("2021-12-31 23:59:59").unwrap();
        let report = build_report(&operations_table(), as_of, json!([]), json!([])).unwrap();
        let rendered = serde_json::to_string(&report).unwrap();
        let positions: Vec<usize> = [
            "\"greeting\"",
            "\"cards\"",
            "\"top_transactions\"",
            "\"currency_rates\"",
            "\"stock_prices\"",
        ]
        .iter()
        .map(|key| rendered.find(key).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_error_outcome_becomes_error_object() {
        let value = report_to_json(Err(ReportError::NoDataForPeriod));
        assert_eq!(
            value,
            json!({"error": "no transactions in the requested period"})
        );
    }
}
