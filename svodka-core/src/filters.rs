//! Date-bounded table filters feeding the aggregators.

use chrono::{Local, NaiveDate, NaiveDateTime};
use tracing::{error, info, warn};

use crate::error::Result;
use crate::table::{Table, cell_str, columns};
use crate::time::{months_back, parse_row_datetime, start_of_month};

pub const DEFAULT_WINDOW_MONTHS: u32 = 3;

/// Rows whose operation date falls in the `months`-calendar-month window
/// ending at `as_of` (today when unset), inclusive on both ends. Rows with
/// unparseable dates are dropped with a warning; a missing date column is a
/// structural error.
pub fn rolling_window(table: &Table, as_of: Option<NaiveDate>, months: u32) -> Result<Table> {
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let start = months_back(as_of, months);
    let idx = table.require_columns(&[columns::OPERATION_DATE])?;
    let date_idx = idx[0];

    let mut dropped = 0usize;
    let mut rows = Vec::new();
    for row in table.rows() {
        match row.get(date_idx).and_then(|v| cell_str(v)).and_then(parse_row_datetime) {
            Some(dt) => {
                let date = dt.date();
                if date >= start && date <= as_of {
                    rows.push(row.clone());
                }
            }
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!("rolling window dropped {dropped} rows with unparseable dates");
    }
    info!(
        "rolling window {start}..{as_of}: kept {} of {} rows",
        rows.len(),
        table.len()
    );
    Ok(table.with_rows(rows))
}

/// Rows from the first instant of `as_of`'s month through `as_of` inclusive.
///
/// Fail-open policy: this filter feeds a best-effort report, so any failure
/// (e.g. the date column is missing entirely) logs and returns the original
/// table unfiltered instead of raising.
pub fn month_to_date(table: &Table, as_of: NaiveDateTime) -> Table {
    match month_to_date_strict(table, as_of) {
        Ok(filtered) => filtered,
        Err(err) => {
            error!("month-to-date filter failed, keeping all rows: {err}");
            table.clone()
        }
    }
}

fn month_to_date_strict(table: &Table, as_of: NaiveDateTime) -> Result<Table> {
    let idx = table.require_columns(&[columns::OPERATION_DATE])?;
    let date_idx = idx[0];
    let start = start_of_month(as_of);

    let mut dropped = 0usize;
    let mut rows = Vec::new();
    for row in table.rows() {
        match row.get(date_idx).and_then(|v| cell_str(v)).and_then(parse_row_datetime) {
            Some(dt) if dt >= start && dt <= as_of => rows.push(row.clone()),
            Some(_) => {}
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!("month filter dropped {dropped} rows with unparseable dates");
    }
    info!(
        "month filter {start}..{as_of}: kept {} of {} rows",
        rows.len(),
        table.len()
    );
    Ok(table.with_rows(rows))
}
