//! svodka-core: the pure aggregation and filtering pipeline that turns a raw
//! bank-statement table into report fragments.
//!
//! Everything here is synchronous, reentrant, and free of I/O (the one
//! exception is [`persist::save_report`], the explicit write-to-file
//! wrapper). Spreadsheet loading and the market-data APIs live in the
//! `svodka-ingest` and `svodka-market` crates.

pub mod cards;
pub mod error;
pub mod filters;
pub mod persist;
pub mod report;
pub mod spending;
pub mod table;
pub mod time;
pub mod top;
pub mod transfers;

pub use cards::{CASHBACK_RATE, CardSummary, cashback_by_card};
pub use error::{ReportError, Result};
pub use filters::{DEFAULT_WINDOW_MONTHS, month_to_date, rolling_window};
pub use persist::{FileNaming, generated_file_name, save_report};
pub use report::{Report, build_report, greeting, greeting_for_hour, report_to_json};
pub use spending::{CategoryMonthSummary, spending_by_category};
pub use table::{Table, cell_f64, cell_str, columns};
pub use time::{format_short_date, months_back, parse_row_datetime, start_of_month};
pub use top::{DEFAULT_TOP_N, MISSING_LABEL, TopTransaction, top_transactions};
pub use transfers::{TRANSFER_CATEGORY, find_person_transfers, person_transfers_json};

/// Round to 2 decimal places, the precision money fields carry in reports.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn test_round2() {
        assert_eq!(round2(2.0075), 2.01);
        assert_eq!(round2(150.754), 150.75);
        assert_eq!(round2(-0.005), -0.01);
        assert_eq!(round2(100.0), 100.0);
    }
}
