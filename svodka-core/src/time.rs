//! Date parsing and calendar arithmetic for statement rows.
//!
//! Bank exports carry "DD.MM.YYYY HH:MM:SS" timestamps; older rows are
//! date-only, and re-exported data sometimes arrives in ISO form. Parsing is
//! deliberately lenient: an unrecognized value is unusable data, not a fatal
//! error, and callers drop such rows with a warning.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};

pub const ROW_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";
pub const SHORT_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parse a row timestamp in any of the formats seen in the wild.
pub fn parse_row_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for format in [ROW_DATETIME_FORMAT, "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    for format in [SHORT_DATE_FORMAT, "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// "DD.MM.YYYY", the form the report shows dates in.
pub fn format_short_date(dt: NaiveDateTime) -> String {
    dt.format(SHORT_DATE_FORMAT).to_string()
}

/// First instant of the datetime's month.
pub fn start_of_month(dt: NaiveDateTime) -> NaiveDateTime {
    let first = dt.date().with_day(1).unwrap_or(dt.date());
    first.and_time(NaiveTime::MIN)
}

/// Calendar-month subtraction, so the window crosses year boundaries
/// correctly (Jan 15 minus 3 months = Oct 15 of the prior year).
pub fn months_back(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}
