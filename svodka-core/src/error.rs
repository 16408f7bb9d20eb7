//! Error taxonomy for the report pipeline.
//!
//! Structural problems (missing columns, empty input where data is required)
//! are hard errors. Empty results are not errors and never reach this type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// One or more required columns are absent, listed in declared order.
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("transaction table is empty")]
    EmptyTable,

    /// The month-to-date slice came back empty; the report would be vacuous.
    #[error("no transactions in the requested period")]
    NoDataForPeriod,

    #[error("row has {got} cells, expected {want}")]
    RowShape { got: usize, want: usize },

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
