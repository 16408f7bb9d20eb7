//! svodka-ingest: spreadsheet loaders turning bank operation exports into
//! core tables with canonical column names.

pub mod csv_file;
pub mod headers;
pub mod xlsx;

pub use csv_file::load_operations_csv;
pub use headers::canonical_column;
pub use xlsx::{OPERATIONS_SHEET, load_operations_xlsx};
