//! Save a report function's result to a file.
//!
//! An explicit scoped wrapper: the caller hands over the producing function
//! and a naming strategy, and gets the result back after it has been written.
//! Tables and structured values land as pretty UTF-8 JSON (tables in record
//! orientation); a plain string result is written as-is.

use std::fs;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum FileNaming {
    /// Write exactly here.
    Explicit(PathBuf),
    /// "{label}_report_{timestamp}.json" in the working directory.
    Generated { label: String },
}

impl FileNaming {
    fn resolve(&self) -> PathBuf {
        match self {
            FileNaming::Explicit(path) => path.clone(),
            FileNaming::Generated { label } => {
                PathBuf::from(generated_file_name(label, Local::now().naive_local()))
            }
        }
    }
}

pub fn generated_file_name(label: &str, at: NaiveDateTime) -> String {
    format!("{label}_report_{}.json", at.format("%Y%m%d_%H%M%S"))
}

/// Run `produce`, write its result according to `naming`, and return it.
/// A failing producer writes nothing; its error propagates unchanged.
pub fn save_report<T, F>(naming: &FileNaming, produce: F) -> Result<T>
where
    T: Serialize,
    F: FnOnce() -> Result<T>,
{
    let result = match produce() {
        Ok(value) => value,
        Err(err) => {
            error!("report function failed, nothing written: {err}");
            return Err(err);
        }
    };

    let path = naming.resolve();
    let rendered = match serde_json::to_value(&result)? {
        Value::String(text) => text,
        value => serde_json::to_string_pretty(&value)?,
    };
    fs::write(&path, rendered)?;
    info!("report saved to {}", path.display());
    Ok(result)
}
