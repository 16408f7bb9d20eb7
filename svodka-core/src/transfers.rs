//! Person-to-person transfer detection over raw statement records.

use regex::Regex;
use serde_json::Value;
use tracing::info;

use crate::error::Result;

/// Category label the bank assigns to transfers.
pub const TRANSFER_CATEGORY: &str = "Переводы";

/// "Имя Ф.": a Cyrillic first name, one space, one uppercase initial, a
/// period, nothing else.
const PERSON_PATTERN: &str = r"^[А-Яа-я]+\s[А-Я]\.$";

/// Records that are transfers to a private person: category is exactly
/// "Переводы" and the trimmed description looks like "Валерий А.".
/// Records without a description never match.
pub fn find_person_transfers(operations: &[Value]) -> Result<Vec<Value>> {
    let pattern = Regex::new(PERSON_PATTERN)?;
    let matched: Vec<Value> = operations
        .iter()
        .filter(|op| is_person_transfer(op, &pattern))
        .cloned()
        .collect();
    info!("found {} person transfers", matched.len());
    Ok(matched)
}

/// Pretty UTF-8 JSON of the matching records.
pub fn person_transfers_json(operations: &[Value]) -> Result<String> {
    let transfers = find_person_transfers(operations)?;
    Ok(serde_json::to_string_pretty(&transfers)?)
}

fn is_person_transfer(operation: &Value, pattern: &Regex) -> bool {
    let category = operation.get("category").and_then(Value::as_str);
    let description = operation
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("");
    category == Some(TRANSFER_CATEGORY) && pattern.is_match(description.trim())
}
