//! User settings file: which currencies and stocks the report should track.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default)]
    pub user_currencies: Vec<String>,
    #[serde(default)]
    pub user_stocks: Vec<String>,
}

pub fn load_settings(path: &Path) -> Result<UserSettings> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_settings(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_settings.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "{contents}").unwrap();
        (dir, path)
    }

    #[test]
    fn test_loads_currencies_and_stocks() {
        let (_dir, path) =
            write_settings(r#"{"user_currencies": ["USD", "EUR"], "user_stocks": ["AAPL", "GOOGL"]}"#);
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.user_currencies, vec!["USD", "EUR"]);
        assert_eq!(settings.user_stocks, vec!["AAPL", "GOOGL"]);
    }

    #[test]
    fn test_absent_keys_default_to_empty() {
        let (_dir, path) = write_settings("{}");
        let settings = load_settings(&path).unwrap();
        assert!(settings.user_currencies.is_empty());
        assert!(settings.user_stocks.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_settings(&dir.path().join("nope.json")).is_err());
    }
}
