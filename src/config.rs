//! Configuration loaded from config.json.
//!
//! If the config file doesn't exist or can't be parsed, default values are
//! used. Missing fields fall back to their defaults individually.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::bar::{CountScope, DEFAULT_TOLERANCE};
use crate::skills::DEFAULT_BUGGED_TEXTS;

/// Settings for both analyzers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalsConfig {
    /// Half-width of the bar intensity window
    pub tolerance: i64,
    /// Which window matches count toward the bar ratio
    pub count_scope: CountScope,
    /// Line that opens the skills section
    pub start_keyword: String,
    /// Line that closes the skills section
    pub end_keyword: String,
    /// Leading words treated as OCR artefacts
    pub bugged_texts: Vec<String>,
}

impl Default for SignalsConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            count_scope: CountScope::Sequence,
            start_keyword: "SKILLS".to_string(),
            end_keyword: "CERTIFICATES".to_string(),
            bugged_texts: DEFAULT_BUGGED_TEXTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SignalsConfig {
    /// Load config from file, or return defaults if file doesn't exist.
    pub fn load(config_path: &Path) -> Self {
        if config_path.exists() {
            match fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => {
                        crate::log(&format!("Loaded config from {}", config_path.display()));
                        return config;
                    }
                    Err(e) => {
                        crate::log(&format!("Failed to parse config: {}. Using defaults.", e));
                    }
                },
                Err(e) => {
                    crate::log(&format!("Failed to read config: {}. Using defaults.", e));
                }
            }
        } else {
            crate::log("config.json not found. Using default config.");
        }
        Self::default()
    }

    /// Save default config to file (for reference).
    pub fn save_default(config_path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&Self::default())?;
        fs::write(config_path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = SignalsConfig::load(&dir.path().join("config.json"));
        assert_eq!(config, SignalsConfig::default());
        assert_eq!(config.tolerance, 10);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"tolerance": 4, "count_scope": "bar_span"}"#).unwrap();

        let config = SignalsConfig::load(&path);
        assert_eq!(config.tolerance, 4);
        assert_eq!(config.count_scope, CountScope::BarSpan);
        assert_eq!(config.start_keyword, "SKILLS");
        assert_eq!(config.bugged_texts.len(), 3);
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(SignalsConfig::load(&path), SignalsConfig::default());
    }

    #[test]
    fn test_save_default_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        SignalsConfig::save_default(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"count_scope\": \"sequence\""));
        assert_eq!(SignalsConfig::load(&path), SignalsConfig::default());
    }
}
