//! Editor configuration

use crate::error::{Error, Result};
use crate::notice::DEFAULT_NOTICE_DURATION_MS;
use crate::store::DEFAULT_STORAGE_KEY;
use crate::transfer::EXPORT_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Where the help action points
pub const HELP_URL: &str = "https://github.com/psidex/CustomBangSearch#options-page";

/// Settings of an editor session
///
/// Every field has a default, so a config file only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Key the mapping is stored under
    pub storage_key: String,
    /// How long the import error notice stays visible
    pub notice_duration_ms: u32,
    /// Shortcut placed in a freshly added row
    pub new_row_shortcut: String,
    /// URL placed in a freshly added row
    pub new_row_url: String,
    /// File name of the export artifact
    pub export_file_name: String,
    /// Target of the help action
    pub help_url: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            notice_duration_ms: DEFAULT_NOTICE_DURATION_MS,
            new_row_shortcut: "e".to_string(),
            new_row_url: "https://example.com?q=%s".to_string(),
            export_file_name: EXPORT_FILE_NAME.to_string(),
            help_url: HELP_URL.to_string(),
        }
    }
}

impl EditorConfig {
    /// Load a config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the config to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.storage_key, "bangs");
        assert_eq!(config.notice_duration_ms, 4000);
        assert_eq!(config.export_file_name, "custombangs.json");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"notice_duration_ms": 1500}"#).unwrap();
        assert_eq!(config.notice_duration_ms, 1500);
        assert_eq!(config.new_row_shortcut, "e");
        assert_eq!(config.new_row_url, "https://example.com?q=%s");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = EditorConfig {
            storage_key: "custom".to_string(),
            ..EditorConfig::default()
        };

        config.save(&path).unwrap();

        assert_eq!(EditorConfig::load(&path).unwrap(), config);
    }
}
