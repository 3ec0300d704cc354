//! Sources of the default bang set

use crate::error::{Error, Result};
use crate::mapping::BangMapping;
use crate::validator::validate_json;
use std::path::{Path, PathBuf};

/// Default location of the defaults resource
pub const DEFAULT_DEFAULTS_PATH: &str = "defaults.json";

/// Something that can produce the default mapping
#[allow(async_fn_in_trait)]
pub trait DefaultsSource {
    async fn fetch_defaults(&self) -> Result<BangMapping>;
}

/// A fixed mapping serves as its own defaults
impl DefaultsSource for BangMapping {
    async fn fetch_defaults(&self) -> Result<BangMapping> {
        Ok(self.clone())
    }
}

/// Defaults read from a JSON file of `{ shortcut: url }`
#[derive(Debug, Clone)]
pub struct FileDefaults {
    path: PathBuf,
}

impl FileDefaults {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileDefaults {
    fn default() -> Self {
        Self::new(DEFAULT_DEFAULTS_PATH)
    }
}

impl DefaultsSource for FileDefaults {
    async fn fetch_defaults(&self) -> Result<BangMapping> {
        let location = self.path.display().to_string();
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::Defaults {
                location: location.clone(),
                message: e.to_string(),
            })?;
        validate_json(&content).map_err(|e| Error::Defaults {
            location,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("defaults.json");
        std::fs::write(&path, r#"{"d":"https://duckduckgo.com?q=%s","g":"https://google.com?q=%s"}"#).unwrap();

        let defaults = FileDefaults::new(&path).fetch_defaults().await.unwrap();

        assert_eq!(defaults.shortcuts().collect::<Vec<_>>(), vec!["d", "g"]);
    }

    #[tokio::test]
    async fn test_missing_defaults_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileDefaults::new(dir.path().join("nope.json"))
            .fetch_defaults()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Defaults { .. }));
    }

    #[tokio::test]
    async fn test_invalid_defaults_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("defaults.json");
        std::fs::write(&path, r#"["not", "an", "object"]"#).unwrap();

        let err = FileDefaults::new(&path).fetch_defaults().await.unwrap_err();
        assert!(matches!(err, Error::Defaults { .. }));
    }
}
