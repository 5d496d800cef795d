//! Configuration Module
//!
//! Settings are read from `config.toml` in the platform config directory
//! (`~/.config/snipcase/config.toml` on Linux). The file is optional and every
//! field has a default, so a partial file only overrides what it names.

use crate::models::storage::DEFAULT_QUOTA_BYTES;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "snipcase";
const CONFIG_FILE: &str = "config.toml";
const STORAGE_FILE: &str = "storage.json";
const LOG_FILE: &str = "snipcase.log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `tracing` filter directive used when `RUST_LOG` is not set
    pub log_filter: String,
    pub storage: StorageConfig,
    pub editor: EditorConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the storage file and the log; defaults to the platform data dir
    pub path: Option<PathBuf>,
    /// Largest accepted item in bytes. `0` disables the check.
    pub quota_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Highlighting mode used when the language field is empty
    pub mode: String,
    pub line_numbers: bool,
    pub theme: String,
    pub tab_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: String::from("info"),
            storage: StorageConfig::default(),
            editor: EditorConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            mode: String::from("javascript"),
            line_numbers: true,
            theme: String::from("base16-mocha.dark"),
            tab_width: 4,
        }
    }
}

impl Config {
    /// Loads the user's config file, falling back to defaults when there is none.
    pub fn load() -> Result<Self> {
        match dirs::config_dir() {
            Some(dir) => Self::load_from(&dir.join(APP_DIR).join(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.storage.path {
            Some(path) => Ok(path.clone()),
            None => Ok(dirs::data_dir()
                .context("Failed to get data directory")?
                .join(APP_DIR)),
        }
    }

    pub fn storage_file(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(STORAGE_FILE))
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(LOG_FILE))
    }

    pub fn quota(&self) -> Option<usize> {
        match self.storage.quota_bytes {
            0 => None,
            bytes => Some(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [editor]
            mode = "rust"
            "#,
        )
        .unwrap();

        assert_eq!(config.editor.mode, "rust");
        assert!(config.editor.line_numbers);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.quota(), Some(DEFAULT_QUOTA_BYTES));
    }

    #[test]
    fn storage_path_overrides_data_dir() {
        let config = Config::from_toml_str(
            r#"
            [storage]
            path = "/tmp/snips"
            quota_bytes = 0
            "#,
        )
        .unwrap();

        assert_eq!(
            config.storage_file().unwrap(),
            PathBuf::from("/tmp/snips/storage.json")
        );
        assert_eq!(config.quota(), None);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_filter = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }
}
