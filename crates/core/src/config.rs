//! Settings loaded from an optional YAML file.

use crate::error::{HelperError, Result};
use crate::format::FileFormat;
use crate::filter::MatchMode;
use crate::persist::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the storage directory.
pub const HOME_ENV: &str = "SHEETPORT_HOME";

/// sheetport settings. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HelperConfig {
    /// Directory of the snapshot store
    pub storage_dir: Option<PathBuf>,
    /// Key of the snapshot slot
    pub storage_key: String,
    /// Container used when an export does not name one
    pub default_format: FileFormat,
    /// File stem used when an export does not name one
    pub default_file_name: String,
    /// Worksheet name in XLSX exports
    pub sheet_name: String,
    /// Initial search mode
    pub match_mode: MatchMode,
    /// Infer numbers/booleans from CSV text on import
    pub infer_csv_types: bool,
}

impl Default for HelperConfig {
    fn default() -> Self {
        HelperConfig {
            storage_dir: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_format: FileFormat::Xlsx,
            default_file_name: "example".to_string(),
            sheet_name: "Sheet1".to_string(),
            match_mode: MatchMode::Exact,
            infer_csv_types: false,
        }
    }
}

impl HelperConfig {
    /// Parse settings from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| HelperError::Config(e.to_string()))
    }

    /// Load settings from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HelperError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `SHEETPORT_HOME` when set and non-empty
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            self.storage_dir = Some(PathBuf::from(home));
        }
        self
    }
}
