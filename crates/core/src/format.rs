use crate::error::{HelperError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Spreadsheet containers accepted on import and produced on export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    #[default]
    Xlsx,
    Csv,
}

impl FileFormat {
    /// Match an extension, ignoring case and a leading dot.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "xlsx" => Ok(FileFormat::Xlsx),
            "csv" => Ok(FileFormat::Csv),
            _ => Err(HelperError::UnsupportedFormat {
                ext: ext.to_string(),
            }),
        }
    }

    /// Format of `path` judged by its extension alone.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext)
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Xlsx => "xlsx",
            FileFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_path() {
        assert_eq!(FileFormat::from_path(&PathBuf::from("a/b.CSV")).unwrap(), FileFormat::Csv);
        assert_eq!(FileFormat::from_path(&PathBuf::from("b.xlsx")).unwrap(), FileFormat::Xlsx);
    }

    #[test]
    fn test_rejects_other_extensions() {
        for name in ["b.xls", "b.json", "b", "b.csv.txt"] {
            assert!(matches!(
                FileFormat::from_path(&PathBuf::from(name)),
                Err(HelperError::UnsupportedFormat { .. })
            ));
        }
    }

    #[test]
    fn test_from_extension_with_dot() {
        assert_eq!(FileFormat::from_extension(".xlsx").unwrap(), FileFormat::Xlsx);
        assert_eq!(FileFormat::Csv.to_string(), "csv");
    }
}
