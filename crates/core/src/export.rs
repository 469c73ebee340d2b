//! Write datasets back out as spreadsheet files.
//!
//! [`encode_dataset`] produces the bytes of one file; [`run_plan`] decides
//! which rows go into which files for the three export choices (current
//! view, full dataset, per-group files) and writes them one after another.

use crate::error::{HelperError, Result};
use crate::format::FileFormat;
use crate::group::group_by;
use crate::model::{find_field, Dataset, Field, ID_FIELD};
use crate::sort::{apply_sort, SortDirection};
use indexmap::IndexSet;
use sheetport_sheet::{CsvOptions, Sheet};
use std::path::{Path, PathBuf};

/// Stem used for a blank or unusable file name.
const BLANK_STEM: &str = "_blank";

/// Options for encoding exports
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Worksheet name in XLSX files
    pub sheet_name: String,
    /// CSV encoding
    pub csv: CsvOptions,
    /// Stem used when no file name is given
    pub default_file_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            sheet_name: "Sheet1".to_string(),
            csv: CsvOptions::default(),
            default_file_name: "example".to_string(),
        }
    }
}

impl ExportOptions {
    /// Set the worksheet name
    #[must_use]
    pub fn with_sheet_name(mut self, name: &str) -> Self {
        self.sheet_name = name.to_string();
        self
    }

    /// Set the default file stem
    #[must_use]
    pub fn with_default_file_name(mut self, name: &str) -> Self {
        self.default_file_name = name.to_string();
        self
    }
}

/// Which groups a grouped export writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupSelection {
    /// Every group, each file named by its position in the group list
    All,
    /// The listed group values, each file named by its value
    Selected(Vec<String>),
}

/// What to export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportPlan {
    /// The currently displayed rows
    CurrentView,
    /// The whole base dataset, optionally sorted by one field
    Full {
        sort: Option<(String, SortDirection)>,
    },
    /// One file per group of the base dataset
    Grouped {
        field: String,
        selection: GroupSelection,
    },
}

/// Files produced by an export, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub files: Vec<PathBuf>,
}

/// Encode `dataset` as one file, without the synthetic `id`.
///
/// Columns follow `fields`; keys the rows carry beyond them are appended.
pub fn encode_dataset(
    dataset: &Dataset,
    fields: &[Field],
    format: FileFormat,
    options: &ExportOptions,
) -> Result<Vec<u8>> {
    let header: Vec<String> = fields
        .iter()
        .filter(|f| f.key != ID_FIELD)
        .map(|f| f.key.clone())
        .collect();
    let mut sheet = Sheet::from_records(&dataset.export_rows(), &header);

    let bytes = match format {
        FileFormat::Csv => {
            let mut buffer = Vec::new();
            sheet.write_csv(&mut buffer, &options.csv)?;
            buffer
        }
        FileFormat::Xlsx => {
            sheet.set_name(&options.sheet_name);
            sheet.to_xlsx_bytes()?
        }
    };
    Ok(bytes)
}

/// Encode and write one file. Any failure is reported as an export error.
pub fn export_dataset(
    dataset: &Dataset,
    fields: &[Field],
    path: &Path,
    format: FileFormat,
    options: &ExportOptions,
) -> Result<()> {
    let export_error = |message: String| HelperError::Export {
        file: path.display().to_string(),
        message,
    };

    let bytes = encode_dataset(dataset, fields, format, options)
        .map_err(|e| export_error(e.to_string()))?;
    std::fs::write(path, bytes).map_err(|e| export_error(e.to_string()))?;

    tracing::info!(path = %path.display(), rows = dataset.len(), "exported file");
    Ok(())
}

/// Make `stem` usable as a file name.
///
/// Path separators, characters reserved on common filesystems and control
/// characters become `_`.
#[must_use]
pub fn sanitize_file_stem(stem: &str) -> String {
    let cleaned: String = stem
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if cleaned.chars().all(|c| c == '.') {
        BLANK_STEM.to_string()
    } else {
        cleaned
    }
}

/// Run `plan` against a workspace's data, writing into `dir`.
///
/// Fields, sort keys and selected groups are validated before anything is
/// written. Files are then written in order and the first failure stops the
/// run; files already written are left in place.
#[allow(clippy::too_many_arguments)]
pub fn run_plan(
    plan: &ExportPlan,
    view: &Dataset,
    base: &Dataset,
    fields: &[Field],
    dir: &Path,
    name: Option<&str>,
    format: FileFormat,
    options: &ExportOptions,
) -> Result<ExportReport> {
    let stem = name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(options.default_file_name.as_str());

    let jobs: Vec<(String, Dataset)> = match plan {
        ExportPlan::CurrentView => vec![(sanitize_file_stem(stem), view.clone())],
        ExportPlan::Full { sort: None } => vec![(sanitize_file_stem(stem), base.clone())],
        ExportPlan::Full {
            sort: Some((field, direction)),
        } => {
            find_field(fields, field)?;
            vec![(sanitize_file_stem(stem), apply_sort(base, field, *direction))]
        }
        ExportPlan::Grouped { field, selection } => {
            find_field(fields, field)?;
            let groups = group_by(base, field);
            let jobs = match selection {
                GroupSelection::All => groups
                    .iter()
                    .enumerate()
                    .map(|(index, (_, rows))| ((index + 1).to_string(), rows.clone()))
                    .collect(),
                GroupSelection::Selected(keys) => {
                    let mut stems = IndexSet::new();
                    groups
                        .select(keys)?
                        .into_iter()
                        .map(|(key, rows)| (unique_stem(&mut stems, key), rows.clone()))
                        .collect()
                }
            };
            jobs
        }
    };

    let mut report = ExportReport::default();
    for (stem, rows) in jobs {
        let path = dir.join(format!("{stem}.{}", format.extension()));
        export_dataset(&rows, fields, &path, format, options)?;
        report.files.push(path);
    }
    Ok(report)
}

/// Sanitized stem for a group key, suffixed when two keys collide.
///
/// Collisions ignore case, as they do on case-insensitive filesystems.
fn unique_stem(taken: &mut IndexSet<String>, key: &str) -> String {
    let base = sanitize_file_stem(key);
    let mut candidate = base.clone();
    let mut suffix = 1;
    while !taken.insert(candidate.to_lowercase()) {
        candidate = format!("{base}_{suffix}");
        suffix += 1;
    }
    candidate
}
