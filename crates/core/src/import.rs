//! Decode an uploaded file into raw rows.

use crate::error::Result;
use crate::format::FileFormat;
use crate::model::Row;
use sheetport_sheet::{CsvOptions, Sheet};
use std::path::Path;

/// Options for decoding imports
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// CSV decoding; XLSX cells are already typed
    pub csv: CsvOptions,
}

impl ImportOptions {
    /// Set whether CSV text is type-inferred
    #[must_use]
    pub fn with_type_inference(mut self, infer_types: bool) -> Self {
        self.csv = self.csv.with_type_inference(infer_types);
        self
    }

    /// Set the CSV delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.csv = self.csv.with_delimiter(delimiter);
        self
    }
}

/// Decode the first sheet of a `.csv` or `.xlsx` file into rows.
///
/// The extension is checked before the file is opened.
pub fn import_file(path: &Path, options: &ImportOptions) -> Result<Vec<Row>> {
    let format = FileFormat::from_path(path)?;
    let sheet = match format {
        FileFormat::Csv => Sheet::from_csv_with_options(path, &options.csv)?,
        FileFormat::Xlsx => Sheet::from_xlsx(path)?,
    };
    let rows = sheet.to_records();
    tracing::debug!(path = %path.display(), %format, rows = rows.len(), "imported file");
    Ok(rows)
}

/// Decode in-memory file contents into rows.
pub fn import_bytes(format: FileFormat, bytes: &[u8], options: &ImportOptions) -> Result<Vec<Row>> {
    let sheet = match format {
        FileFormat::Csv => Sheet::from_csv_reader(bytes, &options.csv)?,
        FileFormat::Xlsx => Sheet::from_xlsx_bytes(bytes)?,
    };
    Ok(sheet.to_records())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HelperError;
    use sheetport_sheet::CellValue;
    use tempfile::tempdir;

    #[test]
    fn test_import_csv_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("people.csv");
        std::fs::write(&path, "name,age\nA,10\nB,20\n").unwrap();

        let rows = import_file(&path, &ImportOptions::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["age"], CellValue::from("20"));
    }

    #[test]
    fn test_unsupported_extension_is_not_opened() {
        // the file does not exist: rejection must come from the extension check
        let err = import_file(Path::new("/nonexistent/data.json"), &ImportOptions::default())
            .unwrap_err();
        assert!(matches!(err, HelperError::UnsupportedFormat { ext } if ext == "json"));
    }

    #[test]
    fn test_malformed_xlsx_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, "name,age\n").unwrap();

        assert!(matches!(
            import_file(&path, &ImportOptions::default()),
            Err(HelperError::Sheet(_))
        ));
    }

    #[test]
    fn test_import_bytes_with_inference() {
        let options = ImportOptions::default().with_type_inference(true).with_delimiter(b';');
        let rows = import_bytes(FileFormat::Csv, b"n;b\n3;true", &options).unwrap();

        assert_eq!(rows[0]["n"], CellValue::Int(3));
        assert_eq!(rows[0]["b"], CellValue::Bool(true));
    }
}
