use crate::cell::CellValue;
use crate::error::Result;
use crate::sheet::Sheet;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// CSV reader/writer options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Whether to use type inference when reading. Off by default: CSV
    /// cells are text.
    pub infer_types: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            quote: b'"',
            infer_types: false,
        }
    }
}

impl CsvOptions {
    /// Set the delimiter
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to infer types
    #[must_use]
    pub fn with_type_inference(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }
}

impl Sheet {
    /// Load a sheet from a CSV file with custom options
    pub fn from_csv_with_options<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(BufReader::new(file), options)
    }

    /// Load a sheet from a CSV string
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_reader(content.as_bytes(), &CsvOptions::default())
    }

    /// Load a sheet from a reader
    pub fn from_csv_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false) // header row is interpreted by `to_records`
            .flexible(true)
            .from_reader(reader);

        let mut data: Vec<Vec<CellValue>> = Vec::new();

        for result in csv_reader.records() {
            let record = result?;
            let row: Vec<CellValue> = record
                .iter()
                .map(|field| {
                    if options.infer_types {
                        CellValue::parse(field)
                    } else {
                        CellValue::String(field.to_string())
                    }
                })
                .collect();
            data.push(row);
        }

        let sheet = Sheet::from_data(data);
        tracing::debug!(rows = sheet.row_count(), columns = sheet.col_count(), "decoded csv");
        Ok(sheet)
    }

    /// Write the sheet to a writer as CSV
    pub fn write_csv<W: Write>(&self, writer: W, options: &CsvOptions) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(csv::Terminator::Any(b'\n'))
            .flexible(true)
            .from_writer(writer);

        for row in self.data() {
            let record: Vec<String> = row.iter().map(CellValue::as_str).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Convert the sheet to a CSV string
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer, &CsvOptions::default())?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_from_csv_str_keeps_text() {
        let sheet = Sheet::from_csv_str("name,age\nA,10\nB,20").unwrap();

        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.col_count(), 2);
        assert_eq!(sheet.data()[1][1], CellValue::String("10".to_string()));
    }

    #[test]
    fn test_type_inference() {
        let options = CsvOptions::default().with_type_inference(true);
        let sheet =
            Sheet::from_csv_reader("s,i,f,b,e\nhello,42,2.5,true,".as_bytes(), &options).unwrap();

        let row = &sheet.data()[1];
        assert_eq!(row[0], CellValue::String("hello".to_string()));
        assert_eq!(row[1], CellValue::Int(42));
        assert_eq!(row[2], CellValue::Float(2.5));
        assert_eq!(row[3], CellValue::Bool(true));
        assert_eq!(row[4], CellValue::Null);
    }

    #[test]
    fn test_ragged_rows() {
        let sheet = Sheet::from_csv_str("a,b,c\n1\n1,2,3,4").unwrap();
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.col_count(), 4);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let options = CsvOptions::default().with_delimiter(b';');
        let sheet = Sheet::from_csv_reader("a;b\n1;2".as_bytes(), &options).unwrap();
        assert_eq!(sheet.col_count(), 2);
    }

    #[test]
    fn test_to_csv_string_quotes() {
        let sheet = Sheet::from_data(vec![vec!["name", "note"], vec!["A", "x, y"]]);
        let csv = sheet.to_csv_string().unwrap();
        assert!(csv.contains("\"x, y\""));
    }

    #[test]
    fn test_save_and_load_csv_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.csv");

        let sheet = Sheet::from_data(vec![vec![1, 2], vec![3, 4]]);
        std::fs::write(&file_path, sheet.to_csv_string().unwrap()).unwrap();

        let loaded = Sheet::from_csv_with_options(&file_path, &CsvOptions::default()).unwrap();
        assert_eq!(loaded.row_count(), 2);
        assert_eq!(loaded.data()[1][0], CellValue::String("3".to_string()));
    }
}
