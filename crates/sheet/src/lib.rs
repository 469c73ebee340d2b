//! Sheet grids and spreadsheet codecs for sheetport
//!
//! A [`Sheet`] is a plain row-major grid of [`CellValue`]s. Files are decoded
//! into a grid first (CSV through the `csv` crate, XLSX through `calamine`),
//! then turned into sparse [`Record`]s with the first row as header. Exports
//! take the opposite path and are written with `csv` or `rust_xlsxwriter`.
//!
//! # Examples
//!
//! ## Records from CSV
//!
//! ```
//! use sheetport_sheet::{CellValue, Sheet};
//!
//! let sheet = Sheet::from_csv_str("name,age\nA,10\nB,").unwrap();
//! let records = sheet.to_records();
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0]["age"], CellValue::from("10"));
//! // blank cells are left out of the record
//! assert!(!records[1].contains_key("age"));
//! ```
//!
//! ## Records back to a grid
//!
//! ```
//! use sheetport_sheet::{CellValue, Record, Sheet};
//!
//! let mut record = Record::new();
//! record.insert("name".to_string(), CellValue::from("A"));
//!
//! let sheet = Sheet::from_records(&[record], &["name".to_string()]);
//! assert_eq!(sheet.to_csv_string().unwrap(), "name\nA\n");
//! ```

mod cell;
mod csv;
mod error;
mod sheet;
mod xlsx;

/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export sheet and record types.
pub use sheet::{Record, Sheet};
