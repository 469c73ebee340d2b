use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::from_number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel serial date: days since 1899-12-30
        Data::DateTime(dt) => CellValue::from_number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

/// Read the first worksheet of an opened workbook
fn read_first_sheet<RS: Read + Seek>(workbook: &mut Xlsx<RS>) -> Result<Sheet> {
    let sheet_names = workbook.sheet_names();
    let Some(first) = sheet_names.first() else {
        return Ok(Sheet::new());
    };

    let range = workbook
        .worksheet_range(first)
        .map_err(SheetError::xlsx)?;

    let data: Vec<Vec<CellValue>> = range
        .rows()
        .map(|row| row.iter().map(data_to_cell_value).collect())
        .collect();

    let mut sheet = Sheet::from_data(data);
    sheet.set_name(first);
    tracing::debug!(sheet = %first, rows = sheet.row_count(), columns = sheet.col_count(), "decoded xlsx");
    Ok(sheet)
}

impl Sheet {
    /// Load the first sheet of an Excel file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be opened or is not a valid workbook.
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut workbook: Xlsx<BufReader<File>> =
            open_workbook(path.as_ref()).map_err(SheetError::xlsx)?;
        read_first_sheet(&mut workbook)
    }

    /// Load the first sheet of an in-memory Excel file
    ///
    /// # Errors
    ///
    /// Returns error if the bytes are not a valid workbook.
    pub fn from_xlsx_bytes(bytes: &[u8]) -> Result<Self> {
        let mut workbook = Xlsx::new(Cursor::new(bytes)).map_err(SheetError::xlsx)?;
        read_first_sheet(&mut workbook)
    }

    /// Encode the sheet as an Excel file in memory
    ///
    /// # Errors
    ///
    /// Returns error if the workbook cannot be assembled.
    pub fn to_xlsx_bytes(&self) -> Result<Vec<u8>> {
        let mut workbook = self.to_workbook()?;
        workbook.save_to_buffer().map_err(SheetError::xlsx)
    }

    fn to_workbook(&self) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        self.write_to_worksheet(worksheet)?;
        Ok(workbook)
    }

    /// Write sheet data to a worksheet
    fn write_to_worksheet(&self, worksheet: &mut Worksheet) -> Result<()> {
        worksheet.set_name(self.name()).map_err(SheetError::xlsx)?;

        for (row_idx, row) in self.data().iter().enumerate() {
            let row_num = u32::try_from(row_idx)
                .map_err(|_| SheetError::TooLarge(format!("row {row_idx}")))?;

            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = u16::try_from(col_idx)
                    .map_err(|_| SheetError::TooLarge(format!("column {col_idx}")))?;

                match cell {
                    CellValue::Null => {}
                    CellValue::Bool(b) => {
                        worksheet
                            .write_boolean(row_num, col_num, *b)
                            .map_err(SheetError::xlsx)?;
                    }
                    CellValue::Int(i) => {
                        // Excel stores all numbers as f64; integers above 2^53 lose precision
                        worksheet
                            .write_number(row_num, col_num, *i as f64)
                            .map_err(SheetError::xlsx)?;
                    }
                    CellValue::Float(f) => {
                        worksheet
                            .write_number(row_num, col_num, *f)
                            .map_err(SheetError::xlsx)?;
                    }
                    CellValue::String(s) if s.is_empty() => {}
                    CellValue::String(s) => {
                        worksheet
                            .write_string(row_num, col_num, s)
                            .map_err(SheetError::xlsx)?;
                    }
                    CellValue::Nested(v) => {
                        worksheet
                            .write_string(row_num, col_num, v.to_string())
                            .map_err(SheetError::xlsx)?;
                    }
                }
            }
        }

        Ok(())
    }
}
