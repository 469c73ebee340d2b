use crate::cell::CellValue;
use indexmap::{IndexMap, IndexSet};

/// A sparse row record: header name -> value, in header order.
///
/// Blank cells are left out, so records decoded from one sheet may carry
/// different key sets.
pub type Record = IndexMap<String, CellValue>;

/// Header assigned to an empty header cell
const EMPTY_HEADER: &str = "__EMPTY";

/// A sheet representing a 2D grid of cells (row-major storage)
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Sheet {
            name: "Sheet1".to_string(),
            data: Vec::new(),
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let data = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        Sheet {
            name: "Sheet1".to_string(),
            data,
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Width of the widest row. Decoded rows may be ragged.
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.data.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Get a reference to the underlying data
    #[must_use]
    pub fn data(&self) -> &Vec<Vec<CellValue>> {
        &self.data
    }

    /// Record keys derived from the first row.
    ///
    /// Empty header cells become `__EMPTY`, and a repeated name gets a numeric
    /// suffix (`name_1`, `name_2`, ...) so every key is unique.
    #[must_use]
    pub fn header_names(&self) -> Vec<String> {
        let Some(header) = self.data.first() else {
            return Vec::new();
        };

        let width = self.col_count();
        let mut seen: IndexSet<String> = IndexSet::with_capacity(width);
        for col in 0..width {
            let raw = header.get(col).map(CellValue::as_str).unwrap_or_default();
            let base = if raw.is_empty() {
                EMPTY_HEADER.to_string()
            } else {
                raw
            };
            let name = unique_name(&seen, &base);
            seen.insert(name);
        }
        seen.into_iter().collect()
    }

    /// Convert the grid into records, treating the first row as the header.
    ///
    /// Blank cells are omitted and rows without any value are skipped.
    #[must_use]
    pub fn to_records(&self) -> Vec<Record> {
        let names = self.header_names();
        let mut records = Vec::with_capacity(self.data.len().saturating_sub(1));

        for row in self.data.iter().skip(1) {
            let record: Record = names
                .iter()
                .zip(row)
                .filter(|(_, value)| !value.is_blank())
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect();

            if !record.is_empty() {
                records.push(record);
            }
        }

        records
    }

    /// Build a grid from records, with a header row first.
    ///
    /// `header` fixes the leading columns; keys found in the records but not in
    /// `header` are appended in first-seen order. Missing values are left null.
    #[must_use]
    pub fn from_records(records: &[Record], header: &[String]) -> Self {
        let mut columns: IndexSet<String> = header.iter().cloned().collect();
        for record in records {
            for key in record.keys() {
                if !columns.contains(key) {
                    columns.insert(key.clone());
                }
            }
        }

        let mut data = Vec::with_capacity(records.len() + 1);
        data.push(
            columns
                .iter()
                .map(|name| CellValue::String(name.clone()))
                .collect(),
        );
        for record in records {
            data.push(
                columns
                    .iter()
                    .map(|name| record.get(name).cloned().unwrap_or(CellValue::Null))
                    .collect(),
            );
        }

        Sheet {
            name: "Sheet1".to_string(),
            data,
        }
    }
}

fn unique_name(seen: &IndexSet<String>, base: &str) -> String {
    if !seen.contains(base) {
        return base.to_string();
    }
    let mut suffix = 1;
    loop {
        let candidate = format!("{base}_{suffix}");
        if !seen.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
