//! Fields, rows and datasets.

use crate::error::{HelperError, Result};
use serde::{Deserialize, Serialize};
use sheetport_sheet::{CellValue, Record};

/// Key of the synthetic row number assigned on import.
pub const ID_FIELD: &str = "id";

/// A row: field key -> value, in insertion order.
pub type Row = Record;

/// A column definition.
///
/// `key` is what rows are indexed by; `title` is the label shown to the user.
/// The two only differ after a custom-key import, where `title` keeps the
/// source header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub title: String,
    #[serde(rename = "dataIndex")]
    pub key: String,
}

impl Field {
    /// A field whose label is its key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Field {
            title: key.clone(),
            key,
        }
    }

    /// A field imported from `title` and stored under `key`.
    #[must_use]
    pub fn renamed(title: impl Into<String>, key: impl Into<String>) -> Self {
        Field {
            title: title.into(),
            key: key.into(),
        }
    }
}

/// Look up a field by key.
pub fn find_field<'a>(fields: &'a [Field], key: &str) -> Result<&'a Field> {
    fields
        .iter()
        .find(|f| f.key == key)
        .ok_or_else(|| HelperError::FieldNotFound {
            name: key.to_string(),
        })
}

/// Canonical text of a row's value for `key`; a missing field reads as `""`.
#[must_use]
pub fn field_text(row: &Row, key: &str) -> String {
    row.get(key).map(CellValue::as_str).unwrap_or_default()
}

/// An ordered sequence of rows sharing one field set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    /// Create an empty dataset
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap rows as they are.
    #[must_use]
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Dataset { rows }
    }

    /// Wrap rows, appending a dense `id` of 1..=N to each.
    ///
    /// An existing `id` value is replaced and moved to the end.
    #[must_use]
    pub fn with_sequential_ids(rows: Vec<Row>) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, mut row)| {
                row.shift_remove(ID_FIELD);
                row.insert(ID_FIELD.to_string(), CellValue::from(index + 1));
                row
            })
            .collect();
        Dataset { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Synthetic ids in row order; rows without one are skipped.
    #[must_use]
    pub fn ids(&self) -> Vec<i64> {
        self.rows
            .iter()
            .filter_map(|row| match row.get(ID_FIELD) {
                Some(CellValue::Int(id)) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Copies of the rows with the synthetic `id` removed, ready for export.
    #[must_use]
    pub fn export_rows(&self) -> Vec<Row> {
        self.rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.shift_remove(ID_FIELD);
                row
            })
            .collect()
    }
}

impl FromIterator<Row> for Dataset {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Dataset {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
