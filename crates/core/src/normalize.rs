//! Key normalization: derive the field list for freshly imported rows.

use crate::error::{HelperError, Result};
use crate::model::{Dataset, Field, Row, ID_FIELD};
use indexmap::{IndexMap, IndexSet};
use sheetport_sheet::CellValue;

/// How field keys are chosen for an import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum KeyMode {
    /// Keep the source headers as keys.
    #[default]
    Default,
    /// Rename every source header: old key -> new key.
    Custom(IndexMap<String, String>),
}

/// Fields plus rows with ids assigned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub fields: Vec<Field>,
    pub dataset: Dataset,
}

/// The row with the most keys; the first one wins a tie.
#[must_use]
pub fn reference_row(rows: &[Row]) -> Option<&Row> {
    rows.iter().fold(None, |widest: Option<&Row>, row| match widest {
        Some(w) if w.len() >= row.len() => Some(w),
        _ => Some(row),
    })
}

/// Keys of the reference row, minus the reserved `id`.
///
/// These are the source keys a custom mapping has to cover.
#[must_use]
pub fn source_keys(rows: &[Row]) -> Vec<String> {
    reference_row(rows)
        .map(|row| {
            row.keys()
                .filter(|k| k.as_str() != ID_FIELD)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Build the field list and the id-numbered dataset for `raw`.
///
/// Custom mappings are validated in full before any row is touched.
pub fn normalize(raw: Vec<Row>, mode: &KeyMode) -> Result<Normalized> {
    if raw.is_empty() {
        return Ok(Normalized::default());
    }

    let keys = source_keys(&raw);
    if reference_row(&raw).is_some_and(|row| row.contains_key(ID_FIELD)) {
        tracing::warn!("source column '{ID_FIELD}' is reserved and will be replaced by row numbers");
    }

    let normalized = match mode {
        KeyMode::Default => Normalized {
            fields: keys.into_iter().map(Field::new).collect(),
            dataset: Dataset::with_sequential_ids(raw),
        },
        KeyMode::Custom(renames) => {
            let targets = rename_targets(&keys, renames)?;
            let rows = rename_rows(raw, &targets);
            Normalized {
                fields: targets
                    .iter()
                    .map(|(old, new)| Field::renamed(old.clone(), new.clone()))
                    .collect(),
                dataset: Dataset::with_sequential_ids(rows),
            }
        }
    };

    tracing::debug!(
        fields = normalized.fields.len(),
        rows = normalized.dataset.len(),
        "normalized import"
    );
    Ok(normalized)
}

/// Resolve `old -> new` for every source key, rejecting gaps and collisions.
fn rename_targets(
    keys: &[String],
    renames: &IndexMap<String, String>,
) -> Result<IndexMap<String, String>> {
    let mut targets = IndexMap::with_capacity(keys.len());
    let mut taken: IndexSet<String> = IndexSet::with_capacity(keys.len());

    for key in keys {
        let new_key = renames
            .get(key)
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| HelperError::MissingRename { key: key.clone() })?;

        if new_key == ID_FIELD || !taken.insert(new_key.to_string()) {
            return Err(HelperError::DuplicateField {
                key: new_key.to_string(),
            });
        }
        targets.insert(key.clone(), new_key.to_string());
    }

    Ok(targets)
}

fn rename_rows(raw: Vec<Row>, targets: &IndexMap<String, String>) -> Vec<Row> {
    let mut dropped = 0usize;

    let rows: Vec<Row> = raw
        .into_iter()
        .map(|row| {
            dropped += row
                .keys()
                .filter(|k| k.as_str() != ID_FIELD && !targets.contains_key(*k))
                .count();

            targets
                .iter()
                .map(|(old, new)| {
                    let value = row
                        .get(old)
                        .filter(|v| !v.is_null())
                        .cloned()
                        .unwrap_or_else(|| CellValue::String(String::new()));
                    (new.clone(), value)
                })
                .collect::<Row>()
        })
        .collect();

    if dropped > 0 {
        tracing::warn!(dropped, "values under keys missing from the reference row were dropped");
    }
    rows
}
