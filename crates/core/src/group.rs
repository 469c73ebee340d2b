//! Partition a dataset by the distinct values of one field.

use crate::collation::compare_text;
use crate::error::{HelperError, Result};
use crate::model::{field_text, Dataset, Row};
use indexmap::IndexMap;

/// Groups keyed by canonical field text, listed in collation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Groups {
    field: String,
    groups: IndexMap<String, Dataset>,
}

impl Groups {
    /// The field the rows were grouped by
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Dataset> {
        self.groups.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Dataset)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Row count per group, for presenting the choices.
    #[must_use]
    pub fn counts(&self) -> Vec<(&str, usize)> {
        self.iter().map(|(k, v)| (k, v.len())).collect()
    }

    /// The chosen groups, in the order they were asked for.
    ///
    /// Fails on the first key that has no group.
    pub fn select<'a, S: AsRef<str>>(&'a self, keys: &[S]) -> Result<Vec<(&'a str, &'a Dataset)>> {
        keys.iter()
            .map(|key| {
                let key = key.as_ref();
                self.groups
                    .get_key_value(key)
                    .map(|(k, v)| (k.as_str(), v))
                    .ok_or_else(|| HelperError::UnknownGroup {
                        key: key.to_string(),
                    })
            })
            .collect()
    }
}

/// Partition `base` by the canonical text of `field`.
///
/// Every row lands in exactly one group and keeps its base order there.
#[must_use]
pub fn group_by(base: &Dataset, field: &str) -> Groups {
    let mut buckets: IndexMap<String, Vec<Row>> = IndexMap::new();
    for row in base {
        buckets
            .entry(field_text(row, field))
            .or_default()
            .push(row.clone());
    }

    buckets.sort_by(|a, _, b, _| compare_text(a, b));

    tracing::debug!(field, groups = buckets.len(), "grouped dataset");

    Groups {
        field: field.to_string(),
        groups: buckets
            .into_iter()
            .map(|(key, rows)| (key, Dataset::from_rows(rows)))
            .collect(),
    }
}
