//! Search over the base dataset.

use crate::model::{field_text, Dataset, Row};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Field key -> query text. Blank queries are ignored.
pub type Predicate = IndexMap<String, String>;

/// How a query is compared against a cell. Both modes ignore case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Whole-value equality
    #[default]
    Exact,
    /// Substring containment
    Fuzzy,
}

impl MatchMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            MatchMode::Exact => MatchMode::Fuzzy,
            MatchMode::Fuzzy => MatchMode::Exact,
        }
    }

    fn matches(self, value: &str, query: &str) -> bool {
        match self {
            MatchMode::Exact => value == query,
            MatchMode::Fuzzy => value.contains(query),
        }
    }
}

/// Keep the rows of `base` that satisfy every non-blank predicate entry.
///
/// A predicate without any usable entry returns `base` unchanged.
#[must_use]
pub fn apply_filter(base: &Dataset, predicate: &Predicate, mode: MatchMode) -> Dataset {
    let conditions: Vec<(&str, String)> = predicate
        .iter()
        .filter(|(key, _)| !key.trim().is_empty())
        .map(|(key, query)| (key.as_str(), query.trim().to_lowercase()))
        .filter(|(_, query)| !query.is_empty())
        .collect();

    if conditions.is_empty() {
        return base.clone();
    }

    let view: Dataset = base
        .iter()
        .filter(|row| row_matches(row, &conditions, mode))
        .cloned()
        .collect();

    tracing::debug!(
        conditions = conditions.len(),
        ?mode,
        kept = view.len(),
        of = base.len(),
        "filtered dataset"
    );
    view
}

fn row_matches(row: &Row, conditions: &[(&str, String)], mode: MatchMode) -> bool {
    conditions
        .iter()
        .all(|(key, query)| mode.matches(&field_text(row, key).to_lowercase(), query))
}
