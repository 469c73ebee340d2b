use crate::collation::compare_text;
use crate::model::{field_text, Dataset};
use serde::{Deserialize, Serialize};

/// Sort direction for full-dataset exports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Stable sort of `base` by the canonical text of `field`.
///
/// Rows with equal keys keep their relative order in both directions.
#[must_use]
pub fn apply_sort(base: &Dataset, field: &str, direction: SortDirection) -> Dataset {
    let mut keyed: Vec<(String, usize)> = base
        .iter()
        .enumerate()
        .map(|(index, row)| (field_text(row, field), index))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match direction {
        SortDirection::Asc => compare_text(a, b),
        SortDirection::Desc => compare_text(b, a),
    });

    let rows = base.rows();
    keyed.into_iter().map(|(_, index)| rows[index].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetport_sheet::CellValue;

    fn dataset(values: &[&str]) -> Dataset {
        Dataset::with_sequential_ids(
            values
                .iter()
                .map(|v| [("k".to_string(), CellValue::from(*v))].into_iter().collect())
                .collect(),
        )
    }

    #[test]
    fn test_ascending() {
        let sorted = apply_sort(&dataset(&["b", "10", "a", "9"]), "k", SortDirection::Asc);
        assert_eq!(sorted.ids(), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_descending() {
        let sorted = apply_sort(&dataset(&["b", "10", "a", "9"]), "k", SortDirection::Desc);
        assert_eq!(sorted.ids(), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let data = dataset(&["x", "a", "x", "a"]);
        assert_eq!(apply_sort(&data, "k", SortDirection::Asc).ids(), vec![2, 4, 1, 3]);
        assert_eq!(apply_sort(&data, "k", SortDirection::Desc).ids(), vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_sort_is_a_permutation() {
        let data = dataset(&["c", "b", "a"]);
        let mut ids = apply_sort(&data, "missing", SortDirection::Desc).ids();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
