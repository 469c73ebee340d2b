use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a cell value in a sheet or a field value in a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Arrays and objects carried through persisted records untouched.
    Nested(serde_json::Value),
}

impl CellValue {
    /// Check if the value is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Null or an empty string. Blank cells are omitted from records.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Canonical stringification, shared by filtering, sorting, grouping and
    /// the CSV writer.
    #[must_use]
    pub fn as_str(&self) -> String {
        self.to_string()
    }

    /// Parse a string into a `CellValue` with type inference
    /// Tries: null -> bool -> int -> float -> string
    #[must_use]
    pub fn parse(s: &str) -> CellValue {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return CellValue::Null;
        }

        match trimmed.to_lowercase().as_str() {
            "true" => return CellValue::Bool(true),
            "false" => return CellValue::Bool(false),
            _ => {}
        }

        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Int(i);
        }

        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() {
                return CellValue::Float(f);
            }
        }

        CellValue::String(s.to_string())
    }

    /// Whole floats become `Int`.
    #[must_use]
    pub fn from_number(f: f64) -> CellValue {
        if f.fract() == 0.0 && f.is_finite() && f.abs() < 9_007_199_254_740_992.0 {
            CellValue::Int(f as i64)
        } else {
            CellValue::Float(f)
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, ""),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(fl) => write!(f, "{fl}"),
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Nested(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<usize> for CellValue {
    fn from(i: usize) -> Self {
        CellValue::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::approx_constant)]
    use super::*;

    #[test]
    fn test_parse_null() {
        assert_eq!(CellValue::parse(""), CellValue::Null);
        assert_eq!(CellValue::parse("  "), CellValue::Null);
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(CellValue::parse("TRUE"), CellValue::Bool(true));
        assert_eq!(CellValue::parse("42"), CellValue::Int(42));
        assert_eq!(CellValue::parse("-2.5"), CellValue::Float(-2.5));
        assert_eq!(CellValue::parse("yes"), CellValue::String("yes".to_string()));
        assert_eq!(CellValue::parse("inf"), CellValue::String("inf".to_string()));
    }

    #[test]
    fn test_canonical_string() {
        assert_eq!(CellValue::Null.as_str(), "");
        assert_eq!(CellValue::Float(10.0).as_str(), "10");
        assert_eq!(CellValue::Float(2.5).as_str(), "2.5");
        assert_eq!(CellValue::Float(10.0).to_string(), "10");
        assert_eq!(CellValue::Bool(false).as_str(), "false");
        assert_eq!(
            CellValue::Nested(serde_json::json!({"a": [1, 2]})).as_str(),
            r#"{"a":[1,2]}"#
        );
    }

    #[test]
    fn test_from_number_collapses_whole_floats() {
        assert_eq!(CellValue::from_number(42.0), CellValue::Int(42));
        assert_eq!(CellValue::from_number(0.5), CellValue::Float(0.5));
        assert_eq!(CellValue::from_number(-3.0), CellValue::Int(-3));
    }

    #[test]
    fn test_blank() {
        assert!(CellValue::Null.is_blank());
        assert!(CellValue::String(String::new()).is_blank());
        assert!(!CellValue::Int(0).is_blank());
        assert!(!CellValue::Bool(false).is_blank());
    }

    #[test]
    fn test_untagged_json() {
        let values: Vec<CellValue> =
            serde_json::from_str(r#"[null, true, 10, 2.5, "x", [1], {"k": 1}]"#).unwrap();
        assert_eq!(values[0], CellValue::Null);
        assert_eq!(values[1], CellValue::Bool(true));
        assert_eq!(values[2], CellValue::Int(10));
        assert_eq!(values[3], CellValue::Float(2.5));
        assert_eq!(values[4], CellValue::String("x".to_string()));
        assert!(matches!(values[5], CellValue::Nested(_)));
        assert!(matches!(values[6], CellValue::Nested(_)));
    }
}
