use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// A dynamically typed cell value.
///
/// Rows loaded from JSON or built by hand carry whatever runtime type the
/// caller put in; the table only needs to stringify and compare them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged, from = "serde_json::Value")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Value {
    /// Rank used when comparing values of different kinds.
    fn kind_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Number(_) => 2,
            Value::Text(_) => 3,
        }
    }

    /// Total three-way comparison used for sorting.
    ///
    /// Same-kind values use their natural order. Mixed kinds order by
    /// `Null < Bool < Number < Text`.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            // Signed zeros compare equal; NaN falls back to the total order
            (Value::Number(a), Value::Number(b)) => {
                a.partial_cmp(b).unwrap_or_else(|| a.total_cmp(b))
            }
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::Text(s),
            // Nested structures are opaque to the table; keep their JSON text
            other => Value::Text(other.to_string()),
        }
    }
}

/// Format a number the way a browser stringifies it: integral values
/// without a fractional part, everything else with the shortest
/// round-tripping representation.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

static NULL: Value = Value::Null;

/// One record of a dataset: an open-ended mapping from field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    fields: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Field value, with absent fields reading as `Value::Null`.
    pub fn value(&self, key: &str) -> &Value {
        self.fields.get(key).unwrap_or(&NULL)
    }

    /// Stringified field value
    pub fn text(&self, key: &str) -> String {
        self.value(key).to_string()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parse a JSON array of objects into rows.
pub fn rows_from_json_str(json: &str) -> Result<Vec<Row>> {
    Ok(serde_json::from_str(json)?)
}

/// Load a dataset from a JSON file containing an array of objects.
pub fn load_rows_from_json(path: &Path) -> Result<Vec<Row>> {
    let content = std::fs::read_to_string(path)?;
    rows_from_json_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(12i64).to_string(), "12");
        assert_eq!(Value::from(2450.5).to_string(), "2450.5");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from("Active").to_string(), "Active");
    }

    #[test]
    fn test_value_compare_mixed_kinds() {
        assert_eq!(Value::from(2.0).compare(&Value::from(10.0)), Ordering::Less);
        assert_eq!(Value::from("b").compare(&Value::from("a")), Ordering::Greater);
        assert_eq!(Value::Null.compare(&Value::from(1.0)), Ordering::Less);
        assert_eq!(Value::from(99.0).compare(&Value::from("1")), Ordering::Less);
    }

    #[test]
    fn test_value_compare_signed_zero_equal() {
        assert_eq!(Value::from(-0.0).compare(&Value::from(0.0)), Ordering::Equal);
        assert_eq!(Value::from(f64::NAN).compare(&Value::from(1.0)), Ordering::Greater);
    }

    #[test]
    fn test_rows_from_json() {
        let rows = rows_from_json_str(
            r#"[{"name": "John", "orders": 12, "active": true, "tags": ["a"]}, {"name": null}]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value("orders"), &Value::Number(12.0));
        assert_eq!(rows[0].text("tags"), r#"["a"]"#);
        assert!(rows[1].value("name").is_null());
        assert!(rows[1].value("missing").is_null());
    }

    #[test]
    fn test_row_serializes_as_flat_object() {
        let row = Row::new().with("orders", 12i64);
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"orders":12.0}"#);
        let row = Row::new().with("note", Value::Null);
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"note":null}"#);
    }

    #[test]
    fn test_rows_from_json_rejects_non_array() {
        assert!(rows_from_json_str(r#"{"name": "John"}"#).is_err());
    }
}
