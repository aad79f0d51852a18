//! Argument and return value model
//!
//! JSON alone cannot carry everything a telefunction may receive: `undefined`
//! is distinct from `null`, and dates are their own tag. Objects keep their
//! insertion order because the shield walks keys in first-seen order.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// A value passed to or returned from a telefunction.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<Value>),
    /// Plain key-valued mapping, insertion ordered
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Builds an object from key/value pairs, keeping the last value of a
    /// repeated key at the position of its first appearance.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut out: Vec<(String, Value)> = Vec::new();
        for (key, value) in entries {
            let key = key.into();
            match out.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => out.push((key, value)),
            }
        }
        Value::Object(out)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Looks up a key on an object value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Type name used in shield diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Strict equality: `NaN` is never equal to itself and containers are
    /// never equal to anything (they are compared by identity upstream).
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

/// Renders a number the way a browser would print it.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n == f64::INFINITY {
        "Infinity".to_string()
    } else if n == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else if n != 0.0 && (n.abs() < 1e-6 || n.abs() >= 1e21) {
        // `1e-7`, `1.5e+21`: shortest digits, signed exponent
        let scientific = format!("{:e}", n);
        match scientific.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => scientific,
        }
    } else if n == n.trunc() {
        format!("{}", n as i128)
    } else {
        format!("{}", n)
    }
}

/// Rendering used in diagnostics: mirrors `String(value)`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    // Holes and nullish elements print as empty
                    if !matches!(item, Value::Undefined | Value::Null) {
                        write!(f, "{}", item)?;
                    }
                }
                Ok(())
            }
            Value::Object(_) => write!(f, "[object Object]"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
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

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Undefined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_keeps_first_position() {
        let obj = Value::object([("a", Value::from(1)), ("b", Value::from(2)), ("a", Value::from(3))]);
        match obj {
            Value::Object(entries) => {
                assert_eq!(entries.len(), 2);
                assert_eq!(entries[0].0, "a");
                assert_eq!(entries[0].1, Value::from(3));
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Undefined.type_name(), "undefined");
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from(vec![1]).type_name(), "array");
        assert_eq!(Value::Date(Utc::now()).type_name(), "date");
    }

    #[test]
    fn test_strict_eq() {
        assert!(Value::Undefined.strict_eq(&Value::Undefined));
        assert!(!Value::Undefined.strict_eq(&Value::Null));
        assert!(!Value::Number(f64::NAN).strict_eq(&Value::Number(f64::NAN)));
        assert!(!Value::from(vec![1]).strict_eq(&Value::from(vec![1])));
    }

    #[test]
    fn test_display_like_js_string() {
        assert_eq!(Value::from(42).to_string(), "42");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(vec![Value::from(1), Value::Null, Value::from("x")]).to_string(), "1,,x");
        assert_eq!(Value::object([("a", Value::Null)]).to_string(), "[object Object]");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn test_display_number_exponent_forms() {
        assert_eq!(Value::from(1e-7).to_string(), "1e-7");
        assert_eq!(Value::from(-2.5e-8).to_string(), "-2.5e-8");
        assert_eq!(Value::from(0.000001).to_string(), "0.000001");
        assert_eq!(Value::from(1e21).to_string(), "1e+21");
        assert_eq!(Value::from(1.5e300).to_string(), "1.5e+300");
        assert_eq!(Value::from(1e20).to_string(), "100000000000000000000");
        assert_eq!(Value::from(-0.0).to_string(), "0");
    }

    #[test]
    fn test_display_date_as_iso_string() {
        let date = DateTime::parse_from_rfc3339("2024-01-02T03:04:05.678Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(Value::from(date).to_string(), "2024-01-02T03:04:05.678Z");
    }
}
