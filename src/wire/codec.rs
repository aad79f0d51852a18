//! Text codec for telefunction values
//!
//! Plain JSON, extended with tagged strings for what JSON cannot express:
//!
//! - `"!undefined"`
//! - `"!Date:<RFC 3339>"`
//! - `"!NaN"`, `"!Infinity"`, `"!-Infinity"`
//!
//! A user string starting with `!` is escaped with one more leading `!`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number};

use super::errors::{WireError, WireResult};
use super::value::Value;

const TAG: char = '!';
const UNDEFINED: &str = "!undefined";
const NAN: &str = "!NaN";
const INFINITY: &str = "!Infinity";
const NEG_INFINITY: &str = "!-Infinity";
const DATE_PREFIX: &str = "!Date:";

/// Serializes a value to its wire text.
pub fn stringify(value: &Value) -> String {
    // serde_json::Value always serializes
    serde_json::to_string(&to_json(value)).unwrap_or_default()
}

/// Parses wire text back into a value.
pub fn parse(text: &str) -> WireResult<Value> {
    let json: serde_json::Value =
        serde_json::from_str(text).map_err(|e| WireError::InvalidJson(e.to_string()))?;
    from_json(json)
}

/// Converts a value into its tagged JSON form.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Undefined => serde_json::Value::String(UNDEFINED.to_string()),
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => {
            if s.starts_with(TAG) {
                serde_json::Value::String(format!("{}{}", TAG, s))
            } else {
                serde_json::Value::String(s.clone())
            }
        }
        Value::Date(d) => serde_json::Value::String(format!(
            "{}{}",
            DATE_PREFIX,
            d.to_rfc3339_opts(SecondsFormat::Millis, true)
        )),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Object(entries) => {
            let mut map = Map::with_capacity(entries.len());
            for (key, val) in entries {
                map.insert(key.clone(), to_json(val));
            }
            serde_json::Value::Object(map)
        }
    }
}

/// Converts tagged JSON back into a value.
pub fn from_json(json: serde_json::Value) -> WireResult<Value> {
    Ok(match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => decode_string(s)?,
        serde_json::Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(from_json)
                .collect::<WireResult<Vec<_>>>()?,
        ),
        serde_json::Value::Object(map) => {
            let mut entries = Vec::with_capacity(map.len());
            for (key, val) in map {
                entries.push((key, from_json(val)?));
            }
            Value::Object(entries)
        }
    })
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.is_nan() {
        return serde_json::Value::String(NAN.to_string());
    }
    if n == f64::INFINITY {
        return serde_json::Value::String(INFINITY.to_string());
    }
    if n == f64::NEG_INFINITY {
        return serde_json::Value::String(NEG_INFINITY.to_string());
    }
    // Integral values go out without a fractional part
    if n == n.trunc() && n.abs() < 9_007_199_254_740_992.0 {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

fn decode_string(s: String) -> WireResult<Value> {
    if !s.starts_with(TAG) {
        return Ok(Value::String(s));
    }
    if let Some(rest) = s.strip_prefix("!!") {
        return Ok(Value::String(format!("{}{}", TAG, rest)));
    }
    match s.as_str() {
        UNDEFINED => Ok(Value::Undefined),
        NAN => Ok(Value::Number(f64::NAN)),
        INFINITY => Ok(Value::Number(f64::INFINITY)),
        NEG_INFINITY => Ok(Value::Number(f64::NEG_INFINITY)),
        _ => match s.strip_prefix(DATE_PREFIX) {
            Some(date) => DateTime::parse_from_rfc3339(date)
                .map(|d| Value::Date(d.with_timezone(&Utc)))
                .map_err(|e| WireError::InvalidDate(format!("{}: {}", date, e))),
            None => Err(WireError::UnknownTag(s)),
        },
    }
}
