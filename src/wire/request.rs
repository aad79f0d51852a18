//! Call request framing
//!
//! Body: `{ "file": string, "name": string, "args": [...] }`

use super::codec;
use super::errors::{WireError, WireResult};
use super::value::Value;

/// A request to run one telefunction
#[derive(Debug, Clone, PartialEq)]
pub struct CallRequest {
    /// Identifier of the file exposing the telefunction
    pub file: String,
    /// Exported name of the telefunction
    pub name: String,
    /// Positional arguments
    pub args: Vec<Value>,
}

impl CallRequest {
    pub fn new(file: impl Into<String>, name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            file: file.into(),
            name: name.into(),
            args,
        }
    }

    /// Encodes the request body.
    pub fn to_body(&self) -> String {
        codec::stringify(&Value::Object(vec![
            ("file".to_string(), Value::String(self.file.clone())),
            ("name".to_string(), Value::String(self.name.clone())),
            ("args".to_string(), Value::Array(self.args.clone())),
        ]))
    }

    /// Decodes a request body, checking the three mandatory fields.
    pub fn from_body(body: &str) -> WireResult<Self> {
        let value = codec::parse(body)?;

        if !matches!(value, Value::Object(_)) {
            return Err(WireError::MalformedRequest(format!(
                "body is `{}` but should be `object`",
                value.type_name()
            )));
        }

        let file = match value.get("file") {
            Some(Value::String(s)) => s.clone(),
            _ => return Err(WireError::MalformedRequest("`file` should be a string".into())),
        };
        let name = match value.get("name") {
            Some(Value::String(s)) => s.clone(),
            _ => return Err(WireError::MalformedRequest("`name` should be a string".into())),
        };
        let args = match value.get("args") {
            Some(Value::Array(items)) => items.clone(),
            _ => return Err(WireError::MalformedRequest("`args` should be an array".into())),
        };

        Ok(Self { file, name, args })
    }
}
