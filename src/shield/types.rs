//! Schema type definitions
//!
//! Supported nodes:
//! - primitives: string, number, boolean, date, any
//! - const: a single literal, `undefined` and `null` included
//! - or: union of alternatives
//! - tuple: fixed positional elements, the top-level shield target
//! - array: homogeneous sequence
//! - record: arbitrary keys, homogeneous values
//! - fields: structural object schema, one schema per key

use std::fmt;

use crate::wire::Value;

/// Leaf types checked by runtime tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Date,
    Any,
}

impl Primitive {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Date => "date",
            Primitive::Any => "any",
        }
    }

    /// Whether `value` carries this primitive's runtime tag.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Primitive::String => matches!(value, Value::String(_)),
            Primitive::Number => matches!(value, Value::Number(_)),
            Primitive::Boolean => matches!(value, Value::Bool(_)),
            Primitive::Date => matches!(value, Value::Date(_)),
            Primitive::Any => true,
        }
    }
}

/// Values a `const` node may hold
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Literal {
    pub fn to_value(&self) -> Value {
        match self {
            Literal::Undefined => Value::Undefined,
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(*n),
            Literal::String(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Literal::Number(n as f64)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Number(n as f64)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::String(s)
    }
}

/// A schema node. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Primitive(Primitive),
    Const(Literal),
    Or(Vec<Schema>),
    Tuple(Vec<Schema>),
    Array(Box<Schema>),
    /// Map-of: every value of a plain object checked against one schema
    Record(Box<Schema>),
    /// Structural object schema, key order preserved
    Fields(Vec<(String, Schema)>),
}

impl Schema {
    /// Returns the node kind for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Schema::Primitive(p) => p.type_name(),
            Schema::Const(_) => "const",
            Schema::Or(_) => "or",
            Schema::Tuple(_) => "tuple",
            Schema::Array(_) => "array",
            Schema::Record(_) => "record",
            Schema::Fields(_) => "object",
        }
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Schema::Tuple(_))
    }

    /// Schema registered for `key` on a structural object schema.
    pub fn field(&self, key: &str) -> Option<&Schema> {
        match self {
            Schema::Fields(fields) => fields.iter().find(|(k, _)| k == key).map(|(_, s)| s),
            _ => None,
        }
    }
}

/// Wraps in parentheses when the rendering contains a comma.
fn grouped(schema: &Schema) -> String {
    let s = schema.to_string();
    if s.contains(',') {
        format!("({})", s)
    } else {
        s
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schema::Primitive(p) => write!(f, "{}", p.type_name()),
            Schema::Const(lit) => write!(f, "{}", lit),
            Schema::Or(alternatives) => {
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{}", alt)?;
                }
                Ok(())
            }
            Schema::Tuple(elements) => {
                write!(f, "[")?;
                for (i, el) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", el)?;
                }
                write!(f, "]")
            }
            Schema::Array(element) => write!(f, "{}[]", grouped(element)),
            Schema::Record(value) => write!(f, "Record<string, {}>", grouped(value)),
            Schema::Fields(fields) => {
                write!(f, "{{")?;
                for (i, (key, schema)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}:{}", key, schema)?;
                }
                write!(f, "}}")
            }
        }
    }
}

/// The shape attached to a telefunction's positional arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Shield {
    /// Ordered argument schemas, checked as a tuple
    Args(Vec<Schema>),
    /// A single node; only a tuple is a valid top-level target
    Node(Schema),
}

impl Shield {
    /// The schema the argument list is verified against, if well formed.
    pub fn target(&self) -> Option<Schema> {
        match self {
            Shield::Args(elements) => Some(Schema::Tuple(elements.clone())),
            Shield::Node(node) if node.is_tuple() => Some(node.clone()),
            Shield::Node(_) => None,
        }
    }
}

impl From<Vec<Schema>> for Shield {
    fn from(elements: Vec<Schema>) -> Self {
        Shield::Args(elements)
    }
}

impl From<Schema> for Shield {
    fn from(node: Schema) -> Self {
        Shield::Node(node)
    }
}

impl fmt::Display for Shield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Same rendering as the tuple it becomes
            Shield::Args(elements) => write!(f, "{}", Schema::Tuple(elements.clone())),
            Shield::Node(node) => write!(f, "{}", node),
        }
    }
}
