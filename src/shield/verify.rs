//! Validator engine
//!
//! Walks a schema tree against an argument value and stops at the first
//! failure. Traversal order is fixed:
//! - tuple, array: ascending index
//! - fields: schema keys, then argument keys not already seen
//! - record: argument keys in insertion order
//!
//! Every breadcrumb starts at `[root]`.

use crate::wire::Value;

use super::types::{Literal, Schema};

/// Breadcrumb of the top-level argument list.
pub const ROOT: &str = "[root]";

/// Outcome of checking one value against one schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid {
        /// Path to the first offending element
        breadcrumb: String,
        /// Full diagnostic, breadcrumb included
        message: String,
    },
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Verdict::Valid => None,
            Verdict::Invalid { message, .. } => Some(message),
        }
    }

    pub fn breadcrumb(&self) -> Option<&str> {
        match self {
            Verdict::Valid => None,
            Verdict::Invalid { breadcrumb, .. } => Some(breadcrumb),
        }
    }

    fn mismatch(breadcrumb: &str, is: &str, should: &str) -> Self {
        Verdict::Invalid {
            breadcrumb: breadcrumb.to_string(),
            message: format!("{} is `{}` but should be `{}`.", breadcrumb, is, should),
        }
    }

    fn wrong_type(breadcrumb: &str) -> Self {
        Verdict::Invalid {
            breadcrumb: breadcrumb.to_string(),
            message: format!("{} is of wrong type", breadcrumb),
        }
    }
}

impl Schema {
    /// Checks `value` against this node.
    pub fn check(&self, value: &Value, breadcrumb: &str) -> Verdict {
        verify(Some(self), value, breadcrumb)
    }
}

/// Verifies `value` against `node`. An absent node stands for a schema slot
/// that was never specified and only accepts `undefined`.
pub fn verify(node: Option<&Schema>, value: &Value, breadcrumb: &str) -> Verdict {
    debug_assert!(breadcrumb.starts_with(ROOT), "breadcrumb not rooted: {}", breadcrumb);

    let node = match node {
        Some(node) => node,
        None => return check_const(&Literal::Undefined, value, breadcrumb),
    };

    match node {
        Schema::Primitive(primitive) => {
            if primitive.accepts(value) {
                Verdict::Valid
            } else {
                Verdict::mismatch(breadcrumb, value.type_name(), primitive.type_name())
            }
        }
        Schema::Const(literal) => check_const(literal, value, breadcrumb),
        Schema::Or(alternatives) => {
            if alternatives
                .iter()
                .any(|alt| verify(Some(alt), value, breadcrumb).is_valid())
            {
                Verdict::Valid
            } else {
                Verdict::wrong_type(breadcrumb)
            }
        }
        Schema::Tuple(elements) => check_tuple(elements, value, breadcrumb),
        Schema::Array(element) => check_array(element, value, breadcrumb),
        Schema::Record(schema) => check_record(schema, value, breadcrumb),
        Schema::Fields(fields) => check_fields(node, fields, value, breadcrumb),
    }
}

fn check_const(literal: &Literal, value: &Value, breadcrumb: &str) -> Verdict {
    let expected = literal.to_value();
    if value.strict_eq(&expected) {
        Verdict::Valid
    } else {
        Verdict::mismatch(breadcrumb, &value.to_string(), &expected.to_string())
    }
}

fn check_tuple(elements: &[Schema], value: &Value, breadcrumb: &str) -> Verdict {
    let items = match value {
        Value::Array(items) => items,
        _ => return Verdict::mismatch(breadcrumb, value.type_name(), "tuple"),
    };

    let len = elements.len().max(items.len());
    for i in 0..len {
        // Surplus slots are `const(undefined)`, missing values are `undefined`
        let schema = elements.get(i);
        let item = items.get(i).unwrap_or(&Value::Undefined);
        let crumb = format!("{} > [tuple: element {}]", breadcrumb, i);

        let verdict = verify(schema, item, &crumb);
        if !verdict.is_valid() {
            return verdict;
        }
    }

    Verdict::Valid
}

fn check_array(element: &Schema, value: &Value, breadcrumb: &str) -> Verdict {
    let items = match value {
        Value::Array(items) => items,
        _ => return Verdict::mismatch(breadcrumb, value.type_name(), "array"),
    };

    for (i, item) in items.iter().enumerate() {
        let crumb = format!("{} > [array element {}]", breadcrumb, i);
        let verdict = verify(Some(element), item, &crumb);
        if !verdict.is_valid() {
            return verdict;
        }
    }

    Verdict::Valid
}

fn check_record(schema: &Schema, value: &Value, breadcrumb: &str) -> Verdict {
    let entries = match value {
        Value::Object(entries) => entries,
        _ => return Verdict::mismatch(breadcrumb, value.type_name(), "object"),
    };

    for (key, item) in entries {
        let verdict = verify(Some(schema), item, &key_crumb(breadcrumb, key));
        if !verdict.is_valid() {
            return verdict;
        }
    }

    Verdict::Valid
}

fn check_fields(
    node: &Schema,
    fields: &[(String, Schema)],
    value: &Value,
    breadcrumb: &str,
) -> Verdict {
    let entries = match value {
        Value::Object(entries) => entries,
        _ => return Verdict::mismatch(breadcrumb, value.type_name(), "object"),
    };

    let mut keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
    for (key, _) in entries {
        if !keys.contains(&key.as_str()) {
            keys.push(key);
        }
    }

    for key in keys {
        let item = value.get(key).unwrap_or(&Value::Undefined);
        let verdict = verify(node.field(key), item, &key_crumb(breadcrumb, key));
        if !verdict.is_valid() {
            return verdict;
        }
    }

    Verdict::Valid
}

fn key_crumb(breadcrumb: &str, key: &str) -> String {
    format!("{} > [object: value of key `{}`]", breadcrumb, key)
}
