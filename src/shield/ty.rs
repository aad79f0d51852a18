//! Schema combinators
//!
//! ```ignore
//! use telefunc::shield::ty;
//!
//! let args = vec![ty::string(), ty::optional(ty::array(ty::number()))];
//! ```

use super::types::{Literal, Primitive, Schema};

pub fn string() -> Schema {
    Schema::Primitive(Primitive::String)
}

pub fn number() -> Schema {
    Schema::Primitive(Primitive::Number)
}

pub fn boolean() -> Schema {
    Schema::Primitive(Primitive::Boolean)
}

pub fn date() -> Schema {
    Schema::Primitive(Primitive::Date)
}

/// Accepts every value, `undefined` included.
pub fn any() -> Schema {
    Schema::Primitive(Primitive::Any)
}

/// Strict equality with a single literal.
pub fn constant(value: impl Into<Literal>) -> Schema {
    Schema::Const(value.into())
}

pub fn undefined() -> Schema {
    Schema::Const(Literal::Undefined)
}

pub fn null() -> Schema {
    Schema::Const(Literal::Null)
}

/// Succeeds when at least one alternative succeeds.
pub fn or(alternatives: impl IntoIterator<Item = Schema>) -> Schema {
    Schema::Or(alternatives.into_iter().collect())
}

/// `or(T, undefined)`
pub fn optional(schema: Schema) -> Schema {
    or([schema, undefined()])
}

/// `or(T, null)`
pub fn nullable(schema: Schema) -> Schema {
    or([schema, null()])
}

pub fn tuple(elements: impl IntoIterator<Item = Schema>) -> Schema {
    Schema::Tuple(elements.into_iter().collect())
}

pub fn array(element: Schema) -> Schema {
    Schema::Array(Box::new(element))
}

/// Plain object with arbitrary keys, every value checked against `value`.
pub fn object(value: Schema) -> Schema {
    Schema::Record(Box::new(value))
}

/// Structural object schema. A repeated key keeps its first position and
/// its last schema.
pub fn fields<K, I>(entries: I) -> Schema
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Schema)>,
{
    let mut out: Vec<(String, Schema)> = Vec::new();
    for (key, schema) in entries {
        let key = key.into();
        match out.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = schema,
            None => out.push((key, schema)),
        }
    }
    Schema::Fields(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_is_union_with_undefined() {
        assert_eq!(optional(string()), Schema::Or(vec![string(), Schema::Const(Literal::Undefined)]));
    }

    #[test]
    fn test_nullable_is_union_with_null() {
        assert_eq!(nullable(number()), Schema::Or(vec![number(), Schema::Const(Literal::Null)]));
    }

    #[test]
    fn test_fields_dedup() {
        let schema = fields([("a", string()), ("b", number()), ("a", boolean())]);
        assert_eq!(
            schema,
            Schema::Fields(vec![("a".to_string(), boolean()), ("b".to_string(), number())])
        );
    }
}
