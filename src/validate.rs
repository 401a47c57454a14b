//! Signature parsing and validation
//!
//! [`parse`] checks a JSON value against a signature and a schema set,
//! returning the value on success or the first failure it detects. It is a
//! single-pass recursive descent over the signature grammar, tried in
//! precedence order: union, array, primitive, literal, named reference.
//! Containers come back freshly built from their recursively parsed
//! children; everything else is returned unchanged.
//!
//! Failures propagate immediately. The one exception is the union
//! alternative loop, which swallows each alternative's failure to implement
//! first-match-wins and reports a plain wrong-type error only when every
//! alternative has been exhausted.

use serde_json::{Map, Value};

use crate::error::{PropertyContext, Result, SchemaError};
use crate::names;
use crate::schema::{Schema, SchemaSet};
use crate::signature;
use crate::ty::Primitive;

/// Validate a value against a signature, resolving named references in
/// `schemas`. Returns the parsed value; on success, parsing again is a
/// no-op.
pub fn parse(value: &Value, signature: &str, schemas: &SchemaSet) -> Result<Value> {
    let signature = signature.trim();

    let alternatives = signature::split_union(signature);
    if alternatives.len() > 1 {
        for alternative in &alternatives {
            // First match wins; an alternative's failure is not diagnostic
            if let Ok(parsed) = parse(value, alternative, schemas) {
                return Ok(parsed);
            }
        }
        return Err(wrong_type(signature, value));
    }
    let signature = alternatives[0];

    if let Some(element) = signature::array_element(signature) {
        return parse_array(value, signature, element, schemas);
    }
    if let Some(primitive) = Primitive::from_token(signature) {
        return parse_primitive(value, signature, primitive);
    }
    if let Some(literal) = signature::string_literal(signature) {
        return parse_string_literal(value, signature, literal);
    }
    if let Some(literal) = signature::number_literal(signature) {
        return parse_number_literal(value, signature, literal);
    }
    if signature::is_reference(signature) {
        return parse_reference(value, signature, schemas);
    }

    // No grammar rule matched: the signature itself is malformed
    Err(SchemaError::UnexpectedError {
        message: format!("no grammar rule matched signature '{}'", signature),
    })
}

fn parse_array(
    value: &Value,
    signature: &str,
    element_signature: &str,
    schemas: &SchemaSet,
) -> Result<Value> {
    let elements = value
        .as_array()
        .ok_or_else(|| wrong_type(signature, value))?;
    // Fail fast: the first failing element's error surfaces unchanged
    let parsed = elements
        .iter()
        .map(|element| parse(element, element_signature, schemas))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::Array(parsed))
}

fn parse_primitive(value: &Value, signature: &str, primitive: Primitive) -> Result<Value> {
    let matches = match primitive {
        Primitive::String => value.is_string(),
        Primitive::Number => value.is_number(),
        Primitive::Boolean => value.is_boolean(),
        Primitive::Null | Primitive::Undefined => value.is_null(),
        Primitive::True => value.as_bool() == Some(true),
        Primitive::False => value.as_bool() == Some(false),
    };
    if matches {
        Ok(value.clone())
    } else {
        Err(wrong_type(signature, value))
    }
}

fn parse_string_literal(value: &Value, signature: &str, literal: &str) -> Result<Value> {
    match value.as_str() {
        Some(s) if s == literal => Ok(value.clone()),
        _ => Err(wrong_type(signature, value)),
    }
}

fn parse_number_literal(value: &Value, signature: &str, literal: u64) -> Result<Value> {
    match value.as_u64() {
        Some(n) if n == literal => Ok(value.clone()),
        _ => Err(wrong_type(signature, value)),
    }
}

fn parse_reference(value: &Value, signature: &str, schemas: &SchemaSet) -> Result<Value> {
    let object = value
        .as_object()
        .ok_or_else(|| wrong_type(signature, value))?;

    let schema_name = names::to_camel_case(signature);
    let schema = schemas
        .get(&schema_name)
        .ok_or_else(|| SchemaError::SchemaNotFound {
            name: schema_name.clone(),
        })?;

    parse_object(object, schema, &schema_name, schemas)
}

/// Validate an object value against a resolved schema.
///
/// Closed world: every key in the value must be declared. Completeness:
/// every non-optional declared property must be present. The result holds
/// only the successfully parsed declared properties; omitted optional
/// properties are simply absent.
fn parse_object(
    object: &Map<String, Value>,
    schema: &Schema,
    schema_name: &str,
    schemas: &SchemaSet,
) -> Result<Value> {
    for key in object.keys() {
        if !schema.has_property(key) {
            return Err(SchemaError::PropertyNotExistsInSchema {
                schema: schema_name.to_string(),
                property: key.clone(),
            });
        }
    }

    let mut parsed = Map::with_capacity(object.len());
    for (name, property) in &schema.properties {
        match object.get(name) {
            Some(value) => {
                parsed.insert(name.clone(), parse(value, &property.signature, schemas)?);
            }
            None if property.optional => {}
            None => {
                return Err(SchemaError::PropertyValueNotFound {
                    schema: schema_name.to_string(),
                    property: PropertyContext {
                        name: name.clone(),
                        signature: property.signature.clone(),
                        description: property.description.clone(),
                        optional: property.optional,
                    },
                });
            }
        }
    }

    Ok(Value::Object(parsed))
}

fn wrong_type(expected: &str, value: &Value) -> SchemaError {
    SchemaError::WrongType {
        expected: expected.to_string(),
        actual: describe(value),
    }
}

/// Render the offending value for an error message: primitives show their
/// value, containers only their kind.
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}
