//! Error types shared by extraction and validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// The property a validation error is about: name, signature, and the
/// metadata the schema declared for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyContext {
    /// Property name within the schema
    pub name: String,
    /// The property's type signature
    pub signature: String,
    /// Declared description, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the property is optional
    #[serde(default)]
    pub optional: bool,
}

/// Errors raised by schema extraction and signature validation
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("source file not found: {location}")]
    FileNotFound { location: String },

    #[error("no declarations found in source file: {location}")]
    SyntaxListNotFound { location: String },

    #[error("interface not found: {name} in {location}")]
    InterfaceNotFound { name: String, location: String },

    #[error("interface name could not be determined in {location}")]
    InterfaceNameCouldNotBeDetermined { location: String },

    #[error("no resolvable type for '{type_text}'")]
    TypeNotFound { type_text: String },

    #[error("schema not found: {name}")]
    SchemaNotFound { name: String },

    #[error("required property '{}' missing from value for schema '{schema}'", .property.name)]
    PropertyValueNotFound {
        schema: String,
        property: PropertyContext,
    },

    #[error("property '{property}' does not exist in schema '{schema}'")]
    PropertyNotExistsInSchema { schema: String, property: String },

    #[error("wrong type: expected {expected}, got {actual}")]
    WrongType { expected: String, actual: String },

    #[error("unexpected error: {message}")]
    UnexpectedError { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchemaError {
    /// The schema a failure is attributable to, when there is one.
    pub fn schema_context(&self) -> Option<&str> {
        match self {
            SchemaError::SchemaNotFound { name } => Some(name),
            SchemaError::PropertyValueNotFound { schema, .. } => Some(schema),
            SchemaError::PropertyNotExistsInSchema { schema, .. } => Some(schema),
            _ => None,
        }
    }

    /// The declared property a failure is attributable to, when there is one.
    pub fn property_context(&self) -> Option<&PropertyContext> {
        match self {
            SchemaError::PropertyValueNotFound { property, .. } => Some(property),
            _ => None,
        }
    }
}
