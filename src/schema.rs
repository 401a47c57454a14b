//! Schema types and structures
//!
//! A [`Schema`] describes one object shape as a map of property names to
//! [`Property`] entries; a [`SchemaSet`] is the universe of named schemas
//! that signature references resolve against. Both are plain data: built
//! once by extraction, immutable afterwards, and shared freely across
//! concurrent validations.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single property of a schema: its type signature plus metadata.
///
/// In the persisted JSON form a property with neither description nor
/// optional flag collapses to its bare signature string; both forms are
/// equivalent on read. That compaction lives entirely at this serde
/// boundary, there is only one `Property` type in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PropertyRepr", into = "PropertyRepr")]
pub struct Property {
    /// Type signature for this property's values
    pub signature: String,
    /// Human-written description, if any
    pub description: Option<String>,
    /// Whether the property may be absent from a value
    pub optional: bool,
}

impl Property {
    /// Create a property with just a signature
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            description: None,
            optional: false,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the property optional
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }
}

/// Serialized shape of a [`Property`]: bare signature or full object
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PropertyRepr {
    Bare(String),
    Full {
        #[serde(rename = "type")]
        signature: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        optional: Option<bool>,
    },
}

impl From<PropertyRepr> for Property {
    fn from(repr: PropertyRepr) -> Self {
        match repr {
            PropertyRepr::Bare(signature) => Property::new(signature),
            PropertyRepr::Full {
                signature,
                description,
                optional,
            } => Property {
                signature,
                description,
                optional: optional.unwrap_or(false),
            },
        }
    }
}

impl From<Property> for PropertyRepr {
    fn from(property: Property) -> Self {
        if property.description.is_none() && !property.optional {
            PropertyRepr::Bare(property.signature)
        } else {
            PropertyRepr::Full {
                signature: property.signature,
                description: property.description,
                optional: property.optional.then_some(true),
            }
        }
    }
}

/// An object shape: unique property names mapped to their properties
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Description derived from commentary preceding the declaration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Properties by name; order is irrelevant, names are unique
    #[serde(default)]
    pub properties: BTreeMap<String, Property>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a property by name
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Whether a property name is declared in this schema
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }
}

/// A schema together with its derived name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedSchema {
    /// Schema name derived from the originating interface name
    pub name: String,
    /// The schema itself
    pub schema: Schema,
}

/// Named collection of schemas, the universe for reference resolution.
///
/// This is the interchange artifact between extraction and validation: its
/// JSON form is a plain map of schema name to schema.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaSet(BTreeMap<String, Schema>);

impl SchemaSet {
    /// Create an empty schema set
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a schema by name
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.0.get(name)
    }

    /// Whether the set contains a schema by name
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Insert a named schema
    pub fn insert(&mut self, named: NamedSchema) {
        self.0.insert(named.name, named.schema);
    }

    /// Number of schemas in the set
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (name, schema) pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.0.iter()
    }

    /// Schema names in the set, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    /// Serialize to the persisted JSON interchange form
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a schema set back from its persisted JSON form
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a persisted schema set from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Write the persisted JSON form to a file
    pub fn save(&self, path: impl AsRef<Path>, pretty: bool) -> Result<()> {
        let content = if pretty {
            self.to_json_string_pretty()?
        } else {
            self.to_json_string()?
        };
        fs::write(path, content)?;
        Ok(())
    }
}

impl FromIterator<NamedSchema> for SchemaSet {
    fn from_iter<I: IntoIterator<Item = NamedSchema>>(iter: I) -> Self {
        let mut set = SchemaSet::new();
        for named in iter {
            set.insert(named);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_compacts_to_bare_signature() {
        let prop = Property::new("string");
        let json = serde_json::to_string(&prop).unwrap();
        assert_eq!(json, r#""string""#);
    }

    #[test]
    fn test_property_with_metadata_serializes_as_object() {
        let prop = Property::new("string")
            .with_description("Display name.")
            .with_optional(true);
        let json = serde_json::to_value(&prop).unwrap();
        assert_eq!(json["type"], "string");
        assert_eq!(json["description"], "Display name.");
        assert_eq!(json["optional"], true);
    }

    #[test]
    fn test_property_reads_both_forms() {
        let bare: Property = serde_json::from_str(r#""number""#).unwrap();
        let full: Property = serde_json::from_str(r#"{"type": "number"}"#).unwrap();
        assert_eq!(bare, full);
        assert_eq!(bare.signature, "number");
        assert!(!bare.optional);
    }

    #[test]
    fn test_schema_set_round_trip() {
        let mut schema = Schema::new();
        schema
            .properties
            .insert("title".to_string(), Property::new("string"));
        schema.properties.insert(
            "pages".to_string(),
            Property::new("number").with_optional(true),
        );

        let mut set = SchemaSet::new();
        set.insert(NamedSchema {
            name: "book".to_string(),
            schema,
        });

        let json = set.to_json_string().unwrap();
        let reloaded = SchemaSet::from_json_str(&json).unwrap();
        assert_eq!(set, reloaded);
        assert!(reloaded.get("book").unwrap().property("pages").unwrap().optional);
    }
}
