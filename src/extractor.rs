//! Schema extraction
//!
//! Walks a declared interface's members and emits a [`NamedSchema`]:
//! property names, optionality, adjacent commentary as descriptions, and
//! each member's resolved type rendered as a signature. The batch path
//! builds one shared [`SourceSet`] so cross-references between schemas
//! resolve against the same type universe.

use std::path::Path;

use tracing::{debug, trace};

use crate::error::Result;
use crate::introspect::SourceSet;
use crate::names;
use crate::schema::{NamedSchema, Property, Schema, SchemaSet};
use crate::signature::serialize_type;

/// Extract one named interface from a loaded session.
///
/// Fails with `FileNotFound` when the location is not in the session,
/// `SyntaxListNotFound` / `InterfaceNotFound` /
/// `InterfaceNameCouldNotBeDetermined` per the introspection contract, and
/// `TypeNotFound` when a member's type cannot be rendered as a signature.
pub fn extract_one(
    sources: &SourceSet,
    location: &str,
    interface_name: &str,
) -> Result<NamedSchema> {
    debug!(location, interface = interface_name, "extracting schema");
    let info = sources.structure(location, interface_name)?;

    let mut schema = Schema {
        description: info.comment,
        properties: Default::default(),
    };

    for member in &info.members {
        let signature = serialize_type(&member.ty, member.optional)?;
        trace!(
            property = %member.name,
            %signature,
            optional = member.optional,
            "extracted property"
        );
        let property = Property {
            signature,
            description: member.comment.clone(),
            optional: member.optional,
        };
        // Map semantics: a re-declared member name keeps the last declaration
        schema.properties.insert(member.name.clone(), property);
    }

    Ok(NamedSchema {
        name: names::schema_name(&info.name),
        schema,
    })
}

/// Extract a batch of schemas by logical name from a declaration root.
///
/// Each logical name is mapped to its source location and interface name by
/// the fixed conventions, one session is built across all locations, and
/// each schema lands in the set keyed by its derived name. The order of
/// `logical_names` does not affect the resulting set's content.
pub fn extract_many<S: AsRef<str>>(
    root: impl AsRef<Path>,
    logical_names: &[S],
) -> Result<SchemaSet> {
    let locations: Vec<String> = logical_names
        .iter()
        .map(|name| names::source_location(name.as_ref()))
        .collect();
    let sources = SourceSet::load(root, &locations);

    let mut set = SchemaSet::new();
    for (logical, location) in logical_names.iter().zip(&locations) {
        let interface = names::interface_name(logical.as_ref());
        set.insert(extract_one(&sources, location, &interface)?);
    }
    debug!(schemas = set.len(), "extracted schema set");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use std::fs;

    fn write_source(dir: &Path, location: &str, content: &str) {
        fs::write(dir.join(format!("{}.ts", location)), content).unwrap();
    }

    #[test]
    fn test_extract_one_properties() {
        let dir = tempfile::tempdir().unwrap();
        write_source(
            dir.path(),
            "book.dto",
            r#"
/** A catalogued book. */
export interface IBookDTO {
  /** Title as printed. */
  title: string;
  author: string;
  binding?: 'hardcover' | 'spiral';
}
"#,
        );

        let sources = SourceSet::load(dir.path(), &["book.dto"]);
        let named = extract_one(&sources, "book.dto", "IBookDTO").unwrap();

        assert_eq!(named.name, "book");
        assert_eq!(named.schema.description.as_deref(), Some("A catalogued book."));

        let title = named.schema.property("title").unwrap();
        assert_eq!(title.signature, "string");
        assert_eq!(title.description.as_deref(), Some("Title as printed."));
        assert!(!title.optional);

        // Optionality is carried by the flag, not duplicated in the signature
        let binding = named.schema.property("binding").unwrap();
        assert_eq!(binding.signature, "'hardcover' | 'spiral'");
        assert!(binding.optional);
    }

    #[test]
    fn test_extract_many_cross_reference() {
        let dir = tempfile::tempdir().unwrap();
        write_source(
            dir.path(),
            "author.dto",
            "export interface IAuthorDTO {\n  name: string;\n  books: IBookDTO[];\n}\n",
        );
        write_source(
            dir.path(),
            "book.dto",
            "export interface IBookDTO {\n  title: string;\n}\n",
        );

        let set = extract_many(dir.path(), &["author", "book"]).unwrap();
        assert_eq!(set.len(), 2);

        let books = set.get("author").unwrap().property("books").unwrap();
        assert_eq!(books.signature, "book[]");
        assert!(set.contains("book"));
    }

    #[test]
    fn test_extract_many_order_independent() {
        let dir = tempfile::tempdir().unwrap();
        write_source(
            dir.path(),
            "author.dto",
            "export interface IAuthorDTO {\n  name: string;\n}\n",
        );
        write_source(
            dir.path(),
            "book.dto",
            "export interface IBookDTO {\n  title: string;\n}\n",
        );

        let forward = extract_many(dir.path(), &["author", "book"]).unwrap();
        let reverse = extract_many(dir.path(), &["book", "author"]).unwrap();
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_extract_many_missing_location() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_many(dir.path(), &["ghost"]).unwrap_err();
        assert!(matches!(err, SchemaError::FileNotFound { .. }));
    }

    #[test]
    fn test_kebab_location_for_camel_name() {
        let dir = tempfile::tempdir().unwrap();
        write_source(
            dir.path(),
            "book-shelf.dto",
            "export interface IBookShelfDTO {\n  label: string;\n}\n",
        );

        let set = extract_many(dir.path(), &["bookShelf"]).unwrap();
        assert!(set.contains("bookShelf"));
    }
}
