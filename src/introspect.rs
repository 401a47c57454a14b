//! Declaration introspection
//!
//! Reads `*.dto.ts`-style declaration files and reports, for a named
//! interface, its leading commentary and ordered members with their
//! resolved types. A [`SourceSet`] is one introspection session: built
//! once from a root directory and a set of locations, then read by any
//! number of extractions so cross-references resolve against the same
//! type universe.
//!
//! The declaration format is the interface subset:
//!
//! ```text
//! /** A registered author. */
//! export interface IAuthorDTO {
//!   /** Display name. */
//!   name: string;
//!   books?: IBookDTO[];
//!   binding: 'hardcover' | 'spiral'; // preferred binding
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, trace};

use crate::error::{Result, SchemaError};
use crate::signature;
use crate::ty::{Primitive, ResolvedType};

/// File extension a source location resolves to on disk
const SOURCE_EXTENSION: &str = "ts";

/// One declared member of an interface
#[derive(Debug, Clone, PartialEq)]
pub struct MemberInfo {
    /// Member name
    pub name: String,
    /// Whether the member carries the optionality marker
    pub optional: bool,
    /// Resolved type of the member
    pub ty: ResolvedType,
    /// Commentary adjacent to the member, if any
    pub comment: Option<String>,
}

/// A declared interface: its name, commentary, and ordered members
#[derive(Debug, Clone, PartialEq)]
pub struct StructureInfo {
    /// Interface name as declared
    pub name: String,
    /// Commentary immediately preceding the declaration, if any
    pub comment: Option<String>,
    /// Members in declaration order
    pub members: Vec<MemberInfo>,
}

/// An interface declaration as scanned from source, before member parsing
struct RawDeclaration<'a> {
    doc: Option<String>,
    name: Option<&'a str>,
    body: &'a str,
}

/// One introspection session over a set of declaration files.
///
/// Write-once: locations are loaded up front, after which the set is only
/// read. A location whose file cannot be read is simply absent, and lookups
/// against it fail with `FileNotFound`.
pub struct SourceSet {
    root: PathBuf,
    files: HashMap<String, String>,
    interface_re: Regex,
}

impl SourceSet {
    /// Create an empty session rooted at a directory
    pub fn open(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            files: HashMap::new(),
            // The doc body may not contain `*/`, so a member comment can
            // never swallow the next declaration's header.
            interface_re: Regex::new(
                r"(?:/\*\*(?P<doc>(?:[^*]|\*[^/])*)\*/\s*)?(?:export\s+)?interface(?:\s+(?P<name>[A-Za-z_][A-Za-z0-9_]*))?\s*\{",
            )
            .unwrap(),
        }
    }

    /// Create a session and load a batch of locations
    pub fn load<S: AsRef<str>>(root: impl AsRef<Path>, locations: &[S]) -> Self {
        let mut sources = Self::open(root);
        for location in locations {
            sources.add_location(location.as_ref());
        }
        sources
    }

    /// Read one location into the session.
    ///
    /// An unreadable file is skipped; the failure surfaces later as
    /// `FileNotFound` when the location is looked up.
    pub fn add_location(&mut self, location: &str) {
        let path = self.root.join(format!("{}.{}", location, SOURCE_EXTENSION));
        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(location, path = %path.display(), "loaded declaration source");
                self.files.insert(location.to_string(), content);
            }
            Err(e) => {
                debug!(location, path = %path.display(), error = %e, "declaration source unreadable");
            }
        }
    }

    /// Root directory of this session
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a location was loaded into the session
    pub fn has_location(&self, location: &str) -> bool {
        self.files.contains_key(location)
    }

    /// Introspect a named interface at a location.
    ///
    /// Distinct failures: `FileNotFound` when the location was never loaded,
    /// `SyntaxListNotFound` when the file holds no interface declarations,
    /// `InterfaceNameCouldNotBeDetermined` when a declaration exists but its
    /// name cannot be read, `InterfaceNotFound` when no declaration carries
    /// the requested name.
    pub fn structure(&self, location: &str, name: &str) -> Result<StructureInfo> {
        let source = self
            .files
            .get(location)
            .ok_or_else(|| SchemaError::FileNotFound {
                location: location.to_string(),
            })?;

        let declarations = self.scan_declarations(source);
        if declarations.is_empty() {
            return Err(SchemaError::SyntaxListNotFound {
                location: location.to_string(),
            });
        }

        let declaration = match declarations.iter().find(|d| d.name == Some(name)) {
            Some(d) => d,
            None if declarations.iter().any(|d| d.name.is_none()) => {
                return Err(SchemaError::InterfaceNameCouldNotBeDetermined {
                    location: location.to_string(),
                });
            }
            None => {
                return Err(SchemaError::InterfaceNotFound {
                    name: name.to_string(),
                    location: location.to_string(),
                });
            }
        };

        let members = parse_members(declaration.body)?;
        trace!(location, name, members = members.len(), "introspected interface");

        Ok(StructureInfo {
            name: name.to_string(),
            comment: declaration.doc.clone(),
            members,
        })
    }

    /// Scan a source file for interface declarations
    fn scan_declarations<'a>(&self, source: &'a str) -> Vec<RawDeclaration<'a>> {
        self.interface_re
            .captures_iter(source)
            .map(|caps| {
                let header_end = caps.get(0).map(|m| m.end()).unwrap_or(0);
                let rest = &source[header_end..];
                let body = match rest.find('}') {
                    Some(close) => &rest[..close],
                    None => rest,
                };
                RawDeclaration {
                    doc: caps.name("doc").and_then(|m| clean_doc(m.as_str())),
                    name: caps.name("name").map(|m| m.as_str()),
                    body,
                }
            })
            .collect()
    }
}

/// Parse the member list of an interface body
fn parse_members(body: &str) -> Result<Vec<MemberInfo>> {
    let mut members = Vec::new();
    let mut pending_doc: Option<String> = None;
    let mut doc_block: Option<String> = None;

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Inside a multi-line doc block
        if let Some(block) = doc_block.as_mut() {
            if let Some(rest) = line.strip_suffix("*/") {
                block.push('\n');
                block.push_str(rest);
                pending_doc = clean_doc(&std::mem::take(block));
                doc_block = None;
            } else {
                block.push('\n');
                block.push_str(line);
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("/**") {
            match rest.strip_suffix("*/") {
                Some(inner) => pending_doc = clean_doc(inner),
                None => doc_block = Some(rest.to_string()),
            }
            continue;
        }
        if line.starts_with("//") {
            continue;
        }

        // A member declaration, optionally followed by a trailing comment
        let (declaration, trailing) = match line.find(';') {
            Some(semi) => {
                let comment = line[semi + 1..]
                    .trim()
                    .strip_prefix("//")
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty());
                (&line[..semi], comment)
            }
            None => (line.trim_end_matches(','), None),
        };
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }

        let (name_part, type_text) =
            declaration
                .split_once(':')
                .ok_or_else(|| SchemaError::UnexpectedError {
                    message: format!("member declaration could not be parsed: '{}'", declaration),
                })?;

        let name_part = name_part.trim();
        let (name, optional) = match name_part.strip_suffix('?') {
            Some(stripped) => (stripped.trim_end(), true),
            None => (name_part, false),
        };
        if !signature::is_reference(name) {
            return Err(SchemaError::UnexpectedError {
                message: format!("member name could not be determined: '{}'", declaration),
            });
        }

        let mut ty = parse_type_text(type_text)?;
        if optional {
            ty = with_undefined(ty);
        }

        members.push(MemberInfo {
            name: name.to_string(),
            optional,
            ty,
            comment: pending_doc.take().or(trailing),
        });
    }

    Ok(members)
}

/// Parse declared type text into a resolved type.
///
/// Accepts the signature grammar plus the `Array<T>` generic spelling;
/// both array spellings resolve to the same representation.
pub fn parse_type_text(text: &str) -> Result<ResolvedType> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SchemaError::TypeNotFound {
            type_text: String::new(),
        });
    }

    let parts = signature::split_union(text);
    if parts.len() > 1 {
        let members = parts
            .into_iter()
            .map(parse_type_text)
            .collect::<Result<Vec<_>>>()?;
        return Ok(ResolvedType::Union { members });
    }
    let text = parts[0];

    if let Some(element) = text.strip_suffix("[]") {
        let element = element.trim_end();
        if element.is_empty() {
            return Err(SchemaError::TypeNotFound {
                type_text: text.to_string(),
            });
        }
        return Ok(ResolvedType::array(parse_type_text(element)?));
    }
    if let Some(rest) = text.strip_prefix("Array<") {
        let element = rest.strip_suffix('>').map(str::trim).unwrap_or("");
        if element.is_empty() {
            return Err(SchemaError::TypeNotFound {
                type_text: text.to_string(),
            });
        }
        return Ok(ResolvedType::array(parse_type_text(element)?));
    }

    if let Some(primitive) = Primitive::from_token(text) {
        return Ok(ResolvedType::primitive(primitive));
    }
    if let Some(value) = signature::string_literal(text) {
        return Ok(ResolvedType::string_literal(value));
    }
    if let Some(value) = signature::number_literal(text) {
        return Ok(ResolvedType::NumberLiteral { value });
    }
    if signature::is_reference(text) {
        return Ok(ResolvedType::reference(text));
    }

    Err(SchemaError::TypeNotFound {
        type_text: text.to_string(),
    })
}

/// Add `undefined` to an optional member's type, the way the declaration
/// host resolves optionality. Idempotent when already present.
fn with_undefined(ty: ResolvedType) -> ResolvedType {
    match ty {
        ResolvedType::Union { mut members } => {
            if !members.iter().any(ResolvedType::is_undefined) {
                members.push(ResolvedType::primitive(Primitive::Undefined));
            }
            ResolvedType::Union { members }
        }
        other if other.is_undefined() => other,
        other => ResolvedType::Union {
            members: vec![other, ResolvedType::primitive(Primitive::Undefined)],
        },
    }
}

/// Normalize doc comment text: strip the leading `*` gutter and collapse
/// lines into one string.
fn clean_doc(raw: &str) -> Option<String> {
    let cleaned = raw
        .lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_source(dir: &Path, location: &str, content: &str) {
        let path = dir.join(format!("{}.{}", location, SOURCE_EXTENSION));
        let mut file = fs::File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    const AUTHOR_SOURCE: &str = r#"
/**
 * A registered author.
 */
export interface IAuthorDTO {
  /** Display name. */
  name: string;
  books?: IBookDTO[];
  rating: 1 | 2 | 3; // self-reported
}
"#;

    #[test]
    fn test_structure_members_and_comments() {
        let dir = tempfile::tempdir().unwrap();
        write_source(dir.path(), "author.dto", AUTHOR_SOURCE);

        let sources = SourceSet::load(dir.path(), &["author.dto"]);
        let info = sources.structure("author.dto", "IAuthorDTO").unwrap();

        assert_eq!(info.name, "IAuthorDTO");
        assert_eq!(info.comment.as_deref(), Some("A registered author."));
        assert_eq!(info.members.len(), 3);

        let name = &info.members[0];
        assert_eq!(name.name, "name");
        assert!(!name.optional);
        assert_eq!(name.comment.as_deref(), Some("Display name."));
        assert_eq!(name.ty, ResolvedType::primitive(Primitive::String));

        let books = &info.members[1];
        assert!(books.optional);
        assert_eq!(
            books.ty,
            ResolvedType::Union {
                members: vec![
                    ResolvedType::array(ResolvedType::reference("IBookDTO")),
                    ResolvedType::primitive(Primitive::Undefined),
                ],
            }
        );

        let rating = &info.members[2];
        assert_eq!(rating.comment.as_deref(), Some("self-reported"));
        assert_eq!(
            rating.ty,
            ResolvedType::Union {
                members: vec![
                    ResolvedType::NumberLiteral { value: 1 },
                    ResolvedType::NumberLiteral { value: 2 },
                    ResolvedType::NumberLiteral { value: 3 },
                ],
            }
        );
    }

    #[test]
    fn test_missing_file_vs_missing_interface() {
        let dir = tempfile::tempdir().unwrap();
        write_source(dir.path(), "author.dto", AUTHOR_SOURCE);

        let sources = SourceSet::load(dir.path(), &["author.dto", "book.dto"]);

        let err = sources.structure("book.dto", "IBookDTO").unwrap_err();
        assert!(matches!(err, SchemaError::FileNotFound { .. }));

        let err = sources.structure("author.dto", "IBookDTO").unwrap_err();
        assert!(matches!(err, SchemaError::InterfaceNotFound { .. }));
    }

    #[test]
    fn test_file_without_declarations() {
        let dir = tempfile::tempdir().unwrap();
        write_source(dir.path(), "empty.dto", "// nothing declared here\n");

        let sources = SourceSet::load(dir.path(), &["empty.dto"]);
        let err = sources.structure("empty.dto", "IEmptyDTO").unwrap_err();
        assert!(matches!(err, SchemaError::SyntaxListNotFound { .. }));
    }

    #[test]
    fn test_unnamed_interface() {
        let dir = tempfile::tempdir().unwrap();
        write_source(dir.path(), "anon.dto", "export interface {\n  id: number;\n}\n");

        let sources = SourceSet::load(dir.path(), &["anon.dto"]);
        let err = sources.structure("anon.dto", "IAnonDTO").unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InterfaceNameCouldNotBeDetermined { .. }
        ));
    }

    #[test]
    fn test_parse_type_text_array_spellings() {
        assert_eq!(
            parse_type_text("string[]").unwrap(),
            ResolvedType::array(ResolvedType::primitive(Primitive::String))
        );
        assert_eq!(
            parse_type_text("Array<string>").unwrap(),
            ResolvedType::array(ResolvedType::primitive(Primitive::String))
        );
    }

    #[test]
    fn test_parse_type_text_missing_element_type() {
        assert!(matches!(
            parse_type_text("[]").unwrap_err(),
            SchemaError::TypeNotFound { .. }
        ));
        assert!(matches!(
            parse_type_text("Array<>").unwrap_err(),
            SchemaError::TypeNotFound { .. }
        ));
    }

    #[test]
    fn test_parse_type_text_literals() {
        assert_eq!(
            parse_type_text("'hardcover'").unwrap(),
            ResolvedType::string_literal("hardcover")
        );
        assert_eq!(
            parse_type_text("42").unwrap(),
            ResolvedType::NumberLiteral { value: 42 }
        );
    }

    #[test]
    fn test_member_name_unreadable() {
        let body = "?: string;";
        let err = parse_members(body).unwrap_err();
        assert!(matches!(err, SchemaError::UnexpectedError { .. }));
    }

    #[test]
    fn test_optional_with_explicit_undefined_not_duplicated() {
        let ty = with_undefined(parse_type_text("string | undefined").unwrap());
        assert_eq!(
            ty,
            ResolvedType::Union {
                members: vec![
                    ResolvedType::primitive(Primitive::String),
                    ResolvedType::primitive(Primitive::Undefined),
                ],
            }
        );
    }
}
