//! Signature grammar and serializer
//!
//! A signature is the canonical string encoding of a type. Both interpreters
//! (the serializer here and the validator in [`crate::validate`]) agree on
//! one grammar, in precedence order:
//!
//! 1. Union: `T1 | T2 | ... | Tn`, split on top-level `|`
//! 2. Array: trailing `[]`
//! 3. Primitive: `string`, `number`, `boolean`, `null`, `undefined`,
//!    `true`, `false`
//! 4. String literal: `'value'`
//! 5. Number literal: digits only
//! 6. Named schema reference: anything else
//!
//! Union splitting binds loosest, and the narrow literal/primitive matches
//! are tried before falling back to a reference, so a primitive token never
//! shadows a same-named schema.

use crate::error::{Result, SchemaError};
use crate::names;
use crate::ty::ResolvedType;

/// Separator between union alternatives in a rendered signature
const UNION_SEPARATOR: &str = " | ";

/// Split a signature into top-level union alternatives, each trimmed.
///
/// A `|` inside brackets, generic arguments, or a quoted literal does not
/// split. A signature with no top-level `|` yields itself as the only part.
pub fn split_union(signature: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in signature.char_indices() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '[' | '(' | '<' => depth += 1,
                ']' | ')' | '>' => depth = depth.saturating_sub(1),
                '|' if depth == 0 => {
                    parts.push(signature[start..i].trim());
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    parts.push(signature[start..].trim());
    parts
}

/// Element signature of an array signature, or `None` if the signature does
/// not end in `[]`.
pub fn array_element(signature: &str) -> Option<&str> {
    let inner = signature.trim().strip_suffix("[]")?.trim_end();
    if inner.is_empty() {
        None
    } else {
        Some(inner)
    }
}

/// Unwrapped contents of a quoted string literal, or `None`.
///
/// The token must be fully wrapped in a single matching pair of quotes with
/// no interior quote of the same kind.
pub fn string_literal(signature: &str) -> Option<&str> {
    let s = signature.trim();
    let first = s.chars().next()?;
    if first != '\'' && first != '"' {
        return None;
    }
    if s.len() < 2 || !s.ends_with(first) {
        return None;
    }
    let inner = &s[1..s.len() - 1];
    if inner.contains(first) {
        return None;
    }
    Some(inner)
}

/// Exact integer value of an all-digits token, or `None`.
pub fn number_literal(signature: &str) -> Option<u64> {
    let s = signature.trim();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Whether a token can denote a schema reference.
pub fn is_reference(signature: &str) -> bool {
    let s = signature.trim();
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Render a resolved type as a canonical signature string.
///
/// `optional` marks the enclosing property as optional: the `undefined`
/// union member contributed purely by optionality is filtered out, since
/// optionality is represented once, on the property itself. The filter
/// applies only at this outermost level, never inside nested types.
pub fn serialize_type(ty: &ResolvedType, optional: bool) -> Result<String> {
    match ty {
        ResolvedType::Union { members } => {
            let members: Vec<&ResolvedType> = if optional {
                members.iter().filter(|m| !m.is_undefined()).collect()
            } else {
                members.iter().collect()
            };
            match members.len() {
                // Optionality was the whole union
                0 => Ok("undefined".to_string()),
                1 => serialize_type(members[0], false),
                _ => {
                    let rendered = members
                        .into_iter()
                        .map(|m| serialize_type(m, false))
                        .collect::<Result<Vec<_>>>()?;
                    Ok(rendered.join(UNION_SEPARATOR))
                }
            }
        }
        ResolvedType::Array { element } => Ok(format!("{}[]", serialize_type(element, false)?)),
        ResolvedType::StringLiteral { value } => Ok(format!("'{}'", value)),
        ResolvedType::NumberLiteral { value } => Ok(value.to_string()),
        ResolvedType::Primitive { primitive } => Ok(primitive.as_str().to_string()),
        // References render as schema-set keys so the validator can resolve
        // them without re-deriving the convention.
        ResolvedType::Reference { name } => {
            if name.is_empty() {
                return Err(SchemaError::TypeNotFound {
                    type_text: String::new(),
                });
            }
            Ok(names::schema_name(name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::Primitive;

    #[test]
    fn test_split_union_top_level() {
        assert_eq!(split_union("string | number"), vec!["string", "number"]);
        assert_eq!(
            split_union("'hardcover' | 'spiral'"),
            vec!["'hardcover'", "'spiral'"]
        );
        assert_eq!(split_union("string"), vec!["string"]);
    }

    #[test]
    fn test_split_union_ignores_quoted_pipe() {
        assert_eq!(split_union("'a | b' | string"), vec!["'a | b'", "string"]);
    }

    #[test]
    fn test_split_union_ignores_bracketed_pipe() {
        assert_eq!(split_union("Array<a | b>"), vec!["Array<a | b>"]);
    }

    #[test]
    fn test_array_element() {
        assert_eq!(array_element("string[]"), Some("string"));
        assert_eq!(array_element("book[]"), Some("book"));
        assert_eq!(array_element("string"), None);
        assert_eq!(array_element("[]"), None);
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal("'hardcover'"), Some("hardcover"));
        assert_eq!(string_literal("\"spiral\""), Some("spiral"));
        assert_eq!(string_literal("''"), Some(""));
        assert_eq!(string_literal("hardcover"), None);
        assert_eq!(string_literal("'a'b'"), None);
        assert_eq!(string_literal("'"), None);
    }

    #[test]
    fn test_number_literal() {
        assert_eq!(number_literal("42"), Some(42));
        assert_eq!(number_literal("0"), Some(0));
        assert_eq!(number_literal("4.2"), None);
        assert_eq!(number_literal("-1"), None);
        assert_eq!(number_literal(""), None);
    }

    #[test]
    fn test_is_reference() {
        assert!(is_reference("book"));
        assert!(is_reference("bookShelf"));
        assert!(!is_reference("'book'"));
        assert!(!is_reference("a b"));
        assert!(!is_reference(""));
    }

    #[test]
    fn test_serialize_primitives_and_literals() {
        let ty = ResolvedType::primitive(Primitive::String);
        assert_eq!(serialize_type(&ty, false).unwrap(), "string");

        let ty = ResolvedType::string_literal("hardcover");
        assert_eq!(serialize_type(&ty, false).unwrap(), "'hardcover'");

        let ty = ResolvedType::NumberLiteral { value: 5 };
        assert_eq!(serialize_type(&ty, false).unwrap(), "5");
    }

    #[test]
    fn test_serialize_union() {
        let ty = ResolvedType::Union {
            members: vec![
                ResolvedType::primitive(Primitive::Boolean),
                ResolvedType::primitive(Primitive::Number),
            ],
        };
        assert_eq!(serialize_type(&ty, false).unwrap(), "boolean | number");
    }

    #[test]
    fn test_serialize_optional_filters_undefined() {
        let ty = ResolvedType::Union {
            members: vec![
                ResolvedType::primitive(Primitive::String),
                ResolvedType::primitive(Primitive::Undefined),
            ],
        };
        assert_eq!(serialize_type(&ty, true).unwrap(), "string");
        // Not optional: undefined member stays
        assert_eq!(serialize_type(&ty, false).unwrap(), "string | undefined");
    }

    #[test]
    fn test_serialize_optional_filter_is_outermost_only() {
        // An undefined inside a nested array element union is untouched
        let inner = ResolvedType::Union {
            members: vec![
                ResolvedType::primitive(Primitive::String),
                ResolvedType::primitive(Primitive::Undefined),
            ],
        };
        let ty = ResolvedType::Union {
            members: vec![
                ResolvedType::array(inner),
                ResolvedType::primitive(Primitive::Undefined),
            ],
        };
        assert_eq!(
            serialize_type(&ty, true).unwrap(),
            "string | undefined[]"
        );
    }

    #[test]
    fn test_serialize_array_of_reference() {
        let ty = ResolvedType::array(ResolvedType::reference("IBookDTO"));
        assert_eq!(serialize_type(&ty, false).unwrap(), "book[]");
    }
}
