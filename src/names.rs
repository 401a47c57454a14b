//! Naming conventions
//!
//! Casing utilities plus the fixed mapping between a schema's logical name,
//! the interface that declares it, and the file the interface lives in:
//!
//! - logical name `author` -> interface `IAuthorDTO`
//! - logical name `author` -> source location `author.dto`
//! - interface `IAuthorDTO` -> schema name `author`
//!
//! The affixes are fixed; the two directions are exact inverses for any
//! round-trip name.

/// Prefix every DTO interface carries
const INTERFACE_PREFIX: &str = "I";
/// Suffix every DTO interface carries
const INTERFACE_SUFFIX: &str = "DTO";
/// Extension of a source location (the on-disk file adds `.ts`)
const LOCATION_SUFFIX: &str = ".dto";

/// Convert a string to PascalCase.
///
/// Words are split on `_`, `-`, and spaces; a name with no separators keeps
/// its interior casing and only has its first letter raised, so an
/// already-camelCase name survives the round trip.
pub fn to_pascal_case(s: &str) -> String {
    if !s.contains(['_', '-', ' ']) {
        let mut chars = s.chars();
        return match chars.next() {
            None => String::new(),
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        };
    }

    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;
    for c in s.chars() {
        if c == '_' || c == '-' || c == ' ' {
            capitalize_next = true;
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Convert a string to camelCase.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
    }
}

/// Convert a string to kebab-case.
pub fn to_kebab_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c == '_' || c == ' ' {
            if !result.ends_with('-') {
                result.push('-');
            }
        } else if c.is_ascii_uppercase() {
            if !result.is_empty() && !result.ends_with('-') {
                result.push('-');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// Interface name declared for a logical schema name.
///
/// `author` -> `IAuthorDTO`
pub fn interface_name(logical_name: &str) -> String {
    format!(
        "{}{}{}",
        INTERFACE_PREFIX,
        to_pascal_case(logical_name),
        INTERFACE_SUFFIX
    )
}

/// Source location a logical schema name maps to.
///
/// `bookShelf` -> `book-shelf.dto`
pub fn source_location(logical_name: &str) -> String {
    format!("{}{}", to_kebab_case(logical_name), LOCATION_SUFFIX)
}

/// Schema name derived from an interface name.
///
/// Strips the fixed affixes and camel-cases the remainder:
/// `IAuthorDTO` -> `author`. A name without the affixes is camel-cased
/// unchanged, so validator-side normalization can use the same function.
pub fn schema_name(interface_name: &str) -> String {
    let mut name = interface_name;
    if let Some(stripped) = name.strip_prefix(INTERFACE_PREFIX) {
        // Only treat `I` as the affix when a PascalCase name follows.
        if stripped.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
            name = stripped;
        }
    }
    if let Some(stripped) = name.strip_suffix(INTERFACE_SUFFIX) {
        if !stripped.is_empty() {
            name = stripped;
        }
    }
    to_camel_case(name)
}

/// Logical schema name for a source location, inverse of [`source_location`].
///
/// `book-shelf.dto` -> `bookShelf`
pub fn logical_name(location: &str) -> String {
    let stem = location.strip_suffix(LOCATION_SUFFIX).unwrap_or(location);
    to_camel_case(stem)
}
