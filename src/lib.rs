//! Signet Schemas
//!
//! Turns DTO interface declarations into portable, descriptive schema
//! documents, and validates JSON values against those documents at runtime.
//! One side extracts the schema from declared types plus human-written
//! commentary; the other consumes it to reject malformed payloads with
//! precise, attributable errors.
//!
//! ## Features
//!
//! - **Signature grammar**: one canonical string encoding of a type, shared
//!   by extraction and validation (unions, arrays, literals, primitives,
//!   named cross-references)
//! - **Schema extraction**: interface members plus adjacent commentary
//!   become named schemas; batch extraction shares one introspection
//!   session so cross-references resolve consistently
//! - **Runtime validation**: first-match-wins unions, closed-world object
//!   shapes, optional-property elision, no coercion
//! - **Typed errors**: a closed taxonomy carrying the offending schema and
//!   property context
//!
//! ## Data flow
//!
//! ```text
//! declarations (*.dto.ts)
//!   └─> SourceSet (introspection session)
//!         └─> extract_one / extract_many
//!               └─> Schema / SchemaSet ──[persisted JSON]──┐
//!                                                          │
//! runtime JSON value ──> parse(value, signature, set) <────┘
//!                          └─> value | SchemaError
//! ```
//!
//! Schemas are immutable once extracted; any number of validations may run
//! concurrently against one schema set.

pub mod config;
pub mod error;
pub mod extractor;
pub mod introspect;
pub mod names;
pub mod schema;
pub mod signature;
pub mod ty;
pub mod validate;

pub use error::{PropertyContext, Result, SchemaError};
pub use extractor::{extract_many, extract_one};
pub use introspect::{MemberInfo, SourceSet, StructureInfo};
pub use schema::{NamedSchema, Property, Schema, SchemaSet};
pub use signature::serialize_type;
pub use ty::{Primitive, ResolvedType};
pub use validate::parse;
