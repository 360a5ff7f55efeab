#![deny(missing_docs)]

//! # OpenAPI Module
//!
//! - **schema**: Schema node definitions.
//! - **document**: The loaded document and `$ref` lookup.
//! - **registry**: Known top-level definition names.
//! - **resolver**: Logic for mapping schema nodes to Rust types.

pub mod document;
pub(crate) mod ref_utils;
pub mod registry;
pub mod resolver;
pub mod schema;

pub use document::{DefinitionsSection, SchemaDocument};
pub use registry::KnownDefinitions;
pub use resolver::{
    resolve_simple_type, ResolvedType, TypeCategory, TypeResolver, TypeShape,
};
pub use schema::{SchemaItems, SchemaNode, SchemaOrBool};
